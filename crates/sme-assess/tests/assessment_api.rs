use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sme_assess::assessment::{
    assessment_router, AssessmentService, ScoringConfig, SessionId, SessionRecord, SessionStore,
    StoreError,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct MapStore {
    records: Mutex<BTreeMap<SessionId, SessionRecord>>,
}

impl SessionStore for MapStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut records = self.records.lock().expect("store lock");
        if records.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, mut record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut records = self.records.lock().expect("store lock");
        let existing = records.get_mut(&record.id).ok_or(StoreError::NotFound)?;
        if existing.version != record.version {
            return Err(StoreError::Stale);
        }
        record.version += 1;
        *existing = record.clone();
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.records.lock().expect("store lock").get(id).cloned())
    }
}

fn app() -> Router {
    let service = AssessmentService::new(Arc::new(MapStore::default()), ScoringConfig::default());
    assessment_router(Arc::new(service))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(
        app,
        Request::post("/api/v1/assessments")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let view: Value = serde_json::from_slice(&body).expect("json");
    view["session_id"]
        .as_str()
        .expect("session id")
        .to_string()
}

fn command(session_id: &str, payload: Value) -> Request<Body> {
    Request::post(format!("/api/v1/assessments/{session_id}/commands"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn session_lifecycle_over_http() {
    let app = app();
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        command(
            &id,
            json!({ "command": "submit_profile", "profile": { "business_name": "Acme Bakery" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(view["stage"], "questionnaire");
    assert_eq!(view["current_question"]["id"], "sell_online");

    let (status, body) = send(&app, command(&id, json!({ "command": "start_simulation" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: Value = serde_json::from_slice(&body).expect("json");
    assert!(error["error"]
        .as_str()
        .is_some_and(|message| message.contains("start_simulation")));

    let (status, body) = send(
        &app,
        Request::get(format!("/api/v1/assessments/{id}/results"))
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(results["domain_scores"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn export_formats_map_to_status_codes() {
    let app = app();
    let id = create_session(&app).await;

    let (status, body) = send(
        &app,
        Request::get(format!("/api/v1/assessments/{id}/export/csv"))
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).starts_with("Domain,Score,Label"));

    let (status, _) = send(
        &app,
        Request::get(format!("/api/v1/assessments/{id}/export/pdf"))
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);

    let (status, _) = send(
        &app,
        Request::get(format!("/api/v1/assessments/{id}/export/docx"))
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        Request::get("/api/v1/assessments/sess-missing")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_and_questionnaire_are_published() {
    let app = app();
    let (status, body) = send(
        &app,
        Request::get("/api/v1/scenarios")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let catalog: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(catalog["scenarios"].as_array().map(Vec::len), Some(5));

    let (status, body) = send(
        &app,
        Request::get("/api/v1/questionnaire")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let questionnaire: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(
        questionnaire["context_questions"].as_array().map(Vec::len),
        Some(13)
    );
    assert_eq!(
        questionnaire["control_sections"].as_array().map(Vec::len),
        Some(7)
    );
}
