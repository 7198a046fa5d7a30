use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::controls::ControlSection;
use super::intake::context_questions;
use super::report::views::ResultsView;
use super::report::ExportFormat;
use super::repository::{SessionId, SessionStore};
use super::service::AssessmentService;
use super::session::SessionCommand;
use crate::error::AppError;

/// Router exposing the assessment session lifecycle over HTTP.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/scenarios", get(scenarios_handler::<S>))
        .route("/api/v1/questionnaire", get(questionnaire_handler))
        .route("/api/v1/assessments", post(create_handler::<S>))
        .route("/api/v1/assessments/:session_id", get(session_handler::<S>))
        .route(
            "/api/v1/assessments/:session_id/commands",
            post(command_handler::<S>),
        )
        .route(
            "/api/v1/assessments/:session_id/results",
            get(results_handler::<S>),
        )
        .route(
            "/api/v1/assessments/:session_id/export/:format",
            get(export_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn scenarios_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: SessionStore + 'static,
{
    Json(json!({ "scenarios": service.catalog().scenarios() })).into_response()
}

pub(crate) async fn questionnaire_handler() -> Response {
    let sections: Vec<_> = ControlSection::ordered()
        .into_iter()
        .map(|section| {
            json!({
                "section": section,
                "label": section.label(),
                "questions": section.questions(),
            })
        })
        .collect();

    Json(json!({
        "context_questions": context_questions(),
        "control_sections": sections,
    }))
    .into_response()
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let record = service.create()?;
    let view = record.view(service.catalog());
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let record = service.get(&SessionId(session_id))?;
    Ok(Json(record.view(service.catalog())).into_response())
}

pub(crate) async fn command_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
    Json(command): Json<SessionCommand>,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let record = service.apply(&SessionId(session_id), command)?;
    Ok(Json(record.view(service.catalog())).into_response())
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let (_, results) = service.results(&SessionId(session_id))?;
    Ok(Json(ResultsView::from_results(&results)).into_response())
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path((session_id, format)): Path<(String, String)>,
) -> Result<Response, AppError>
where
    S: SessionStore + 'static,
{
    let format: ExportFormat = format.parse()?;
    let rendered = service.export(&SessionId(session_id), format)?;
    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.body,
    )
        .into_response())
}
