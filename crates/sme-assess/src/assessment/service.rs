use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::catalog::ScenarioCatalog;
use super::report::{render_export, ExportError, ExportFormat, RenderedExport};
use super::repository::{SessionId, SessionRecord, SessionStore, StoreError};
use super::results::AssessmentResults;
use super::scoring::ScoringConfig;
use super::session::{SessionCommand, SessionError};

/// Service composing the session store, scenario catalog and scoring policy.
pub struct AssessmentService<S> {
    store: Arc<S>,
    catalog: Arc<ScenarioCatalog>,
    config: Arc<ScoringConfig>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("sess-{id:06}"))
}

impl<S> AssessmentService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(store: Arc<S>, config: ScoringConfig) -> Self {
        Self::with_catalog(store, ScenarioCatalog::standard(), config)
    }

    pub fn with_catalog(store: Arc<S>, catalog: ScenarioCatalog, config: ScoringConfig) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Start a new session at the intake stage.
    pub fn create(&self) -> Result<SessionRecord, AssessmentServiceError> {
        let record = SessionRecord::new(next_session_id(), Utc::now());
        let stored = self.store.insert(record)?;
        info!(session_id = %stored.id, "assessment session created");
        Ok(stored)
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionRecord, AssessmentServiceError> {
        let record = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    /// Apply a user command and persist the updated session.
    pub fn apply(
        &self,
        id: &SessionId,
        command: SessionCommand,
    ) -> Result<SessionRecord, AssessmentServiceError> {
        let mut record = self.get(id)?;
        let before = record.session.stage();
        let name = command.name();
        debug!(session_id = %id, command = name, stage = %before, "applying session command");

        let after = match record.session.apply(command, &self.catalog) {
            Ok(stage) => stage,
            Err(error) => {
                warn!(session_id = %id, command = name, %error, "session command rejected");
                return Err(error.into());
            }
        };

        if after != before {
            info!(session_id = %id, from = %before, to = %after, "session stage changed");
        }

        record.updated_at = Utc::now();
        let stored = self.store.update(record)?;
        Ok(stored)
    }

    /// Score the session as it stands. Skipped or unanswered scenarios count
    /// as zero, so results are available from any stage.
    pub fn results(
        &self,
        id: &SessionId,
    ) -> Result<(SessionRecord, AssessmentResults), AssessmentServiceError> {
        let record = self.get(id)?;
        let results = AssessmentResults::compute(&record.session, &self.catalog, &self.config);
        debug!(
            session_id = %id,
            overall = results.scoreboard.overall.percent,
            answered = results.scoreboard.outcomes.len(),
            "assessment results computed"
        );
        Ok((record, results))
    }

    pub fn export(
        &self,
        id: &SessionId,
        format: ExportFormat,
    ) -> Result<RenderedExport, AssessmentServiceError> {
        let (record, results) = self.results(id)?;
        match render_export(format, &record.session, &results) {
            Ok(rendered) => {
                info!(session_id = %id, %format, "assessment exported");
                Ok(rendered)
            }
            Err(error @ ExportError::EngineUnavailable(_)) => {
                warn!(session_id = %id, %format, "export engine unavailable");
                Err(error.into())
            }
            Err(error) => Err(error.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::session::Stage;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct TestStore {
        records: Mutex<HashMap<SessionId, SessionRecord>>,
    }

    impl SessionStore for TestStore {
        fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
            self.records
                .lock()
                .expect("lock")
                .insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, mut record: SessionRecord) -> Result<SessionRecord, StoreError> {
            let mut records = self.records.lock().expect("lock");
            let current = records.get(&record.id).ok_or(StoreError::NotFound)?;
            if current.version != record.version {
                return Err(StoreError::Stale);
            }
            record.version += 1;
            records.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
            Ok(self.records.lock().expect("lock").get(id).cloned())
        }
    }

    fn service() -> AssessmentService<TestStore> {
        AssessmentService::new(Arc::new(TestStore::default()), ScoringConfig::default())
    }

    #[test]
    fn rejected_command_leaves_stored_session_untouched() {
        let service = service();
        let record = service.create().expect("session created");

        let error = service
            .apply(&record.id, SessionCommand::StartSimulation)
            .expect_err("simulation needs a profile first");
        assert!(matches!(error, AssessmentServiceError::Session(_)));

        let stored = service.get(&record.id).expect("still stored");
        assert_eq!(stored.session.stage(), Stage::Intake);
        assert_eq!(stored.updated_at, record.updated_at);
    }

    #[test]
    fn command_against_an_outdated_copy_is_refused() {
        let service = service();
        let created = service.create().expect("session created");
        let stale = created.clone();

        let applied = service
            .apply(
                &created.id,
                SessionCommand::SubmitProfile {
                    profile: Default::default(),
                },
            )
            .expect("profile accepted");
        assert_eq!(applied.version, 1);

        let mut late = stale;
        late.session = applied.session.clone();
        assert!(matches!(service.store.update(late), Err(StoreError::Stale)));
        assert_eq!(
            service.get(&created.id).expect("stored").version,
            applied.version
        );
    }

    #[test]
    fn sessions_receive_distinct_ids() {
        let service = service();
        let first = service.create().expect("first");
        let second = service.create().expect("second");
        assert_ne!(first.id, second.id);
        assert!(first.id.0.starts_with("sess-"));
    }

    #[test]
    fn missing_session_surfaces_store_not_found() {
        let error = service()
            .results(&SessionId("sess-unknown".into()))
            .expect_err("unknown session");
        assert!(matches!(
            error,
            AssessmentServiceError::Store(StoreError::NotFound)
        ));
    }
}
