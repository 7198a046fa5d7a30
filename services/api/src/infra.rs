use metrics_exporter_prometheus::PrometheusHandle;
use sme_assess::assessment::{SessionId, SessionRecord, SessionStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store. Sessions vanish when the server stops.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("session store mutex poisoned".to_string()))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, mut record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.lock()?;
        let existing = guard.get_mut(&record.id).ok_or(StoreError::NotFound)?;
        if existing.version != record.version {
            return Err(StoreError::Stale);
        }
        record.version += 1;
        *existing = record.clone();
        Ok(record)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn insert_rejects_duplicate_ids_and_update_requires_existing() {
        let store = InMemorySessionStore::default();
        let record = SessionRecord::new(SessionId("sess-test".into()), Utc::now());

        store.insert(record.clone()).expect("first insert");
        assert!(matches!(
            store.insert(record.clone()),
            Err(StoreError::Conflict)
        ));
        assert_eq!(store.len(), 1);

        let missing = SessionRecord::new(SessionId("sess-missing".into()), Utc::now());
        assert!(matches!(store.update(missing), Err(StoreError::NotFound)));

        let updated = store.update(record.clone()).expect("current version");
        assert_eq!(updated.version, 1);
        assert!(matches!(store.update(record), Err(StoreError::Stale)));
        assert!(store
            .fetch(&SessionId("sess-test".into()))
            .expect("fetch succeeds")
            .is_some());
    }
}
