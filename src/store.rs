//! User data store - the single owner of the fetched user list
//!
//! Holds the records in fetch order together with the loading flag and the
//! last fetch error. Every change bumps a revision published on a
//! [`tokio::sync::watch`] channel so views can recompute.
//!
//! Fetches are split into [`UserDataStore::begin_load`] and
//! [`UserDataStore::finish_load`] so the I/O can run elsewhere (the network
//! actor). Each fetch gets a generation number; a result older than the
//! newest applied one is dropped, so the most recently issued fetch wins.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{FetchError, StoreError};
use crate::models::{UserRecord, UserStatus};
use crate::source::UserSource;

/// Consistent view of the store at one instant
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot<'a> {
    pub records: &'a [UserRecord],
    pub loading: bool,
    pub error: Option<&'a FetchError>,
}

/// Counts shown in the summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub blacklisted: usize,
}

pub struct UserDataStore {
    source: Arc<dyn UserSource>,
    records: Vec<UserRecord>,
    loading: bool,
    error: Option<FetchError>,
    issued_generation: u64,
    applied_generation: u64,
    revision: watch::Sender<u64>,
}

impl UserDataStore {
    /// Empty store, loading until the first fetch resolves
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        let (revision, _) = watch::channel(0);
        UserDataStore {
            source,
            records: Vec::new(),
            loading: true,
            error: None,
            issued_generation: 0,
            applied_generation: 0,
            revision,
        }
    }

    /// Receiver that changes whenever the store does
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            records: &self.records,
            loading: self.loading,
            error: self.error.as_ref(),
        }
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A fetch issued after the last applied one is still outstanding
    pub fn is_refreshing(&self) -> bool {
        self.applied_generation < self.issued_generation
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn find(&self, user_id: &str) -> Option<&UserRecord> {
        self.records.iter().find(|u| u.id == user_id)
    }

    /// Fail with `NotFound` unless the user is in the list
    pub fn ensure_exists(&self, user_id: &str) -> Result<(), StoreError> {
        match self.find(user_id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(user_id.to_string())),
        }
    }

    pub fn summary(&self) -> UserSummary {
        let mut summary = UserSummary {
            total: self.records.len(),
            ..UserSummary::default()
        };
        for user in &self.records {
            match user.status {
                UserStatus::Active => summary.active += 1,
                UserStatus::Inactive => summary.inactive += 1,
                UserStatus::Blacklisted => summary.blacklisted += 1,
                UserStatus::Unknown => {}
            }
        }
        summary
    }

    /// Fetch through the source and apply the result
    ///
    /// Failures land in the error slot; the previous records are kept.
    pub async fn load(&mut self) {
        let generation = self.begin_load();
        let source = Arc::clone(&self.source);
        let result = source.fetch_all().await;
        self.finish_load(generation, result);
    }

    /// Mark a fetch as in flight and return its generation
    ///
    /// `loading` only covers the first fetch; later ones show up in
    /// `is_refreshing`.
    pub fn begin_load(&mut self) -> u64 {
        self.issued_generation += 1;
        tracing::debug!(generation = self.issued_generation, "Fetch issued");
        self.notify();
        self.issued_generation
    }

    /// Apply a fetch result; returns false when it was superseded
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<Vec<UserRecord>, FetchError>,
    ) -> bool {
        if generation < self.applied_generation {
            tracing::debug!(
                generation,
                applied = self.applied_generation,
                "Discarding superseded fetch result"
            );
            return false;
        }
        self.applied_generation = generation;

        match result {
            Ok(records) => {
                tracing::info!(generation, count = records.len(), "Users loaded");
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, kept = self.records.len(), "Fetch failed");
                self.error = Some(e);
            }
        }
        self.loading = false;
        self.notify();
        true
    }

    /// Persist a status change, then apply it
    ///
    /// Nothing changes in memory unless the source accepted the update.
    pub async fn update_status(
        &mut self,
        user_id: &str,
        status: UserStatus,
    ) -> Result<(), StoreError> {
        self.ensure_exists(user_id)?;
        let source = Arc::clone(&self.source);
        if let Err(e) = source.persist_status(user_id, status).await {
            tracing::warn!(user_id, %status, error = %e, "Status change rejected");
            return Err(StoreError::PersistFailed {
                user_id: user_id.to_string(),
                status,
                source: e,
            });
        }
        self.apply_status(user_id, status)
    }

    /// Set a user's status in memory (already persisted)
    pub fn apply_status(&mut self, user_id: &str, status: UserStatus) -> Result<(), StoreError> {
        let user = self
            .records
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;
        user.status = status;
        tracing::info!(user_id, %status, "Status updated");
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    pub(crate) fn user(id: &str, name: &str, status: UserStatus) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            full_name: name.to_string(),
            email: format!("{}@lendsqr.com", name.to_lowercase().replace(' ', ".")),
            phone_number: "08012345678".to_string(),
            organization: "Lendsqr".to_string(),
            date_joined: Utc.with_ymd_and_hms(2020, 5, 15, 10, 0, 0).unwrap(),
            status,
        }
    }

    /// Source whose next responses are queued by the test
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        pub fetches: Mutex<Vec<Result<Vec<UserRecord>, FetchError>>>,
        pub persist_error: Mutex<Option<FetchError>>,
        pub persisted: Mutex<Vec<(String, UserStatus)>>,
    }

    impl ScriptedSource {
        pub(crate) fn push_fetch(&self, result: Result<Vec<UserRecord>, FetchError>) {
            self.fetches.lock().unwrap().push(result);
        }
    }

    #[async_trait]
    impl UserSource for ScriptedSource {
        async fn fetch_all(&self) -> Result<Vec<UserRecord>, FetchError> {
            let mut fetches = self.fetches.lock().unwrap();
            if fetches.is_empty() {
                Err(FetchError::Other("no scripted response".to_string()))
            } else {
                fetches.remove(0)
            }
        }

        async fn persist_status(&self, user_id: &str, status: UserStatus) -> Result<(), FetchError> {
            if let Some(e) = self.persist_error.lock().unwrap().clone() {
                return Err(e);
            }
            self.persisted
                .lock()
                .unwrap()
                .push((user_id.to_string(), status));
            Ok(())
        }
    }

    fn five_users() -> Vec<UserRecord> {
        (1..=5)
            .map(|i| user(&i.to_string(), &format!("User {}", i), UserStatus::Active))
            .collect()
    }

    #[test]
    fn test_new_store_is_empty_and_loading() {
        let store = UserDataStore::new(Arc::new(ScriptedSource::default()));
        let snap = store.snapshot();
        assert!(snap.records.is_empty());
        assert!(snap.loading);
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn test_load_success_replaces_records() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Ok(five_users()));
        let mut store = UserDataStore::new(source);

        store.load().await;

        let snap = store.snapshot();
        assert_eq!(snap.records.len(), 5);
        assert!(!snap.loading);
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_records() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Ok(five_users()));
        source.push_fetch(Err(FetchError::Timeout));
        let mut store = UserDataStore::new(source);

        store.load().await;
        store.load().await;

        let snap = store.snapshot();
        assert_eq!(snap.records.len(), 5);
        assert_eq!(snap.error, Some(&FetchError::Timeout));
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn test_successful_load_clears_error() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Err(FetchError::Status { status: 502 }));
        source.push_fetch(Ok(five_users()));
        let mut store = UserDataStore::new(source);

        store.load().await;
        assert!(store.error().is_some());
        assert!(store.records().is_empty());

        store.load().await;
        assert!(store.error().is_none());
        assert_eq!(store.records().len(), 5);
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut store = UserDataStore::new(Arc::new(ScriptedSource::default()));
        let first = store.begin_load();
        let second = store.begin_load();

        assert!(store.finish_load(second, Ok(five_users())));
        assert!(!store.is_loading());
        assert!(!store.finish_load(first, Ok(Vec::new())));
        assert_eq!(store.records().len(), 5);
    }

    #[test]
    fn test_loading_ends_with_first_resolution() {
        let mut store = UserDataStore::new(Arc::new(ScriptedSource::default()));
        let first = store.begin_load();
        assert!(store.is_loading());
        assert!(store.finish_load(first, Ok(vec![user("1", "Ada Obi", UserStatus::Active)])));
        assert!(!store.is_loading());
        assert!(!store.is_refreshing());

        let refresh = store.begin_load();
        assert!(!store.is_loading());
        assert!(store.is_refreshing());

        assert!(store.finish_load(refresh, Err(FetchError::Timeout)));
        assert!(!store.is_loading());
        assert!(!store.is_refreshing());
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_first_failure_also_ends_loading() {
        let mut store = UserDataStore::new(Arc::new(ScriptedSource::default()));
        let first = store.begin_load();
        let second = store.begin_load();

        assert!(store.finish_load(first, Err(FetchError::Timeout)));
        assert!(!store.is_loading());
        assert!(store.is_refreshing());
        assert!(store.finish_load(second, Ok(five_users())));
        assert!(!store.is_refreshing());
        assert_eq!(store.records().len(), 5);
    }

    #[tokio::test]
    async fn test_update_status_persists_then_applies() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Ok(five_users()));
        let mut store = UserDataStore::new(source.clone());
        store.load().await;

        store.update_status("3", UserStatus::Blacklisted).await.unwrap();

        assert_eq!(store.find("3").unwrap().status, UserStatus::Blacklisted);
        assert_eq!(
            source.persisted.lock().unwrap().as_slice(),
            &[("3".to_string(), UserStatus::Blacklisted)]
        );
    }

    #[tokio::test]
    async fn test_update_status_unknown_id() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Ok(five_users()));
        let mut store = UserDataStore::new(source.clone());
        store.load().await;
        let before = store.records().to_vec();

        let err = store.update_status("42", UserStatus::Inactive).await.unwrap_err();

        assert_eq!(err, StoreError::NotFound("42".to_string()));
        assert_eq!(store.records(), before.as_slice());
        assert!(source.persisted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_persist_leaves_record_unchanged() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Ok(five_users()));
        *source.persist_error.lock().unwrap() = Some(FetchError::Status { status: 500 });
        let mut store = UserDataStore::new(source);
        store.load().await;

        let err = store.update_status("1", UserStatus::Inactive).await.unwrap_err();

        assert!(matches!(err, StoreError::PersistFailed { .. }));
        assert_eq!(store.find("1").unwrap().status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_subscribers_see_every_change() {
        let source = Arc::new(ScriptedSource::default());
        source.push_fetch(Ok(five_users()));
        let mut store = UserDataStore::new(source);
        let mut changes = store.subscribe();

        store.load().await;
        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();

        store.apply_status("2", UserStatus::Inactive).unwrap();
        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();

        assert!(store.apply_status("nope", UserStatus::Inactive).is_err());
        assert!(!changes.has_changed().unwrap());
    }

    #[test]
    fn test_summary_counts_statuses() {
        let mut store = UserDataStore::new(Arc::new(ScriptedSource::default()));
        let generation = store.begin_load();
        store.finish_load(
            generation,
            Ok(vec![
                user("1", "A", UserStatus::Active),
                user("2", "B", UserStatus::Active),
                user("3", "C", UserStatus::Inactive),
                user("4", "D", UserStatus::Blacklisted),
                user("5", "E", UserStatus::Unknown),
            ]),
        );

        assert_eq!(
            store.summary(),
            UserSummary {
                total: 5,
                active: 2,
                inactive: 1,
                blacklisted: 1,
            }
        );
    }
}
