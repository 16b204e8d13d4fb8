use std::sync::Mutex;

use futures::future::{
    self,
    BoxFuture,
    FutureExt,
};
use uuid::Uuid;

use super::ApplicationStore;
use crate::core::{
    errors::{
        JobTrackError,
        Result,
    },
    models::{
        Application,
        ApplicationDraft,
        ApplicationPatch,
    },
};

/// In-process store for a single user. Used when no backend is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    user_id: Option<String>,
    rows: Mutex<Vec<Application>>,
}

impl MemoryStore {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: Some(user_id.into()), rows: Mutex::new(Vec::new()) }
    }

    /// A store with no signed-in user: every call fails with `NotAuthenticated`.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn with_rows(user_id: impl Into<String>, rows: Vec<Application>) -> Self {
        let store = Self::new(user_id);
        if let Ok(mut guard) = store.rows.lock() {
            *guard = rows;
        }
        store
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn user(&self) -> Result<&str> {
        self.user_id.as_deref().ok_or(JobTrackError::NotAuthenticated)
    }

    fn with_rows_mut<T>(&self, f: impl FnOnce(&mut Vec<Application>) -> Result<T>) -> Result<T> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| JobTrackError::Custom("memory store lock poisoned".to_string()))?;
        f(&mut rows)
    }

    fn load(&self) -> Result<Vec<Application>> {
        let user = self.user()?;
        self.with_rows_mut(|rows| {
            let mut owned: Vec<Application> = rows
                .iter()
                .filter(|row| row.user_id.as_deref() == Some(user))
                .cloned()
                .collect();
            // Stable: equal dates keep insertion order. Empty dates first, as in SQL DESC.
            owned.sort_by(|a, b| match (a.applied_at, b.applied_at) {
                (None, None) => std::cmp::Ordering::Equal,
                (None, Some(_)) => std::cmp::Ordering::Less,
                (Some(_), None) => std::cmp::Ordering::Greater,
                (Some(left), Some(right)) => right.cmp(&left),
            });
            Ok(owned)
        })
    }

    fn create(&self, draft: &ApplicationDraft) -> Result<Application> {
        let user = self.user()?.to_string();
        let application = Application {
            id: Uuid::new_v4().to_string(),
            company: draft.company.clone(),
            role: draft.role.clone(),
            status: draft.status,
            applied_at: draft.applied_at,
            notes: draft.notes.clone(),
            custom_fields: draft.custom_fields.clone(),
            user_id: Some(user),
        };

        self.with_rows_mut(|rows| {
            rows.push(application.clone());
            Ok(application)
        })
    }

    fn update(&self, id: &str, patch: &ApplicationPatch) -> Result<Application> {
        let user = self.user()?;
        self.with_rows_mut(|rows| {
            let row = rows
                .iter_mut()
                .find(|row| row.id == id && row.user_id.as_deref() == Some(user))
                .ok_or_else(|| JobTrackError::NotFound(id.to_string()))?;
            patch.apply_to(row);
            Ok(row.clone())
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        let user = self.user()?;
        self.with_rows_mut(|rows| {
            rows.retain(|row| !(row.id == id && row.user_id.as_deref() == Some(user)));
            Ok(())
        })
    }
}

impl ApplicationStore for MemoryStore {
    fn load_applications(&self) -> BoxFuture<'_, Result<Vec<Application>>> {
        future::ready(self.load()).boxed()
    }

    fn create_application<'a>(
        &'a self,
        draft: &'a ApplicationDraft,
    ) -> BoxFuture<'a, Result<Application>> {
        future::ready(self.create(draft)).boxed()
    }

    fn update_application<'a>(
        &'a self,
        id: &'a str,
        patch: &'a ApplicationPatch,
    ) -> BoxFuture<'a, Result<Application>> {
        future::ready(self.update(id, patch)).boxed()
    }

    fn delete_application<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        future::ready(self.delete(id)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn draft(company: &str, date: Option<(i32, u32, u32)>) -> ApplicationDraft {
        let mut draft = ApplicationDraft::new(company, "Engineer");
        draft.applied_at = date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        draft
    }

    #[tokio::test]
    async fn test_load_orders_by_date_descending() {
        let store = MemoryStore::new("me");
        store.create_application(&draft("Old", Some((2024, 1, 1)))).await.unwrap();
        store.create_application(&draft("New", Some((2024, 6, 1)))).await.unwrap();
        store.create_application(&draft("Tie", Some((2024, 6, 1)))).await.unwrap();
        store.create_application(&draft("Undated", None)).await.unwrap();

        let rows = store.load_applications().await.unwrap();
        let companies: Vec<&str> = rows.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(companies, vec!["Undated", "New", "Tie", "Old"]);
        assert!(rows.iter().all(|r| !r.id.is_empty()));
    }

    #[tokio::test]
    async fn test_rows_are_scoped_to_user() {
        let foreign = Application {
            id: "x".to_string(),
            company: "Theirs".to_string(),
            role: "Role".to_string(),
            status: Default::default(),
            applied_at: None,
            notes: String::new(),
            custom_fields: Default::default(),
            user_id: Some("someone-else".to_string()),
        };
        let store = MemoryStore::with_rows("me", vec![foreign]);

        assert!(store.load_applications().await.unwrap().is_empty());
        let err = store.update_application("x", &ApplicationPatch::notes("hi")).await;
        assert!(matches!(err, Err(JobTrackError::NotFound(_))));

        store.delete_application("x").await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_store_rejects_calls() {
        let store = MemoryStore::signed_out();
        assert!(matches!(store.load_applications().await, Err(JobTrackError::NotAuthenticated)));
        let created = store.create_application(&draft("Acme", None)).await;
        assert!(matches!(created, Err(JobTrackError::NotAuthenticated)));
    }
}
