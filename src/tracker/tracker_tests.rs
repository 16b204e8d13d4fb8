use std::{
    sync::{
        atomic::{
            AtomicBool,
            AtomicUsize,
            Ordering,
        },
        Arc,
        Mutex,
    },
    time::Duration,
};

use chrono::NaiveDate;
use futures::future::{
    self,
    BoxFuture,
    FutureExt,
};
use tokio::{
    runtime::Handle,
    time::{
        advance,
        Instant,
    },
};

use super::*;
use crate::{
    core::models::{
        ApplicationPatch,
        ApplicationStatus,
    },
    store::MemoryStore,
};

/// Memory store that records every call. Updates can be told to fail or to take a while.
struct RecordingStore {
    inner: MemoryStore,
    creates: AtomicUsize,
    updates: Mutex<Vec<(String, ApplicationPatch)>>,
    fail_updates: AtomicBool,
    update_latency: Mutex<Duration>,
}

impl RecordingStore {
    fn new(inner: MemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            creates: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
            fail_updates: AtomicBool::new(false),
            update_latency: Mutex::new(Duration::ZERO),
        })
    }

    fn slow_updates(self: Arc<Self>, latency: Duration) -> Arc<Self> {
        *self.update_latency.lock().unwrap() = latency;
        self
    }

    async fn stored_row(&self, id: &str) -> Application {
        let rows = self.inner.load_applications().await.unwrap();
        rows.into_iter().find(|row| row.id == id).unwrap()
    }

    fn updates(&self) -> Vec<(String, ApplicationPatch)> {
        self.updates.lock().unwrap().clone()
    }
}

impl ApplicationStore for RecordingStore {
    fn load_applications(&self) -> BoxFuture<'_, Result<Vec<Application>>> {
        self.inner.load_applications()
    }

    fn create_application<'a>(
        &'a self,
        draft: &'a ApplicationDraft,
    ) -> BoxFuture<'a, Result<Application>> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create_application(draft)
    }

    fn update_application<'a>(
        &'a self,
        id: &'a str,
        patch: &'a ApplicationPatch,
    ) -> BoxFuture<'a, Result<Application>> {
        self.updates.lock().unwrap().push((id.to_string(), patch.clone()));
        if self.fail_updates.load(Ordering::SeqCst) {
            let error = JobTrackError::Backend { status: 500, message: "boom".to_string() };
            return future::ready(Err(error)).boxed();
        }
        let latency = *self.update_latency.lock().unwrap();
        if latency.is_zero() {
            return self.inner.update_application(id, patch);
        }
        async move {
            tokio::time::sleep(latency).await;
            self.inner.update_application(id, patch).await
        }
        .boxed()
    }

    fn delete_application<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        self.inner.delete_application(id)
    }
}

fn application(id: &str, company: &str, date: (i32, u32, u32)) -> Application {
    Application {
        id: id.to_string(),
        company: company.to_string(),
        role: "Engineer".to_string(),
        status: ApplicationStatus::Applied,
        applied_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        notes: String::new(),
        custom_fields: Default::default(),
        user_id: Some("me".to_string()),
    }
}

fn seeded_store() -> Arc<RecordingStore> {
    RecordingStore::new(MemoryStore::with_rows(
        "me",
        vec![application("r1", "Acme", (2024, 1, 10)), application("r2", "Globex", (2024, 2, 1))],
    ))
}

fn tracker(store: Arc<RecordingStore>) -> Tracker {
    Tracker::new(Handle::current(), store, Timings::default())
}

async fn loaded_tracker(store: Arc<RecordingStore>) -> Tracker {
    let mut tracker = tracker(store);
    tracker.load();
    assert_eq!(tracker.process_next().await, Some("applications_loaded"));
    tracker
}

#[tokio::test(start_paused = true)]
async fn test_load_orders_rows_newest_first() {
    let tracker = loaded_tracker(seeded_store()).await;

    assert!(tracker.is_loaded());
    let ids: Vec<&str> = tracker.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r1"]);
    assert!(!tracker.is_busy());
}

#[tokio::test(start_paused = true)]
async fn test_failed_load_means_no_data() {
    let store = RecordingStore::new(MemoryStore::signed_out());
    let tracker = loaded_tracker(store).await;

    assert!(tracker.is_loaded());
    assert!(tracker.rows().is_empty());
    assert_eq!(tracker.stats().total(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_insert_reloads_with_new_row() {
    let store = RecordingStore::new(MemoryStore::new("me"));
    let mut tracker = loaded_tracker(store.clone()).await;

    tracker.begin_new_row();
    {
        let draft = tracker.draft_mut().unwrap();
        draft.company = "Initech".to_string();
        draft.role = "TPS Analyst".to_string();
        draft.status = ApplicationStatus::Interview;
        draft.applied_at = NaiveDate::from_ymd_opt(2024, 5, 4);
        draft.notes = "Bring the stapler".to_string();
    }
    tracker.insert().unwrap();

    // No optimistic insert: the row only appears after the reload.
    assert!(tracker.rows().is_empty());
    assert_eq!(tracker.process_next().await, Some("application_created"));
    assert_eq!(tracker.process_next().await, Some("applications_loaded"));

    assert_eq!(store.creates.load(Ordering::SeqCst), 1);
    assert_eq!(tracker.rows().len(), 1);
    let row = &tracker.rows()[0];
    assert!(!row.id.is_empty());
    assert_eq!(row.company, "Initech");
    assert_eq!(row.role, "TPS Analyst");
    assert_eq!(row.status, ApplicationStatus::Interview);
    assert_eq!(row.applied_at, NaiveDate::from_ymd_opt(2024, 5, 4));
    assert_eq!(row.notes, "Bring the stapler");
    assert!(tracker.draft().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_insert_requires_company_and_role() {
    let store = RecordingStore::new(MemoryStore::new("me"));
    let mut tracker = tracker(store.clone());

    tracker.begin_new_row();
    tracker.draft_mut().unwrap().role = "Engineer".to_string();

    let started = Instant::now();
    let err = tracker.insert().unwrap_err();
    assert!(err.is_validation());
    assert!(tracker.toast().is_some());
    assert!(tracker.draft().is_some());

    assert_eq!(tracker.process_next().await, Some("toast_expired"));
    assert!(tracker.toast().is_none());
    assert!(started.elapsed() >= Duration::from_millis(3000));
    assert_eq!(store.creates.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_edits_within_window_coalesce_into_one_save() {
    let store = seeded_store();
    let mut tracker = loaded_tracker(store.clone()).await;

    assert!(tracker.record_edit("r1", FieldEdit::Company("A".into())));
    advance(Duration::from_millis(500)).await;
    assert!(tracker.record_edit("r1", FieldEdit::Company("AB".into())));
    advance(Duration::from_millis(500)).await;
    assert!(tracker.record_edit("r1", FieldEdit::Company("ABC".into())));
    let last_edit = Instant::now();

    // Optimistic: visible before anything is saved
    assert_eq!(tracker.display_row("r1").unwrap().company, "ABC");
    assert_eq!(tracker.rows().iter().find(|r| r.id == "r1").unwrap().company, "Acme");
    assert_eq!(tracker.save_status(), SaveStatus::Saving);
    assert!(tracker.has_armed_save("r1"));

    assert_eq!(tracker.process_next().await, Some("row_saved"));
    assert!(last_edit.elapsed() >= Duration::from_millis(1500));

    // Quiet period: nothing else reaches the store
    tokio::time::sleep(Duration::from_secs(10)).await;
    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "r1");
    assert_eq!(updates[0].1.company.as_deref(), Some("ABC"));
}

#[tokio::test(start_paused = true)]
async fn test_successful_save_clears_buffer_and_updates_rows() {
    let store = seeded_store();
    let mut tracker = loaded_tracker(store.clone()).await;

    tracker.record_edit("r1", FieldEdit::Status(ApplicationStatus::Offer));
    tracker.record_edit("r1", FieldEdit::Notes("Great call".into()));

    assert_eq!(tracker.process_next().await, Some("row_saved"));
    assert!(!tracker.edit_buffer().contains("r1"));
    assert!(!tracker.has_armed_save("r1"));

    let row = tracker.rows().iter().find(|r| r.id == "r1").unwrap();
    assert_eq!(row.status, ApplicationStatus::Offer);
    assert_eq!(row.notes, "Great call");
    assert_eq!(tracker.stats().count(ApplicationStatus::Offer), 1);

    // Both fields went out in one accumulated patch
    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1.status, Some(ApplicationStatus::Offer));
    assert_eq!(updates[0].1.notes.as_deref(), Some("Great call"));

    assert_eq!(tracker.save_status(), SaveStatus::Saved);
    assert_eq!(tracker.process_next().await, Some("saved_indicator_expired"));
    assert_eq!(tracker.save_status(), SaveStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_failed_save_keeps_stale_edit() {
    let store = seeded_store();
    store.fail_updates.store(true, Ordering::SeqCst);
    let mut tracker = loaded_tracker(store.clone()).await;

    tracker.record_edit("r2", FieldEdit::Role("Staff Engineer".into()));
    assert_eq!(tracker.process_next().await, Some("row_saved"));

    assert!(tracker.edit_buffer().contains("r2"));
    assert_eq!(tracker.display_row("r2").unwrap().role, "Staff Engineer");
    assert_eq!(tracker.rows().iter().find(|r| r.id == "r2").unwrap().role, "Engineer");
    assert_eq!(tracker.save_status(), SaveStatus::Idle);

    // No retry
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(store.updates().len(), 1);
    assert_eq!(tracker.poll(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rows_have_independent_timers() {
    let store = seeded_store();
    let mut tracker = loaded_tracker(store.clone()).await;

    tracker.record_edit("r1", FieldEdit::Company("Acme Ltd".into()));
    tracker.record_edit("r2", FieldEdit::Company("Globex Inc".into()));

    assert_eq!(tracker.process_next().await, Some("row_saved"));
    assert_eq!(tracker.process_next().await, Some("row_saved"));

    let mut saved: Vec<String> = store.updates().into_iter().map(|(id, _)| id).collect();
    saved.sort();
    assert_eq!(saved, vec!["r1".to_string(), "r2".to_string()]);
    assert!(tracker.edit_buffer().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_edit_for_unknown_row_is_ignored() {
    let store = seeded_store();
    let mut tracker = loaded_tracker(store).await;

    assert!(!tracker.record_edit("nope", FieldEdit::Company("x".into())));
    assert_eq!(tracker.save_status(), SaveStatus::Idle);
    assert!(tracker.edit_buffer().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deleting_column_keeps_stored_custom_value() {
    let store = seeded_store();
    let mut tracker = loaded_tracker(store).await;

    let column_id = tracker.columns_mut().add_column("Recruiter").unwrap().id.clone();
    tracker.record_edit(
        "r1",
        FieldEdit::Custom { column_id: column_id.clone(), value: "Dana".into() },
    );
    assert_eq!(tracker.process_next().await, Some("row_saved"));

    assert!(tracker.columns_mut().delete_column(&column_id));
    assert_eq!(tracker.columns().columns().len(), 5);

    let row = tracker.rows().iter().find(|r| r.id == "r1").unwrap();
    assert_eq!(row.custom_value(&column_id), "Dana");
}

#[tokio::test(start_paused = true)]
async fn test_remove_reloads_rows() {
    let store = seeded_store();
    let mut tracker = loaded_tracker(store.clone()).await;

    tracker.remove("r2");
    assert_eq!(tracker.rows().len(), 2);
    assert_eq!(tracker.process_next().await, Some("application_deleted"));
    assert_eq!(tracker.process_next().await, Some("applications_loaded"));

    let ids: Vec<&str> = tracker.rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1"]);
    assert_eq!(store.inner.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_notes_save_reloads_and_closes_modal() {
    let store = seeded_store();
    let mut tracker = loaded_tracker(store.clone()).await;

    assert!(tracker.open_notes("r1"));
    {
        let notes = tracker.notes_mut().unwrap();
        assert_eq!(notes.company, "Acme");
        notes.editing = true;
        notes.text = "Second round on Friday".to_string();
    }
    tracker.save_notes();

    assert_eq!(tracker.process_next().await, Some("notes_saved"));
    assert!(tracker.notes().is_none());
    assert_eq!(tracker.process_next().await, Some("applications_loaded"));

    let row = tracker.rows().iter().find(|r| r.id == "r1").unwrap();
    assert_eq!(row.notes, "Second round on Friday");
    // Sent straight away, not through the debounce timer
    assert!(store.updates()[0].1.notes.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_failed_notes_save_keeps_modal_open() {
    let store = seeded_store();
    store.fail_updates.store(true, Ordering::SeqCst);
    let mut tracker = loaded_tracker(store).await;

    tracker.open_notes("r2");
    tracker.set_notes_text("lost?");
    tracker.save_notes();

    assert_eq!(tracker.process_next().await, Some("notes_saved"));
    assert_eq!(tracker.notes().map(|n| n.text.as_str()), Some("lost?"));
}

#[tokio::test(start_paused = true)]
async fn test_edit_during_in_flight_save_is_persisted() {
    let store = seeded_store().slow_updates(Duration::from_secs(1));
    let mut tracker = loaded_tracker(store.clone()).await;

    // Timer fires at 1.5s, the update is out until 2.5s
    tracker.record_edit("r1", FieldEdit::Company("NewCo".into()));
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(store.updates().len(), 1);
    tracker.record_edit("r1", FieldEdit::Role("Staff".into()));

    assert_eq!(tracker.process_next().await, Some("row_saved"));
    let row = tracker.display_row("r1").unwrap();
    assert_eq!(row.company, "NewCo");
    assert_eq!(row.role, "Staff");
    let pending = tracker.edit_buffer().get("r1").unwrap();
    assert_eq!(pending.company, None);
    assert_eq!(pending.role.as_deref(), Some("Staff"));
    assert!(tracker.has_armed_save("r1"));
    assert_eq!(tracker.save_status(), SaveStatus::Saving);

    // Re-arms before the role timer fires; the role still goes out with the status
    tokio::time::sleep(Duration::from_millis(200)).await;
    tracker.record_edit("r1", FieldEdit::Status(ApplicationStatus::Offer));
    assert_eq!(tracker.process_next().await, Some("row_saved"));

    let updates = store.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[1].1.role.as_deref(), Some("Staff"));
    assert_eq!(updates[1].1.status, Some(ApplicationStatus::Offer));

    let stored = store.stored_row("r1").await;
    assert_eq!(stored.company, "NewCo");
    assert_eq!(stored.role, "Staff");
    assert_eq!(stored.status, ApplicationStatus::Offer);
    assert!(tracker.edit_buffer().is_empty());
    assert_eq!(tracker.save_status(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_saves_for_one_row_both_reach_store() {
    let store = seeded_store().slow_updates(Duration::from_secs(3));
    let mut tracker = loaded_tracker(store.clone()).await;

    // First update is out from 1.5s to 4.5s, the second from 3.1s to 6.1s
    tracker.record_edit("r2", FieldEdit::Company("G".into()));
    tokio::time::sleep(Duration::from_millis(1600)).await;
    tracker.record_edit("r2", FieldEdit::Company("GX".into()));
    tokio::time::sleep(Duration::from_millis(1600)).await;

    assert_eq!(tracker.poll(), 0);
    let companies: Vec<Option<String>> =
        store.updates().into_iter().map(|(_, patch)| patch.company).collect();
    assert_eq!(companies, vec![Some("G".to_string()), Some("GX".to_string())]);

    // The older save lands first and does not wipe the newer value
    assert_eq!(tracker.process_next().await, Some("row_saved"));
    assert_eq!(tracker.rows().iter().find(|r| r.id == "r2").unwrap().company, "G");
    assert_eq!(tracker.display_row("r2").unwrap().company, "GX");
    assert_eq!(tracker.save_status(), SaveStatus::Saving);

    assert_eq!(tracker.process_next().await, Some("row_saved"));
    assert_eq!(tracker.rows().iter().find(|r| r.id == "r2").unwrap().company, "GX");
    assert_eq!(store.stored_row("r2").await.company, "GX");
    assert!(tracker.edit_buffer().is_empty());
    assert_eq!(tracker.save_status(), SaveStatus::Saved);
}
