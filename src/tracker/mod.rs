//! Client-side state for the applications table.
//!
//! `Tracker` owns the row store, the edit buffer, the column registry and the small bits
//! of UI status around them. It lives on the UI thread; store calls and timers run on the
//! tokio runtime and come back as [`TaskResult`]s that [`Tracker::poll`] applies in order.

mod edit_buffer;
mod status;

#[cfg(test)]
mod tracker_tests;

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{
    info,
    warn,
};

pub use edit_buffer::EditBuffer;
pub use status::{
    NotesEditor,
    SaveStatus,
    Toast,
};

use crate::{
    core::{
        columns::{
            ColumnDefinition,
            ColumnRegistry,
        },
        config::Timings,
        errors::{
            JobTrackError,
            Result,
        },
        models::{
            Application,
            ApplicationDraft,
            FieldEdit,
        },
        stats::StatusStats,
        tasks::{
            SaveScheduler,
            TaskManager,
            TaskResult,
        },
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
    store::ApplicationStore,
};

pub const COLUMNS_FILE: &str = "columns.json";

pub fn load_saved_columns() -> ColumnRegistry {
    ColumnRegistry::from_definitions(load_json_or_default::<Vec<ColumnDefinition>>(COLUMNS_FILE))
}

pub struct Tracker {
    timings: Timings,

    // Row store and unsaved edits
    rows: Vec<Application>,
    edits: EditBuffer,
    loaded: bool,

    // Columns
    columns: ColumnRegistry,
    persist_columns: bool,

    // UI state
    draft: Option<ApplicationDraft>,
    notes: Option<NotesEditor>,
    save_status: SaveStatus,
    saved_generation: u64,
    toast: Option<Toast>,
    toast_generation: u64,

    in_flight: usize,
    tasks: TaskManager,
    scheduler: SaveScheduler,
}

impl Tracker {
    pub fn new(runtime: Handle, store: Arc<dyn ApplicationStore>, timings: Timings) -> Self {
        Self {
            timings,
            rows: Vec::new(),
            edits: EditBuffer::new(),
            loaded: false,
            columns: ColumnRegistry::new(),
            persist_columns: false,
            draft: None,
            notes: None,
            save_status: SaveStatus::Idle,
            saved_generation: 0,
            toast: None,
            toast_generation: 0,
            in_flight: 0,
            tasks: TaskManager::new(runtime, store),
            scheduler: SaveScheduler::new(timings.save_debounce()),
        }
    }

    pub fn with_columns(mut self, columns: ColumnRegistry, persist_columns: bool) -> Self {
        self.columns = columns;
        self.persist_columns = persist_columns;
        self
    }

    // ---- Row store ----

    pub fn load(&mut self) {
        self.in_flight += 1;
        self.tasks.load_applications();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn rows(&self) -> &[Application] {
        &self.rows
    }

    pub fn display_rows(&self) -> Vec<Application> {
        self.rows.iter().map(|row| self.edits.view(row)).collect()
    }

    pub fn display_row(&self, id: &str) -> Option<Application> {
        self.find_row(id).map(|row| self.edits.view(row))
    }

    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.edits
    }

    fn find_row(&self, id: &str) -> Option<&Application> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Shows the edit right away and (re)arms the row's save timer.
    pub fn record_edit(&mut self, id: &str, edit: FieldEdit) -> bool {
        let Some(stored) = self.rows.iter().find(|row| row.id == id) else {
            warn!(id, "edit for unknown row ignored");
            return false;
        };

        let patch = self.edits.record(id, edit, Some(stored));
        self.save_status = SaveStatus::Saving;
        self.scheduler.schedule(&self.tasks, id.to_string(), patch);
        true
    }

    pub fn has_armed_save(&self, id: &str) -> bool {
        self.scheduler.is_pending(id)
    }

    // ---- New row ----

    pub fn begin_new_row(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(ApplicationDraft::default());
        }
    }

    pub fn draft(&self) -> Option<&ApplicationDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut ApplicationDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_new_row(&mut self) {
        self.draft = None;
    }

    /// Validates and persists the draft. The table is reloaded once the store confirms.
    pub fn insert(&mut self) -> Result<()> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(JobTrackError::Custom("no new row to insert".to_string()));
        };

        if let Err(e) = draft.validate() {
            self.show_toast(e.to_string());
            return Err(e);
        }

        let draft = draft.clone();
        self.in_flight += 1;
        self.tasks.create_application(draft);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) {
        if id.is_empty() {
            return;
        }
        self.in_flight += 1;
        self.tasks.delete_application(id.to_string());
    }

    // ---- Notes modal ----

    pub fn open_notes(&mut self, id: &str) -> bool {
        match self.display_row(id) {
            Some(row) => {
                self.notes = Some(NotesEditor::for_row(&row));
                true
            }
            None => false,
        }
    }

    pub fn notes(&self) -> Option<&NotesEditor> {
        self.notes.as_ref()
    }

    pub fn notes_mut(&mut self) -> Option<&mut NotesEditor> {
        self.notes.as_mut()
    }

    pub fn set_notes_text(&mut self, text: impl Into<String>) {
        if let Some(notes) = &mut self.notes {
            notes.text = text.into();
            notes.editing = true;
        }
    }

    /// Saves the modal text immediately (no debounce), then reloads.
    pub fn save_notes(&mut self) {
        if let Some(notes) = &self.notes {
            self.in_flight += 1;
            self.tasks.save_notes(notes.id.clone(), notes.text.clone());
        }
    }

    pub fn close_notes(&mut self) {
        self.notes = None;
    }

    // ---- Columns ----

    pub fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnRegistry {
        &mut self.columns
    }

    pub fn persists_columns(&self) -> bool {
        self.persist_columns
    }

    pub fn save_columns(&self) -> Result<()> {
        info!(columns = ?self.columns.custom_columns(), "saving columns");
        if self.persist_columns {
            save_json(&self.columns.custom_columns(), COLUMNS_FILE)?;
        }
        Ok(())
    }

    // ---- Derived views and status ----

    pub fn stats(&self) -> StatusStats {
        StatusStats::from_rows(&self.rows)
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_generation += 1;
        self.toast = Some(Toast { message: message.into(), generation: self.toast_generation });
        self.tasks.send_after(self.timings.toast(), TaskResult::ToastExpired(self.toast_generation));
    }

    /// True while anything may still change without user input.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
            || self.scheduler.has_pending()
            || self.toast.is_some()
            || self.save_status == SaveStatus::Saved
    }

    // ---- Task results ----

    pub fn poll(&mut self) -> usize {
        let results = self.tasks.poll_results();
        let count = results.len();
        for result in results {
            self.apply(result);
        }
        count
    }

    /// Waits for one task result and applies it, returning its task type.
    pub async fn process_next(&mut self) -> Option<&'static str> {
        let result = self.tasks.next_result().await?;
        let task_type = result.task_type();
        self.apply(result);
        Some(task_type)
    }

    fn finish_call(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn apply(&mut self, result: TaskResult) {
        match result {
            TaskResult::ApplicationsLoaded(result) => {
                self.finish_call();
                self.loaded = true;
                // A failed or unauthenticated load is treated as "no data".
                self.rows = result.unwrap_or_default();
            }
            TaskResult::ApplicationCreated(result) => {
                self.finish_call();
                if result.is_ok() {
                    self.draft = None;
                    self.load();
                }
            }
            TaskResult::ApplicationDeleted { id, result } => {
                self.finish_call();
                if result.is_ok() {
                    self.scheduler.cancel(&id);
                    self.edits.remove(&id);
                    self.load();
                }
            }
            TaskResult::RowSaved { id, generation, patch, result } => {
                self.scheduler.complete(&id, generation);
                match result {
                    Ok(_) => {
                        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
                            patch.apply_to(row);
                        }
                        // A newer timer carries edits made while this save was out.
                        if self.scheduler.is_pending(&id) {
                            self.edits.clear_saved(&id, &patch);
                        } else {
                            self.edits.remove(&id);
                        }

                        if self.scheduler.has_pending() {
                            self.save_status = SaveStatus::Saving;
                        } else {
                            self.save_status = SaveStatus::Saved;
                            self.saved_generation += 1;
                            self.tasks.send_after(
                                self.timings.saved_indicator(),
                                TaskResult::SavedIndicatorExpired(self.saved_generation),
                            );
                        }
                    }
                    // Logged by the task; the edit stays in the buffer.
                    Err(_) if self.scheduler.has_pending() => {
                        self.save_status = SaveStatus::Saving;
                    }
                    Err(_) => self.save_status = SaveStatus::Idle,
                }
            }
            TaskResult::NotesSaved { id, result } => {
                self.finish_call();
                if result.is_ok() {
                    if self.notes.as_ref().is_some_and(|notes| notes.id == id) {
                        self.notes = None;
                    }
                    self.load();
                }
            }
            TaskResult::ToastExpired(generation) => {
                if self.toast.as_ref().is_some_and(|toast| toast.generation == generation) {
                    self.toast = None;
                }
            }
            TaskResult::SavedIndicatorExpired(generation) => {
                if self.save_status == SaveStatus::Saved && self.saved_generation == generation {
                    self.save_status = SaveStatus::Idle;
                }
            }
        }
    }
}
