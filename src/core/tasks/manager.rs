use std::{
    sync::Arc,
    time::Duration,
};

use tokio::{
    runtime::Handle,
    sync::mpsc::{
        self,
        UnboundedReceiver,
        UnboundedSender,
    },
    task::AbortHandle,
    time::sleep,
};
use tracing::{
    error,
    info,
};

use super::TaskResult;
use crate::{
    core::models::{
        ApplicationDraft,
        ApplicationPatch,
        RowId,
    },
    store::ApplicationStore,
};

/// Runs store calls and timers on the runtime and hands results back to the UI thread.
pub struct TaskManager {
    runtime: Handle,
    store: Arc<dyn ApplicationStore>,
    receiver: UnboundedReceiver<TaskResult>,
    sender: UnboundedSender<TaskResult>,
}

impl TaskManager {
    pub fn new(runtime: Handle, store: Arc<dyn ApplicationStore>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self { runtime, store, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Waits for the next result. The manager keeps a sender, so this only returns
    /// once some task reports back.
    pub async fn next_result(&mut self) -> Option<TaskResult> {
        self.receiver.recv().await
    }

    fn task_context(&self) -> (UnboundedSender<TaskResult>, Arc<dyn ApplicationStore>) {
        (self.sender.clone(), self.store.clone())
    }

    pub fn load_applications(&self) {
        let (sender, store) = self.task_context();

        self.runtime.spawn(async move {
            let result = store.load_applications().await.map_err(|e| e.to_string());
            match &result {
                Ok(rows) => info!(count = rows.len(), "applications loaded"),
                Err(e) => error!("Error loading applications: {}", e),
            }
            let _ = sender.send(TaskResult::ApplicationsLoaded(result));
        });
    }

    pub fn create_application(&self, draft: ApplicationDraft) {
        let (sender, store) = self.task_context();

        self.runtime.spawn(async move {
            let result = store.create_application(&draft).await.map_err(|e| e.to_string());
            match &result {
                Ok(application) => info!(id = %application.id, "application created"),
                Err(e) => error!("Error creating application: {}", e),
            }
            let _ = sender.send(TaskResult::ApplicationCreated(result));
        });
    }

    pub fn delete_application(&self, id: RowId) {
        let (sender, store) = self.task_context();

        self.runtime.spawn(async move {
            let result = store.delete_application(&id).await.map_err(|e| e.to_string());
            match &result {
                Ok(()) => info!(id = %id, "application deleted"),
                Err(e) => error!(id = %id, "Error deleting application: {}", e),
            }
            let _ = sender.send(TaskResult::ApplicationDeleted { id, result });
        });
    }

    pub fn save_notes(&self, id: RowId, notes: String) {
        let (sender, store) = self.task_context();

        self.runtime.spawn(async move {
            let patch = ApplicationPatch::notes(notes);
            let result = store.update_application(&id, &patch).await.map_err(|e| e.to_string());
            if let Err(e) = &result {
                error!(id = %id, "Error updating notes: {}", e);
            }
            let _ = sender.send(TaskResult::NotesSaved { id, result });
        });
    }

    /// Sleeps for `delay`, then starts the update as its own task. Aborting the returned
    /// handle only cancels the wait; a save that already started always runs to the end.
    pub fn debounced_update(
        &self,
        delay: Duration,
        id: RowId,
        generation: u64,
        patch: ApplicationPatch,
    ) -> AbortHandle {
        let (sender, store) = self.task_context();
        let runtime = self.runtime.clone();

        self.runtime
            .spawn(async move {
                sleep(delay).await;

                runtime.spawn(async move {
                    let result =
                        store.update_application(&id, &patch).await.map_err(|e| e.to_string());
                    if let Err(e) = &result {
                        error!(id = %id, "Failed to save: {}", e);
                    }
                    let _ = sender.send(TaskResult::RowSaved { id, generation, patch, result });
                });
            })
            .abort_handle()
    }

    /// Delivers `result` after `delay`.
    pub fn send_after(&self, delay: Duration, result: TaskResult) {
        let sender = self.sender.clone();

        self.runtime.spawn(async move {
            sleep(delay).await;
            let _ = sender.send(result);
        });
    }
}
