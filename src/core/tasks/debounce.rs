use std::{
    collections::HashMap,
    time::Duration,
};

use tokio::task::AbortHandle;
use tracing::debug;

use super::TaskManager;
use crate::core::models::{
    ApplicationPatch,
    RowId,
};

struct PendingSave {
    generation: u64,
    handle: AbortHandle,
}

/// One debounce timer per row. A new edit replaces the armed timer instead of queueing
/// behind it.
pub struct SaveScheduler {
    delay: Duration,
    next_generation: u64,
    pending: HashMap<RowId, PendingSave>,
}

impl SaveScheduler {
    pub fn new(delay: Duration) -> Self {
        Self { delay, next_generation: 0, pending: HashMap::new() }
    }

    /// Arms (or re-arms) the row timer with the full accumulated patch.
    pub fn schedule(&mut self, tasks: &TaskManager, id: RowId, patch: ApplicationPatch) -> u64 {
        self.cancel(&id);

        self.next_generation += 1;
        let generation = self.next_generation;
        debug!(id = %id, generation, "save armed");

        let handle = tasks.debounced_update(self.delay, id.clone(), generation, patch);
        self.pending.insert(id, PendingSave { generation, handle });
        generation
    }

    /// Cancels the armed timer for `id`, if any. A save already in flight keeps going.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.pending.remove(id) {
            Some(previous) => {
                previous.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forgets the row once the save for `generation` has reported back. A newer timer
    /// armed in the meantime stays.
    pub fn complete(&mut self, id: &str, generation: u64) {
        if self.pending.get(id).is_some_and(|p| p.generation == generation) {
            self.pending.remove(id);
        }
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.handle.abort();
        }
    }
}

impl Drop for SaveScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
