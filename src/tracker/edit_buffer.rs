use std::collections::{
    BTreeMap,
    HashMap,
};

use crate::core::models::{
    Application,
    ApplicationPatch,
    FieldEdit,
    RowId,
};

/// Edits shown in the table but not yet confirmed by the store, keyed by row id.
#[derive(Debug, Default)]
pub struct EditBuffer {
    entries: HashMap<RowId, ApplicationPatch>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `edit` into the row's entry and returns the whole accumulated entry.
    pub fn record(
        &mut self,
        id: &str,
        edit: FieldEdit,
        stored: Option<&Application>,
    ) -> ApplicationPatch {
        let empty = BTreeMap::new();
        let stored_custom = stored.map(|row| &row.custom_fields).unwrap_or(&empty);

        let entry = self.entries.entry(id.to_string()).or_default();
        edit.fold_into(entry, stored_custom);
        entry.clone()
    }

    pub fn get(&self, id: &str) -> Option<&ApplicationPatch> {
        self.entries.get(id)
    }

    /// Forgets the fields `saved` wrote, keeping anything edited again after it went out.
    pub fn clear_saved(&mut self, id: &str, saved: &ApplicationPatch) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.clear_saved(saved);
            if entry.is_empty() {
                self.entries.remove(id);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<ApplicationPatch> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The row as the user currently sees it.
    pub fn view(&self, row: &Application) -> Application {
        let mut view = row.clone();
        if let Some(patch) = self.entries.get(&row.id) {
            patch.apply_to(&mut view);
        }
        view
    }
}
