use crate::core::models::{
    Application,
    RowId,
};

/// Global save indicator. It cannot show failures: a failed save returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
}

impl SaveStatus {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            SaveStatus::Idle => None,
            SaveStatus::Saving => Some("Saving..."),
            SaveStatus::Saved => Some("Saved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub(crate) generation: u64,
}

/// State of the notes modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesEditor {
    pub id: RowId,
    pub company: String,
    pub role: String,
    pub text: String,
    pub editing: bool,
}

impl NotesEditor {
    pub fn for_row(row: &Application) -> Self {
        Self {
            id: row.id.clone(),
            company: row.company.clone(),
            role: row.role.clone(),
            text: row.notes.clone(),
            editing: false,
        }
    }
}
