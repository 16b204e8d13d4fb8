use crate::core::models::{
    Application,
    ApplicationPatch,
    RowId,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    ApplicationsLoaded(Result<Vec<Application>, String>),
    ApplicationCreated(Result<Application, String>),
    ApplicationDeleted { id: RowId, result: Result<(), String> },

    RowSaved {
        id: RowId,
        generation: u64,
        patch: ApplicationPatch,
        result: Result<Application, String>,
    },
    NotesSaved { id: RowId, result: Result<Application, String> },

    ToastExpired(u64),
    SavedIndicatorExpired(u64),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::ApplicationsLoaded(_) => "applications_loaded",
            TaskResult::ApplicationCreated(_) => "application_created",
            TaskResult::ApplicationDeleted { .. } => "application_deleted",
            TaskResult::RowSaved { .. } => "row_saved",
            TaskResult::NotesSaved { .. } => "notes_saved",
            TaskResult::ToastExpired(_) => "toast_expired",
            TaskResult::SavedIndicatorExpired(_) => "saved_indicator_expired",
        }
    }
}
