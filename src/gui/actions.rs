use crate::core::models::{
    FieldEdit,
    RowId,
};

// A simple ui action queue system so we don't need to pass mutable references to ui functions
#[derive(Debug, Clone)]
pub enum UiAction {
    // Rows
    Edit { id: RowId, edit: FieldEdit },
    Remove(RowId),

    // New row strip
    BeginNewRow,
    InsertNewRow,
    CancelNewRow,

    // Modals
    OpenNotes(RowId),
    OpenColumns,

    // Chrome
    SelectTab(Tab),
    NextQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Applications,
    Statistics,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Applications => "Applications",
            Tab::Statistics => "Stats",
        }
    }
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
