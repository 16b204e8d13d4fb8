pub mod actions;
mod app;
mod columns_modal;
mod notes_modal;
mod quote_footer;
mod stats_panel;
mod table;
pub mod theme;
mod toast;
mod top_bar;

pub use actions::{
    ActionQueue,
    Tab,
    UiAction,
};
pub use app::JobTrackApp;
