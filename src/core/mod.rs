pub mod columns;
pub mod config;
pub mod errors;
pub mod models;
pub mod quotes;
pub mod stats;
pub mod tasks;

pub use columns::{
    ColumnDefinition,
    ColumnRegistry,
};
pub use config::AppConfig;
pub use errors::JobTrackError;
pub use models::{
    Application,
    ApplicationDraft,
    ApplicationPatch,
    ApplicationStatus,
    FieldEdit,
};
