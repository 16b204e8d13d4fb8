pub mod debounce;
pub mod manager;
pub mod types;

pub use debounce::SaveScheduler;
pub use manager::TaskManager;
pub use types::TaskResult;
