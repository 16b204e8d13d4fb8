//! The hosted data service that owns application rows.
//!
//! Every call is implicitly scoped to the signed-in user; the tracker never sends or
//! checks ownership itself.

pub mod memory;
pub mod rest;

use futures::future::BoxFuture;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::core::{
    errors::Result,
    models::{
        Application,
        ApplicationDraft,
        ApplicationPatch,
    },
};

pub trait ApplicationStore: Send + Sync {
    /// All rows of the current user, newest `applied_at` first.
    fn load_applications(&self) -> BoxFuture<'_, Result<Vec<Application>>>;

    fn create_application<'a>(
        &'a self,
        draft: &'a ApplicationDraft,
    ) -> BoxFuture<'a, Result<Application>>;

    fn update_application<'a>(
        &'a self,
        id: &'a str,
        patch: &'a ApplicationPatch,
    ) -> BoxFuture<'a, Result<Application>>;

    fn delete_application<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;
}
