//! # Storage Layer
//!
//! Project persistence sits behind the [`DataStore`] trait so the reducer
//! and API layers never touch a filesystem:
//!
//! - [`fs::FileStore`]: production JSON storage. A summary index in
//!   `data.json` plus one `project-{uuid}.json` per saved project, so
//!   listing projects never reads the project files themselves.
//! - [`memory::InMemoryStore`]: HashMap-backed store for tests, with a
//!   [`memory::fixtures`] builder for assembling states through the real
//!   reducer operations.
//!
//! Stores deal exclusively in [`ProjectArchive`] values — the project plus
//! the tag-pool subset its items reference. Timestamps serialize as
//! ISO-8601 via chrono's serde support.

use crate::error::Result;
use crate::model::{ProjectArchive, ProjectSummary, Tag};
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for saved-project storage.
///
/// The tag pool is process-wide rather than per-project, so it is stored
/// separately from the archives (which only carry the referenced subset).
pub trait DataStore {
    /// Save an archive (create or overwrite, keyed by project id)
    fn save_project(&mut self, archive: &ProjectArchive) -> Result<()>;

    /// Get a saved archive by project id
    fn get_project(&self, id: &Uuid) -> Result<ProjectArchive>;

    /// Summaries of all saved projects, most recently updated first
    fn list_projects(&self) -> Result<Vec<ProjectSummary>>;

    /// Delete a saved project permanently
    fn delete_project(&mut self, id: &Uuid) -> Result<()>;

    /// Persist the whole tag pool
    fn save_tags(&mut self, tags: &[Tag]) -> Result<()>;

    /// Load the tag pool (empty if never saved)
    fn load_tags(&self) -> Result<Vec<Tag>>;
}
