//! Zone and distribution operations, independent of the HTTP layer.

pub mod deleter;
pub mod editor;

pub use deleter::{delete_distribution, DeleteError};
pub use editor::{apply_edit, DistributionChange, EditError, EditSummary, ZoneEdit};
