//! Error kinds for scene, project, and upload operations.
//!
//! Scene lookups fail fast and locally — a failed lookup during a
//! pointer-move must skip that frame's update, never abort the
//! manipulation. An unrecognized chat message is a silent no-op in the
//! interpreter, not an error.

use crate::id::{CatalogId, InstanceId};
use thiserror::Error;

/// A scene operation referenced something that isn't there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("no placed item with instance id {0}")]
    UnknownInstance(InstanceId),
    #[error("no catalog entry with id {0}")]
    UnknownCatalog(CatalogId),
}

/// A persistence payload failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Lists every offending field, not just the first.
    #[error("invalid project payload: {}", fields.join(", "))]
    Validation { fields: Vec<String> },
}

/// A room photo was rejected before upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}
