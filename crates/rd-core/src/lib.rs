pub mod catalog;
pub mod error;
pub mod id;
pub mod model;
pub mod project;

pub use catalog::{Catalog, FurnitureEntry};
pub use error::{ProjectError, SceneError, UploadError};
pub use id::{CatalogId, InstanceId};
pub use model::*;
pub use project::{MemoryStore, ProjectDraft, ProjectStore, SavedProject, UploadRequest};
