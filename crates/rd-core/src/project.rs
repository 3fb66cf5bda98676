//! Project persistence payloads and the upload gate.
//!
//! The persistence and upload services are external collaborators; this
//! module owns only the payload shapes, their validation, and an
//! in-memory store used by tests and the browser shell during
//! development.

use crate::error::{ProjectError, UploadError};
use crate::model::{PlacedItem, SIZE_MAX, SIZE_MIN, SceneSnapshot, TILT_MAX};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A project as submitted for saving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub room_image_url: String,
    pub furniture_items: SceneSnapshot,
}

impl ProjectDraft {
    /// Check the payload against the scene invariants, collecting every
    /// offending field.
    pub fn validate(&self) -> Result<(), ProjectError> {
        let mut fields = Vec::new();
        if self.room_image_url.trim().is_empty() {
            fields.push("roomImageUrl".to_string());
        }
        for (i, item) in self.furniture_items.iter().enumerate() {
            if !(SIZE_MIN..=SIZE_MAX).contains(&item.width) {
                fields.push(format!("furnitureItems[{i}].width"));
            }
            if !(SIZE_MIN..=SIZE_MAX).contains(&item.height) {
                fields.push(format!("furnitureItems[{i}].height"));
            }
            if !(0.0..360.0).contains(&item.rotation) {
                fields.push(format!("furnitureItems[{i}].rotation"));
            }
            if item.tilt_x.abs() > TILT_MAX {
                fields.push(format!("furnitureItems[{i}].tiltX"));
            }
            if item.tilt_y.abs() > TILT_MAX {
                fields.push(format!("furnitureItems[{i}].tiltY"));
            }
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ProjectError::Validation { fields })
        }
    }
}

/// A stored project record, as returned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    pub id: String,
    pub room_image_url: String,
    pub furniture_items: Vec<PlacedItem>,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
}

/// The persistence seam. Implementations must reject invalid drafts.
pub trait ProjectStore {
    fn save(&mut self, draft: ProjectDraft) -> Result<SavedProject, ProjectError>;
    fn get(&self, id: &str) -> Option<&SavedProject>;
    fn list(&self) -> &[SavedProject];
}

/// In-memory store: validated drafts only, generated ids, epoch-second
/// timestamps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: Vec<SavedProject>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn save(&mut self, draft: ProjectDraft) -> Result<SavedProject, ProjectError> {
        draft.validate()?;
        let id = format!("project_{}", self.next_id);
        self.next_id += 1;
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let record = SavedProject {
            id,
            room_image_url: draft.room_image_url,
            furniture_items: draft.furniture_items,
            created_at,
        };
        log::debug!("saved {} ({} items)", record.id, record.furniture_items.len());
        self.projects.push(record.clone());
        Ok(record)
    }

    fn get(&self, id: &str) -> Option<&SavedProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn list(&self) -> &[SavedProject] {
        &self.projects
    }
}

/// Content types the upload collaborator accepts.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Largest accepted room photo, bytes.
pub const UPLOAD_LIMIT_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata of a room photo about to be uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
    pub byte_len: u64,
}

impl UploadRequest {
    /// Gate an upload the way the collaborator does: allow-listed image
    /// types only, hard size cap.
    pub fn check(&self) -> Result<(), UploadError> {
        if !ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            return Err(UploadError::UnsupportedType(self.content_type.clone()));
        }
        if self.byte_len > UPLOAD_LIMIT_BYTES {
            return Err(UploadError::TooLarge {
                size: self.byte_len,
                limit: UPLOAD_LIMIT_BYTES,
            });
        }
        Ok(())
    }
}
