//! The editor session: scene + selection + gesture + history as one
//! cohesive object.
//!
//! Every component operation goes through the session, which enforces
//! the editing discipline: at most one selected item, at most one
//! active gesture (on the selected item), per-frame gesture updates
//! applied without history, and exactly one history commit per
//! discrete user-visible action.

use crate::chat::{self, ChatCommand};
use crate::gesture::{Gesture, GestureKind, GesturePhase};
use crate::history::History;
use crate::hit;
use crate::input::{HitTarget, InputEvent};
use crate::shortcuts::ShortcutAction;
use rd_core::model::{ItemPatch, PlacedItem, Scene};
use rd_core::{Catalog, CatalogId, InstanceId, ProjectDraft, ProjectError, SceneError};
use serde::{Deserialize, Serialize};

/// Where library and chat additions land on the canvas.
pub const DEFAULT_DROP: (f32, f32) = (100.0, 100.0);

/// The renderable description of the current state: the room image
/// reference plus items back-to-front with their catalog artwork.
/// Compositing/export itself is an external concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub room_image_url: Option<String>,
    pub items: Vec<RenderItem>,
}

/// One draw call: placed geometry plus the artwork it renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    #[serde(flatten)]
    pub item: PlacedItem,
    pub image_url: String,
    pub selected: bool,
}

/// One editor session over one room image.
pub struct EditorSession {
    catalog: Catalog,
    scene: Scene,
    room_image: Option<String>,
    selected: Option<InstanceId>,
    gesture: Gesture,
    history: History,
}

impl EditorSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            scene: Scene::new(),
            room_image: None,
            selected: None,
            gesture: Gesture::new(),
            history: History::new(Vec::new()),
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn room_image(&self) -> Option<&str> {
        self.room_image.as_deref()
    }

    pub fn selected(&self) -> Option<InstanceId> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&PlacedItem> {
        self.selected.and_then(|id| self.scene.find_by_instance_id(id))
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Room lifecycle ──────────────────────────────────────────────────

    /// Load (or replace) the room image. Atomic: the scene empties, the
    /// history restarts from a single empty entry, selection clears,
    /// and any in-flight gesture is dropped without committing.
    pub fn load_room(&mut self, url: &str) {
        log::debug!("load room {url}");
        self.room_image = Some(url.to_string());
        self.scene.clear();
        self.selected = None;
        self.gesture.reset();
        self.history.reset(Vec::new());
    }

    /// Swap in a freshly fetched catalog. Placed items keep their
    /// (weak) catalog references; stale ones simply stop resolving.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    /// Teardown: back to `Idle`, selection cleared, nothing committed.
    /// The shell calls this when the editor closes or detaches its
    /// pointer listeners.
    pub fn reset(&mut self) {
        self.gesture.reset();
        self.selected = None;
    }

    // ─── Pointer flow ────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y, .. } => self.pointer_down(x, y),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(x, y),
            InputEvent::PointerUp { .. } => self.pointer_up(),
        }
    }

    /// Select and arm. A body hit selects the item and arms a move; a
    /// handle hit (only present on the selected item) arms resize or
    /// rotate; background clears the selection.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        match hit::classify(&self.scene, self.selected, x, y) {
            HitTarget::Body(id) => {
                self.selected = Some(id);
                self.arm(GestureKind::Move, id, x, y);
            }
            HitTarget::ResizeHandle(id) => self.arm(GestureKind::Resize, id, x, y),
            HitTarget::RotateHandle(id) => self.arm(GestureKind::Rotate, id, x, y),
            HitTarget::Background => self.selected = None,
        }
    }

    fn arm(&mut self, kind: GestureKind, id: InstanceId, x: f32, y: f32) {
        if let Some(item) = self.scene.find_by_instance_id(id) {
            self.gesture.begin(kind, item, x, y);
        }
    }

    /// Continuous update: applied to the scene without a history entry.
    /// A failed lookup skips the frame — it must not end the gesture.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some((id, patch)) = self.gesture.update(x, y) {
            if self.scene.update_item(id, &patch).is_err() {
                log::trace!("gesture frame skipped: {id} is gone");
            }
        }
    }

    /// Unconditional exit from any active state. Every gesture that
    /// started commits exactly one history entry on release, movement
    /// or not; only a background click commits nothing.
    pub fn pointer_up(&mut self) {
        if self.gesture.finish().is_some() {
            self.commit("gesture");
        }
    }

    // ─── Discrete edits ──────────────────────────────────────────────────

    /// Place a catalog entry at the default drop position and select
    /// it.
    pub fn add_furniture(&mut self, catalog_id: CatalogId) -> Result<InstanceId, SceneError> {
        let item = self
            .scene
            .add_item(&self.catalog, catalog_id, DEFAULT_DROP.0, DEFAULT_DROP.1)?;
        self.selected = Some(item.instance_id);
        self.commit("add");
        Ok(item.instance_id)
    }

    /// Remove the selected item, clearing the selection.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if self.scene.remove_item(id).is_err() {
            return false;
        }
        self.selected = None;
        self.commit("delete");
        true
    }

    /// Duplicate the selected item and select the copy.
    pub fn duplicate_selected(&mut self) -> Option<InstanceId> {
        let id = self.selected?;
        let copy = self.scene.duplicate_item(id).ok()?;
        self.selected = Some(copy.instance_id);
        self.commit("duplicate");
        Some(copy.instance_id)
    }

    /// Properties-panel edit: one patch, one commit.
    pub fn update_selected(&mut self, patch: &ItemPatch) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if patch.is_empty() || self.scene.update_item(id, patch).is_err() {
            return false;
        }
        self.commit("edit");
        true
    }

    pub fn select(&mut self, id: InstanceId) -> bool {
        if self.scene.find_by_instance_id(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    // ─── History ─────────────────────────────────────────────────────────

    fn commit(&mut self, what: &str) {
        log::debug!("commit: {what} ({} items)", self.scene.len());
        self.history.commit(self.scene.snapshot());
    }

    /// Adopt the previous history entry wholesale.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().map(<[PlacedItem]>::to_vec) else {
            return false;
        };
        self.scene.restore(&snapshot);
        self.prune_selection();
        true
    }

    /// Adopt the next history entry wholesale.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().map(<[PlacedItem]>::to_vec) else {
            return false;
        };
        self.scene.restore(&snapshot);
        self.prune_selection();
        true
    }

    /// Selection may point at an item the adopted snapshot no longer
    /// has.
    fn prune_selection(&mut self) {
        if let Some(id) = self.selected
            && self.scene.find_by_instance_id(id).is_none()
        {
            self.selected = None;
        }
    }

    // ─── Shortcuts ───────────────────────────────────────────────────────

    pub fn handle_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::Duplicate => self.duplicate_selected().is_some(),
            ShortcutAction::Deselect => {
                self.deselect();
                true
            }
        }
    }

    // ─── Chat commands ───────────────────────────────────────────────────

    /// Interpret and execute one chat message. Returns the response for
    /// the transcript, or `None` when no command was recognized.
    pub fn chat(&mut self, message: &str) -> Option<String> {
        let interpretation = chat::interpret(message, &self.catalog)?;
        log::debug!("chat: {:?}", interpretation.command);

        Some(match interpretation.command {
            ChatCommand::AddFurniture { name } => {
                let found = self
                    .catalog
                    .find_by_name(&name)
                    .map(|e| (e.id, e.name.clone()));
                match found {
                    Some((id, entry_name)) => match self.add_furniture(id) {
                        Ok(_) => format!("{entry_name} added to your project."),
                        Err(_) => format!("Could not add {entry_name}."),
                    },
                    None => format!("Could not find furniture: {name}"),
                }
            }
            ChatCommand::RemoveFurniture { name } => {
                let found = self
                    .catalog
                    .find_by_name(&name)
                    .map(|e| (e.id, e.name.clone()));
                match found {
                    Some((id, entry_name)) => {
                        // Every placed instance of the entry goes, not
                        // just one.
                        self.scene.remove_by_catalog(id);
                        self.prune_selection();
                        self.commit("chat remove");
                        format!("{entry_name} removed from your project.")
                    }
                    None => format!("Could not find furniture: {name}"),
                }
            }
            ChatCommand::ListFurniture => self.list_furniture(),
        })
    }

    fn list_furniture(&self) -> String {
        let mut lines = vec!["Available furniture:".to_string()];
        for category in self.catalog.categories() {
            let names: Vec<&str> = self
                .catalog
                .in_category(category)
                .iter()
                .map(|e| e.name.as_str())
                .collect();
            lines.push(format!("{category}: {}", names.join(", ")));
        }
        lines.join("\n")
    }

    // ─── Export & save ───────────────────────────────────────────────────

    /// The current state as a renderable description, back-to-front.
    /// Items whose catalog entry no longer resolves are skipped.
    pub fn export(&self) -> RenderPlan {
        let items = self
            .scene
            .render_order()
            .into_iter()
            .filter_map(|item| {
                let entry = self.catalog.get(item.catalog_id)?;
                Some(RenderItem {
                    item: item.clone(),
                    image_url: entry.image_url.clone(),
                    selected: self.selected == Some(item.instance_id),
                })
            })
            .collect();
        RenderPlan {
            room_image_url: self.room_image.clone(),
            items,
        }
    }

    /// The validated payload for the persistence collaborator.
    pub fn save_draft(&self) -> Result<ProjectDraft, ProjectError> {
        let draft = ProjectDraft {
            room_image_url: self.room_image.clone().unwrap_or_default(),
            furniture_items: self.scene.snapshot(),
        };
        draft.validate()?;
        Ok(draft)
    }
}
