//! WASM bridge for RD — exposes the editor session to browser JS.
//!
//! Compiled via `wasm-pack build --target web` and loaded by the editor
//! shell. The bridge owns one `EditorSession`; pointer and keyboard
//! events come in, renderable scene JSON goes out. Rendering itself
//! (DOM or canvas compositing) stays on the JS side.

use rd_core::model::ItemPatch;
use rd_core::{Catalog, CatalogId};
use rd_editor::input::Modifiers;
use rd_editor::session::EditorSession;
use rd_editor::shortcuts::ShortcutMap;
use rd_editor::{GesturePhase, InputEvent};
use wasm_bindgen::prelude::*;

/// The main JS-facing editor controller.
#[wasm_bindgen]
pub struct RoomCanvas {
    session: EditorSession,
}

#[wasm_bindgen]
impl RoomCanvas {
    /// Create a controller from the catalog collaborator's JSON list.
    /// An unparsable catalog yields an empty one; `set_catalog` can
    /// retry later.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> RoomCanvas {
        let catalog = Catalog::from_json(catalog_json).unwrap_or_else(|err| {
            log::warn!("catalog rejected: {err}");
            Catalog::default()
        });
        RoomCanvas {
            session: EditorSession::new(catalog),
        }
    }

    /// Replace the catalog. Returns `false` on a parse error (the old
    /// catalog stays).
    pub fn set_catalog(&mut self, catalog_json: &str) -> bool {
        match Catalog::from_json(catalog_json) {
            Ok(catalog) => {
                self.session.replace_catalog(catalog);
                true
            }
            Err(err) => {
                log::warn!("catalog rejected: {err}");
                false
            }
        }
    }

    /// Load (or replace) the room image; resets scene, history, and
    /// selection together.
    pub fn load_room(&mut self, url: &str) {
        self.session.load_room(url);
    }

    // ─── Pointer events ──────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.session.handle_input(InputEvent::PointerDown {
            x,
            y,
            modifiers: Modifiers::NONE,
        });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.session.handle_input(InputEvent::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        });
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.session.handle_input(InputEvent::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        });
    }

    /// Whether a drag/resize/rotate is in flight (the shell keeps its
    /// global move/up listeners attached while this is true).
    pub fn is_manipulating(&self) -> bool {
        self.session.gesture_phase() != GesturePhase::Idle
    }

    // ─── Toolbar / properties panel ──────────────────────────────────

    /// Place a catalog entry. Returns the new instance id, or `None`
    /// for an unknown catalog id.
    pub fn add_furniture(&mut self, catalog_id: &str) -> Option<String> {
        self.session
            .add_furniture(CatalogId::intern(catalog_id))
            .map(|id| id.as_str().to_string())
            .ok()
    }

    /// Apply a properties-panel patch to the selected item, e.g.
    /// `{"width": 200}`. Returns `false` when nothing is selected or
    /// the patch doesn't parse.
    pub fn update_selected(&mut self, patch_json: &str) -> bool {
        match serde_json::from_str::<ItemPatch>(patch_json) {
            Ok(patch) => self.session.update_selected(&patch),
            Err(err) => {
                log::warn!("patch rejected: {err}");
                false
            }
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.delete_selected()
    }

    pub fn duplicate_selected(&mut self) -> Option<String> {
        self.session
            .duplicate_selected()
            .map(|id| id.as_str().to_string())
    }

    pub fn select(&mut self, instance_id: &str) -> bool {
        self.session.select(rd_core::InstanceId::intern(instance_id))
    }

    pub fn deselect(&mut self) {
        self.session.deselect();
    }

    pub fn selected_id(&self) -> Option<String> {
        self.session.selected().map(|id| id.as_str().to_string())
    }

    // ─── History ─────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    // ─── Keyboard ────────────────────────────────────────────────────

    /// Resolve and execute a keyboard shortcut. Returns `true` when the
    /// key was handled (the shell then preventDefaults).
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
            Some(action) => self.session.handle_shortcut(action),
            None => false,
        }
    }

    // ─── Chat ────────────────────────────────────────────────────────

    /// Feed one transcript fragment to the command interpreter.
    /// Returns the response for the transcript, or `None` when the
    /// text held no command.
    pub fn chat(&mut self, message: &str) -> Option<String> {
        self.session.chat(message)
    }

    // ─── Output ──────────────────────────────────────────────────────

    /// The renderable description of the current state: room image plus
    /// items back-to-front with their artwork, as JSON.
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&self.session.export()).unwrap_or_else(|err| {
            log::error!("export failed: {err}");
            String::from("{}")
        })
    }

    /// The validated save payload for the persistence collaborator, or
    /// `None` when the draft doesn't validate (e.g. no room image yet).
    pub fn save_payload(&self) -> Option<String> {
        let draft = self.session.save_draft().ok()?;
        serde_json::to_string(&draft).ok()
    }

    /// Teardown: end any gesture, clear the selection. The shell calls
    /// this before detaching its listeners.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"[
        {
            "id": "bed-1",
            "name": "Cama RAMNEFJÄLL",
            "category": "bed",
            "imageUrl": "/assets/bed-1.png",
            "style": "Moderno",
            "brand": "DecorAR"
        }
    ]"#;

    #[test]
    fn full_flow_over_the_bridge() {
        let mut canvas = RoomCanvas::new(CATALOG);
        canvas.load_room("/uploads/room.png");

        let id = canvas.add_furniture("bed-1").unwrap();
        assert_eq!(canvas.selected_id(), Some(id));

        // Drag via pointer events
        canvas.pointer_down(150.0, 150.0);
        assert!(canvas.is_manipulating());
        canvas.pointer_move(200.0, 150.0);
        canvas.pointer_up(200.0, 150.0);
        assert!(!canvas.is_manipulating());

        let scene = canvas.scene_json();
        assert!(scene.contains("\"roomImageUrl\":\"/uploads/room.png\""));
        assert!(scene.contains("\"x\":150.0"));

        assert!(canvas.undo());
        assert!(canvas.can_redo());
    }

    #[test]
    fn patch_and_save_roundtrip() {
        let mut canvas = RoomCanvas::new(CATALOG);
        canvas.load_room("/uploads/room.png");
        canvas.add_furniture("bed-1").unwrap();

        assert!(canvas.update_selected(r#"{"rotation": 45.0}"#));
        assert!(!canvas.update_selected("not json"));

        let payload = canvas.save_payload().unwrap();
        assert!(payload.contains("\"rotation\":45.0"));
    }

    #[test]
    fn bad_catalog_falls_back_to_empty() {
        let mut canvas = RoomCanvas::new("nonsense");
        assert!(canvas.add_furniture("bed-1").is_none());
        assert!(canvas.set_catalog(CATALOG));
        canvas.load_room("/uploads/room.png");
        assert!(canvas.add_furniture("bed-1").is_some());
    }
}
