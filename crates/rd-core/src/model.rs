//! Scene model: placed furniture instances over one room image.
//!
//! The scene is a flat, insertion-ordered collection. Render order is
//! derived from each item's `layer`; ties keep insertion order. At most
//! one item is selected at a time, but selection is session state and
//! lives with the editor session, not here.

use crate::catalog::Catalog;
use crate::error::SceneError;
use crate::id::{CatalogId, InstanceId};
use serde::{Deserialize, Serialize};

/// Size bounds for a placed item, px on each axis.
pub const SIZE_MIN: f32 = 50.0;
pub const SIZE_MAX: f32 = 500.0;

/// Footprint of a freshly added item.
pub const DEFAULT_SIZE: f32 = 150.0;

/// Positional offset applied to duplicates, px on each axis.
pub const DUPLICATE_OFFSET: f32 = 20.0;

/// Bound on the out-of-plane tilt axes, degrees.
pub const TILT_MAX: f32 = 90.0;

/// Clamp a size component into [`SIZE_MIN`, `SIZE_MAX`].
pub fn clamp_size(v: f32) -> f32 {
    v.clamp(SIZE_MIN, SIZE_MAX)
}

/// Normalize an angle into [0, 360).
pub fn normalize_rotation(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

/// Clamp a tilt component into [-`TILT_MAX`, `TILT_MAX`].
pub fn clamp_tilt(v: f32) -> f32 {
    v.clamp(-TILT_MAX, TILT_MAX)
}

/// One placement of a catalog entry, with its own geometry.
///
/// `catalog_id` is a weak reference — the entry is owned by the catalog
/// collaborator and may disappear from under us; lookups must tolerate
/// that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub instance_id: InstanceId,
    pub catalog_id: CatalogId,
    /// Top-left offset in scene coordinates. Unclamped — items may sit
    /// off-canvas.
    pub x: f32,
    pub y: f32,
    /// Always within [`SIZE_MIN`, `SIZE_MAX`].
    pub width: f32,
    pub height: f32,
    /// In-plane rotation, degrees, always within [0, 360).
    pub rotation: f32,
    /// Out-of-plane tilt, degrees, within [-90, 90].
    #[serde(default)]
    pub tilt_x: f32,
    #[serde(default)]
    pub tilt_y: f32,
    /// Stacking order. Need not be contiguous.
    pub layer: u32,
}

impl PlacedItem {
    /// Center of the unrotated box.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether (px, py) lies inside the unrotated box.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// A partial update, one optional field per mutable attribute.
///
/// Fields are applied independently; numeric fields are clamped or
/// normalized before storing, so no update can break the item
/// invariants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation: Option<f32>,
    pub tilt_x: Option<f32>,
    pub tilt_y: Option<f32>,
    pub layer: Option<u32>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }
}

/// A full copy of the scene's item collection, as stored in history
/// entries and persistence payloads.
pub type SceneSnapshot = Vec<PlacedItem>;

/// The current set of placed items over one room image.
///
/// Created empty when a room image is loaded; replaced wholesale when a
/// new one is.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    items: Vec<PlacedItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Place a catalog entry at (x, y) with the default footprint.
    /// The new item renders on top of all items present at insertion
    /// time (`layer` = current count).
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        catalog_id: CatalogId,
        x: f32,
        y: f32,
    ) -> Result<PlacedItem, SceneError> {
        let entry = catalog
            .get(catalog_id)
            .ok_or(SceneError::UnknownCatalog(catalog_id))?;
        let item = PlacedItem {
            instance_id: InstanceId::fresh(),
            catalog_id: entry.id,
            x,
            y,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            rotation: 0.0,
            tilt_x: 0.0,
            tilt_y: 0.0,
            layer: self.items.len() as u32,
        };
        log::debug!("add {} ({}) at ({x}, {y})", item.instance_id, entry.name);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove one placement. Returns the removed item.
    pub fn remove_item(&mut self, id: InstanceId) -> Result<PlacedItem, SceneError> {
        let pos = self
            .items
            .iter()
            .position(|i| i.instance_id == id)
            .ok_or(SceneError::UnknownInstance(id))?;
        Ok(self.items.remove(pos))
    }

    /// Remove every placement of a catalog entry. Returns how many were
    /// removed.
    pub fn remove_by_catalog(&mut self, catalog_id: CatalogId) -> usize {
        let before = self.items.len();
        self.items.retain(|i| i.catalog_id != catalog_id);
        before - self.items.len()
    }

    /// Copy an existing placement: fresh instance id, position offset
    /// by [`DUPLICATE_OFFSET`], stacked above everything.
    pub fn duplicate_item(&mut self, id: InstanceId) -> Result<PlacedItem, SceneError> {
        let original = self
            .find_by_instance_id(id)
            .ok_or(SceneError::UnknownInstance(id))?;
        let item = PlacedItem {
            instance_id: InstanceId::fresh(),
            x: original.x + DUPLICATE_OFFSET,
            y: original.y + DUPLICATE_OFFSET,
            layer: self.max_layer().map_or(0, |m| m + 1),
            ..original.clone()
        };
        log::debug!("duplicate {id} -> {}", item.instance_id);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Apply a partial update field-by-field, clamping before storing.
    pub fn update_item(&mut self, id: InstanceId, patch: &ItemPatch) -> Result<(), SceneError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.instance_id == id)
            .ok_or(SceneError::UnknownInstance(id))?;
        if let Some(x) = patch.x {
            item.x = x;
        }
        if let Some(y) = patch.y {
            item.y = y;
        }
        if let Some(w) = patch.width {
            item.width = clamp_size(w);
        }
        if let Some(h) = patch.height {
            item.height = clamp_size(h);
        }
        if let Some(r) = patch.rotation {
            item.rotation = normalize_rotation(r);
        }
        if let Some(t) = patch.tilt_x {
            item.tilt_x = clamp_tilt(t);
        }
        if let Some(t) = patch.tilt_y {
            item.tilt_y = clamp_tilt(t);
        }
        if let Some(l) = patch.layer {
            item.layer = l;
        }
        Ok(())
    }

    /// Pure lookup by instance id.
    pub fn find_by_instance_id(&self, id: InstanceId) -> Option<&PlacedItem> {
        self.items.iter().find(|i| i.instance_id == id)
    }

    /// First placement of a catalog entry, if any.
    pub fn find_by_catalog_id(&self, id: CatalogId) -> Option<&PlacedItem> {
        self.items.iter().find(|i| i.catalog_id == id)
    }

    /// Highest layer in use.
    pub fn max_layer(&self) -> Option<u32> {
        self.items.iter().map(|i| i.layer).max()
    }

    /// Items back-to-front: ascending layer, insertion order on ties.
    pub fn render_order(&self) -> Vec<&PlacedItem> {
        let mut ordered: Vec<&PlacedItem> = self.items.iter().collect();
        ordered.sort_by_key(|i| i.layer);
        ordered
    }

    /// Full copy of the item collection.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.items.clone()
    }

    /// Adopt a snapshot wholesale (undo/redo).
    pub fn restore(&mut self, snapshot: &[PlacedItem]) {
        self.items = snapshot.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FurnitureEntry;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            FurnitureEntry {
                id: CatalogId::intern("bed-1"),
                name: "Cama RAMNEFJÄLL".to_string(),
                category: "bed".to_string(),
                image_url: "/assets/bed-1.png".to_string(),
                style: "Moderno".to_string(),
                price: None,
                brand: None,
            },
            FurnitureEntry {
                id: CatalogId::intern("desk-1"),
                name: "Secretária ALEX".to_string(),
                category: "desk".to_string(),
                image_url: "/assets/desk-1.png".to_string(),
                style: "Moderno".to_string(),
                price: None,
                brand: None,
            },
        ])
    }

    #[test]
    fn add_item_defaults() {
        let cat = catalog();
        let mut scene = Scene::new();
        let item = scene
            .add_item(&cat, CatalogId::intern("bed-1"), 100.0, 100.0)
            .unwrap();
        assert_eq!(item.width, 150.0);
        assert_eq!(item.height, 150.0);
        assert_eq!(item.rotation, 0.0);
        assert_eq!((item.tilt_x, item.tilt_y), (0.0, 0.0));
        assert_eq!(item.layer, 0);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn add_item_unknown_catalog_id() {
        let cat = catalog();
        let mut scene = Scene::new();
        let err = scene
            .add_item(&cat, CatalogId::intern("sofa-9"), 0.0, 0.0)
            .unwrap_err();
        assert_eq!(err, SceneError::UnknownCatalog(CatalogId::intern("sofa-9")));
    }

    #[test]
    fn instance_ids_stay_unique() {
        let cat = catalog();
        let mut scene = Scene::new();
        let a = scene
            .add_item(&cat, CatalogId::intern("bed-1"), 0.0, 0.0)
            .unwrap();
        let b = scene
            .add_item(&cat, CatalogId::intern("bed-1"), 10.0, 10.0)
            .unwrap();
        let c = scene.duplicate_item(a.instance_id).unwrap();
        scene.remove_item(b.instance_id).unwrap();
        let d = scene
            .add_item(&cat, CatalogId::intern("desk-1"), 5.0, 5.0)
            .unwrap();

        let mut ids = vec![a.instance_id, c.instance_id, d.instance_id];
        ids.sort_by_key(|i| i.as_str().to_string());
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn duplicate_offsets_and_stacks_on_top() {
        let cat = catalog();
        let mut scene = Scene::new();
        let original = scene
            .add_item(&cat, CatalogId::intern("bed-1"), 100.0, 100.0)
            .unwrap();
        let copy = scene.duplicate_item(original.instance_id).unwrap();

        assert_ne!(copy.instance_id, original.instance_id);
        assert_eq!(copy.catalog_id, original.catalog_id);
        assert_eq!((copy.x, copy.y), (120.0, 120.0));
        assert_eq!(copy.layer, 1);
    }

    #[test]
    fn duplicate_layer_tops_noncontiguous_layers() {
        let cat = catalog();
        let mut scene = Scene::new();
        let a = scene
            .add_item(&cat, CatalogId::intern("bed-1"), 0.0, 0.0)
            .unwrap();
        scene
            .update_item(a.instance_id, &ItemPatch { layer: Some(7), ..Default::default() })
            .unwrap();
        let copy = scene.duplicate_item(a.instance_id).unwrap();
        assert_eq!(copy.layer, 8);
    }

    #[test]
    fn update_clamps_size_rotation_tilt() {
        let cat = catalog();
        let mut scene = Scene::new();
        let item = scene
            .add_item(&cat, CatalogId::intern("bed-1"), 0.0, 0.0)
            .unwrap();
        let id = item.instance_id;

        scene
            .update_item(
                id,
                &ItemPatch {
                    width: Some(9999.0),
                    height: Some(-50.0),
                    rotation: Some(-90.0),
                    tilt_x: Some(180.0),
                    tilt_y: Some(-95.0),
                    ..Default::default()
                },
            )
            .unwrap();

        let item = scene.find_by_instance_id(id).unwrap();
        assert_eq!(item.width, 500.0);
        assert_eq!(item.height, 50.0);
        assert_eq!(item.rotation, 270.0);
        assert_eq!(item.tilt_x, 90.0);
        assert_eq!(item.tilt_y, -90.0);
    }

    #[test]
    fn update_unknown_instance() {
        let mut scene = Scene::new();
        let err = scene
            .update_item(InstanceId::intern("ghost"), &ItemPatch::default())
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::UnknownInstance(InstanceId::intern("ghost"))
        );
    }

    #[test]
    fn remove_by_catalog_takes_every_instance() {
        let cat = catalog();
        let mut scene = Scene::new();
        scene
            .add_item(&cat, CatalogId::intern("bed-1"), 0.0, 0.0)
            .unwrap();
        scene
            .add_item(&cat, CatalogId::intern("desk-1"), 0.0, 0.0)
            .unwrap();
        scene
            .add_item(&cat, CatalogId::intern("bed-1"), 50.0, 50.0)
            .unwrap();

        assert_eq!(scene.remove_by_catalog(CatalogId::intern("bed-1")), 2);
        assert_eq!(scene.len(), 1);
        assert!(scene.find_by_catalog_id(CatalogId::intern("bed-1")).is_none());
    }

    #[test]
    fn render_order_sorts_by_layer_stable() {
        let cat = catalog();
        let mut scene = Scene::new();
        let a = scene
            .add_item(&cat, CatalogId::intern("bed-1"), 0.0, 0.0)
            .unwrap();
        let b = scene
            .add_item(&cat, CatalogId::intern("desk-1"), 0.0, 0.0)
            .unwrap();
        // Drop a above b: layers 5 vs 1
        scene
            .update_item(a.instance_id, &ItemPatch { layer: Some(5), ..Default::default() })
            .unwrap();

        let order: Vec<InstanceId> = scene
            .render_order()
            .iter()
            .map(|i| i.instance_id)
            .collect();
        assert_eq!(order, vec![b.instance_id, a.instance_id]);
    }

    #[test]
    fn snapshot_restore_roundtrip() {
        let cat = catalog();
        let mut scene = Scene::new();
        scene
            .add_item(&cat, CatalogId::intern("bed-1"), 0.0, 0.0)
            .unwrap();
        let snap = scene.snapshot();
        scene
            .add_item(&cat, CatalogId::intern("desk-1"), 0.0, 0.0)
            .unwrap();
        assert_eq!(scene.len(), 2);
        scene.restore(&snap);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.snapshot(), snap);
    }
}
