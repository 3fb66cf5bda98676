//! Hit classification: point → item body or manipulation handle.
//!
//! The selected item's handles are tested first — they float outside
//! the item box and must win over any body underneath. Bodies are then
//! tested front-to-back (topmost layer first). Body tests use the
//! unrotated axis-aligned box.

use crate::input::HitTarget;
use rd_core::InstanceId;
use rd_core::model::{PlacedItem, Scene};

/// Radius around a handle center that still counts as a hit, px.
pub const HANDLE_RADIUS: f32 = 12.0;

/// The rotate handle floats this far above the item's top edge, px.
pub const ROTATE_HANDLE_OFFSET: f32 = 20.0;

/// Resolve what (px, py) lands on.
pub fn classify(scene: &Scene, selected: Option<InstanceId>, px: f32, py: f32) -> HitTarget {
    if let Some(sel) = selected
        && let Some(item) = scene.find_by_instance_id(sel)
    {
        if hits_resize_handle(item, px, py) {
            return HitTarget::ResizeHandle(sel);
        }
        if hits_rotate_handle(item, px, py) {
            return HitTarget::RotateHandle(sel);
        }
    }

    // Topmost body first: reverse render order, so equal layers resolve
    // to the most recently inserted item.
    for item in scene.render_order().into_iter().rev() {
        if item.contains(px, py) {
            return HitTarget::Body(item.instance_id);
        }
    }
    HitTarget::Background
}

/// The resize handle sits on the bottom-right corner.
fn hits_resize_handle(item: &PlacedItem, px: f32, py: f32) -> bool {
    within_radius(item.x + item.width, item.y + item.height, px, py)
}

/// The rotate handle floats above the top-right corner.
fn hits_rotate_handle(item: &PlacedItem, px: f32, py: f32) -> bool {
    within_radius(item.x + item.width, item.y - ROTATE_HANDLE_OFFSET, px, py)
}

fn within_radius(cx: f32, cy: f32, px: f32, py: f32) -> bool {
    (px - cx).hypot(py - cy) <= HANDLE_RADIUS
}
