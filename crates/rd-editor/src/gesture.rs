//! Pointer-gesture state machine: move, resize, rotate.
//!
//! Arming a gesture captures the pointer anchor and a snapshot of the
//! item's starting geometry. Every frame is computed from that snapshot
//! and the current pointer — never from the previous frame's mutated
//! values, so repeated rounding cannot drift.
//!
//! Pointer-up is the only exit from an active state and the result is
//! always committed by the caller; there is no abort-and-revert path.

use rd_core::InstanceId;
use rd_core::model::{ItemPatch, PlacedItem};

/// Which manipulation a gesture performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
    Rotate,
}

/// Observable state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Moving,
    Resizing,
    Rotating,
}

/// Starting geometry captured when a gesture arms.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StartState {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    kind: GestureKind,
    item: InstanceId,
    anchor_x: f32,
    anchor_y: f32,
    start: StartState,
}

/// The transform controller. At most one gesture is active at a time,
/// always on the selected item.
#[derive(Debug, Default)]
pub struct Gesture {
    active: Option<ActiveGesture>,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        match self.active {
            None => GesturePhase::Idle,
            Some(g) => match g.kind {
                GestureKind::Move => GesturePhase::Moving,
                GestureKind::Resize => GesturePhase::Resizing,
                GestureKind::Rotate => GesturePhase::Rotating,
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The item the active gesture manipulates.
    pub fn target(&self) -> Option<InstanceId> {
        self.active.map(|g| g.item)
    }

    /// Arm a gesture on `item` with the pointer at (anchor_x, anchor_y).
    /// Honored only from `Idle`; a start signal while active is ignored.
    pub fn begin(&mut self, kind: GestureKind, item: &PlacedItem, anchor_x: f32, anchor_y: f32) -> bool {
        if self.active.is_some() {
            return false;
        }
        log::trace!("{kind:?} gesture on {} from ({anchor_x}, {anchor_y})", item.instance_id);
        self.active = Some(ActiveGesture {
            kind,
            item: item.instance_id,
            anchor_x,
            anchor_y,
            start: StartState {
                x: item.x,
                y: item.y,
                width: item.width,
                height: item.height,
            },
        });
        true
    }

    /// Compute this frame's update for the pointer at (px, py).
    ///
    /// Returns the target instance and the fields to store; the store
    /// clamps sizes, so the patch carries raw values. `None` when idle.
    pub fn update(&self, px: f32, py: f32) -> Option<(InstanceId, ItemPatch)> {
        let g = self.active.as_ref()?;
        let dx = px - g.anchor_x;
        let dy = py - g.anchor_y;

        let patch = match g.kind {
            GestureKind::Move => ItemPatch {
                x: Some(g.start.x + dx),
                y: Some(g.start.y + dy),
                ..Default::default()
            },
            GestureKind::Resize => {
                // One scalar drives both axes: the pointer's Euclidean
                // travel, signed by the sum of its components. A zero
                // sum means zero delta, not a positive one.
                let sum = dx + dy;
                let sign = if sum > 0.0 {
                    1.0
                } else if sum < 0.0 {
                    -1.0
                } else {
                    0.0
                };
                let delta = dx.hypot(dy) * sign;
                ItemPatch {
                    width: Some(g.start.width + delta),
                    height: Some(g.start.height + delta),
                    ..Default::default()
                }
            }
            GestureKind::Rotate => {
                let cx = g.start.x + g.start.width / 2.0;
                let cy = g.start.y + g.start.height / 2.0;
                // +90° so the handle's rest direction (straight up) is 0°
                let angle = (py - cy).atan2(px - cx).to_degrees() + 90.0;
                ItemPatch {
                    rotation: Some(angle.rem_euclid(360.0)),
                    ..Default::default()
                }
            }
        };
        Some((g.item, patch))
    }

    /// End the gesture. Always returns to `Idle`; yields the ended
    /// gesture's target so the caller can commit exactly once.
    pub fn finish(&mut self) -> Option<InstanceId> {
        self.active.take().map(|g| g.item)
    }

    /// Unconditional teardown (room replacement, editor close). No
    /// commit follows.
    pub fn reset(&mut self) {
        self.active = None;
    }
}
