//! Pointer input events delivered by the host shell.
//!
//! The shell (browser or test harness) translates raw DOM events into
//! these; the session decides what they mean.

use rd_core::InstanceId;

/// Keyboard modifier state accompanying a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };
}

/// A pointer event in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, modifiers: Modifiers },
    PointerMove { x: f32, y: f32, modifiers: Modifiers },
    PointerUp { x: f32, y: f32, modifiers: Modifiers },
}

/// What a pointer-down landed on.
///
/// Handles exist only on the selected item, so a handle hit always
/// refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Body(InstanceId),
    ResizeHandle(InstanceId),
    RotateHandle(InstanceId),
    Background,
}
