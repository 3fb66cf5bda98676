//! Linear undo/redo over full scene snapshots.
//!
//! History is an ordered sequence of snapshots plus a current index.
//! Committing from a non-tip index discards the redo branch first —
//! standard linear undo, no branching. Continuous in-gesture updates
//! never land here; only discrete edits do.
//!
//! Snapshots are full copies. Scenes are tens of items, so diff
//! storage buys nothing; what matters is that undo/redo restore the
//! whole state.

use rd_core::model::{PlacedItem, SceneSnapshot};

/// Cap on retained entries.
pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug)]
pub struct History {
    entries: Vec<SceneSnapshot>,
    index: usize,
    max_depth: usize,
}

impl History {
    /// A history starts with a baseline entry — the state the last
    /// undo returns to (normally the empty scene of a fresh room).
    pub fn new(baseline: SceneSnapshot) -> Self {
        Self::with_depth(baseline, DEFAULT_MAX_DEPTH)
    }

    pub fn with_depth(baseline: SceneSnapshot, max_depth: usize) -> Self {
        Self {
            entries: vec![baseline],
            index: 0,
            max_depth,
        }
    }

    /// Record one discrete edit. Prunes the redo branch, appends, and
    /// advances; trims the oldest entry past the depth cap.
    pub fn commit(&mut self, snapshot: SceneSnapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index += 1;
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
            self.index -= 1;
        }
    }

    /// Step back. Returns the snapshot to adopt wholesale, or `None`
    /// at the start of history.
    pub fn undo(&mut self) -> Option<&[PlacedItem]> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward. Returns the snapshot to adopt, or `None` at the
    /// tip.
    pub fn redo(&mut self) -> Option<&[PlacedItem]> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of entries currently held (baseline included).
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Drop everything and start over from a new baseline (room
    /// replacement).
    pub fn reset(&mut self, baseline: SceneSnapshot) {
        self.entries.clear();
        self.entries.push(baseline);
        self.index = 0;
    }
}
