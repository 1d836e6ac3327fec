//! # Snapshot History
//!
//! Linear undo/redo over full state snapshots.
//!
//! ## Design
//!
//! - `snapshots[current_index]` is the displayed state
//! - Pushing a new state discards everything after the cursor, then appends
//! - Undo/redo move the cursor; at either end they do nothing
//! - Optional retention cap: `max_levels` undo steps (0 = unlimited). When a
//!   push exceeds the cap the oldest snapshot is dropped
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(editor.clone());
//! history.push(next_editor);
//! assert_eq!(history.undo(), Some(&editor));
//! ```

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History<T> {
    /// Snapshots in dispatch order (oldest first)
    #[serde(rename = "history")]
    snapshots: Vec<T>,

    current_index: usize,

    /// Maximum number of undo levels (0 = unlimited)
    #[serde(skip)]
    max_levels: usize,
}

impl<T: Clone> History<T> {
    /// History holding a single snapshot, no cap
    pub fn new(initial: T) -> Self {
        Self::with_max_levels(initial, 0)
    }

    pub fn with_max_levels(initial: T, max_levels: usize) -> Self {
        Self {
            snapshots: vec![initial],
            current_index: 0,
            max_levels,
        }
    }

    /// Record a new state after the cursor
    pub fn push(&mut self, snapshot: T) {
        self.snapshots.truncate(self.current_index + 1);
        self.snapshots.push(snapshot);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.snapshots.len() > self.max_levels + 1 {
            let excess = self.snapshots.len() - (self.max_levels + 1);
            self.snapshots.drain(..excess);
        }

        self.current_index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot; `None` at the oldest
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        Some(&self.snapshots[self.current_index])
    }

    /// Step forward one snapshot; `None` at the newest
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        Some(&self.snapshots[self.current_index])
    }

    /// Replace all history with a single snapshot
    pub fn reset(&mut self, snapshot: T) {
        self.snapshots.clear();
        self.snapshots.push(snapshot);
        self.current_index = 0;
    }

    pub fn current(&self) -> &T {
        &self.snapshots[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: a history holds at least one snapshot
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[T] {
        &self.snapshots
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.snapshots.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.current_index
    }

    pub fn redo_levels(&self) -> usize {
        self.snapshots.len() - self.current_index - 1
    }
}
