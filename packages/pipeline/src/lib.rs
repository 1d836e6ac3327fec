//! # Funnelcraft Pipeline
//!
//! Kanban board model and the drag-and-drop reorder engine.
//!
//! Reordering is synchronous and in-memory: [`PipelineBoard::apply_drag`]
//! updates the board and returns the [`OrderedBatch`] the caller should
//! persist. Persistence itself lives outside this crate.
//!
//! ```rust,ignore
//! use funnelcraft_pipeline::{DragEnd, DragLocation, ReorderOutcome};
//!
//! let drop = DragEnd::ticket(DragLocation::new("lead", 0), DragLocation::new("won", 0));
//! if let ReorderOutcome::Reordered(batch) = board.apply_drag(&drop) {
//!     store.save_ordered_batch(batch);
//! }
//! ```

mod model;
mod ordered;
mod reorder;

pub use model::{Lane, LaneDetails, Tag, Ticket};
pub use ordered::{is_contiguous, move_within, renumber, sort_by_order, Ordered};
pub use reorder::{
    reorder, DragEnd, DragLocation, EntityKind, OrderedBatch, PipelineBoard, ReorderOutcome,
    LANES_DROPPABLE_ID,
};
