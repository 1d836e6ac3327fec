//! # Funnelcraft Editor
//!
//! State engine for the visual funnel page editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI: drag/drop, clicks, toolbar              │
//! └─────────────────────────────────────────────┘
//!                     ↓ EditorAction
//! ┌─────────────────────────────────────────────┐
//! │ state: action dispatcher                    │
//! │  - Route by tag to one handler              │
//! │  - Record snapshots, undo/redo              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: add / update / delete by id      │
//! │ element: typed page tree                    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every mutation returns a new tree
//! 2. **Snapshots, not inverses**: history stores whole editor states
//! 3. **Total dispatch**: bad ids and guard failures leave state unchanged
//!
//! ## Usage
//!
//! ```rust,ignore
//! use funnelcraft_editor::{EditorAction, EditorState, ElementTemplate, BODY_ID};
//! use funnelcraft_common::IdGenerator;
//!
//! let mut state = EditorState::new();
//! let mut ids = IdGenerator::random();
//!
//! state.dispatch(EditorAction::AddElement {
//!     container_id: BODY_ID.into(),
//!     element: ElementTemplate::Text.build(&mut ids),
//! });
//! state.dispatch(EditorAction::Undo);
//! ```

mod actions;
mod element;
mod errors;
mod history;
mod mutations;
mod state;
mod templates;
pub mod tree;
mod visitor;

pub use actions::{ActionTag, EditorAction};
pub use element::{
    find_in, find_in_mut, EditorElement, ElementContent, ElementId, ElementType, Styles, BODY_ID,
};
pub use errors::{EditorError, TreeError};
pub use history::History;
pub use mutations::{add_element, delete_element, update_element, MutationError, TreeMutation};
pub use state::{reduce, Device, Editor, EditorState};
pub use templates::{default_styles, ElementTemplate, DEFAULT_VIDEO_SRC};
pub use visitor::{walk_element, walk_elements, Visitor};
