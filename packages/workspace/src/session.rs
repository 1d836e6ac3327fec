//! # Sessions
//!
//! One mutable state per open editor page or pipeline board.
//!
//! State is updated optimistically and synchronously. Persistence runs on a
//! spawned task: the session never awaits it and never rolls back. A failed
//! save becomes an error notification.
//!
//! Saving spawns onto the current tokio runtime, so `save` and
//! `on_drag_end` must be called from within one.

use crate::error::StoreResult;
use crate::notify::Notifier;
use crate::store::{OrderStore, PageStore};
use funnelcraft_editor::{tree, Editor, EditorAction, EditorState};
use funnelcraft_pipeline::{DragEnd, PipelineBoard, ReorderOutcome};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Editing session for a single funnel page
pub struct EditorSession {
    state: EditorState,
    store: Arc<dyn PageStore>,
    notifier: Notifier,
}

impl EditorSession {
    /// Load a page (or start from an empty body) and prime the editor
    pub async fn open(
        store: Arc<dyn PageStore>,
        notifier: Notifier,
        page_id: &str,
        live: bool,
        history_limit: usize,
    ) -> StoreResult<Self> {
        let elements = store.load_tree(page_id).await?;
        tracing::info!(page_id, found = elements.is_some(), "opening editor session");

        let mut state = EditorState::with_history_limit(history_limit);
        state.dispatch(EditorAction::SetFunnelPageId {
            page_id: page_id.to_string(),
        });
        state.dispatch(EditorAction::LoadData {
            elements,
            with_live: live,
        });

        Ok(Self {
            state,
            store,
            notifier,
        })
    }

    pub fn dispatch(&mut self, action: EditorAction) {
        self.state.dispatch(action);
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn editor(&self) -> &Editor {
        self.state.editor()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Persist the displayed tree in the background
    pub fn save(&self) -> JoinHandle<()> {
        let editor = self.state.editor();
        let page_id = editor.page_id.clone();
        let node_count = tree::node_count(&editor.elements);
        let save = self.store.save_tree(&page_id, editor.elements.clone());
        let notifier = self.notifier.clone();

        tokio::spawn(async move {
            match save.await {
                Ok(()) => {
                    tracing::info!(page_id = %page_id, node_count, "page saved");
                    notifier.info("Success", "Saved Editor");
                }
                Err(e) => {
                    tracing::warn!(page_id = %page_id, error = %e, "page save failed");
                    notifier.error("Oops!", format!("Could not save editor: {}", e));
                }
            }
        })
    }
}

/// Drag-and-drop session for one pipeline board
pub struct PipelineSession {
    board: PipelineBoard,
    store: Arc<dyn OrderStore>,
    notifier: Notifier,
}

impl PipelineSession {
    pub fn new(board: PipelineBoard, store: Arc<dyn OrderStore>, notifier: Notifier) -> Self {
        Self {
            board,
            store,
            notifier,
        }
    }

    pub async fn open(
        store: Arc<dyn OrderStore>,
        notifier: Notifier,
        pipeline_id: &str,
    ) -> StoreResult<Self> {
        let board = store.load_board(pipeline_id).await?;
        tracing::info!(pipeline_id, lanes = board.lanes.len(), "opening pipeline session");
        Ok(Self::new(board, store, notifier))
    }

    pub fn board(&self) -> &PipelineBoard {
        &self.board
    }

    /// Apply the drag locally, then persist the renumbered batch in the background
    ///
    /// Returns the save task, or `None` when the drag changed nothing.
    pub fn on_drag_end(&mut self, drop: &DragEnd) -> Option<JoinHandle<()>> {
        let ReorderOutcome::Reordered(batch) = self.board.apply_drag(drop) else {
            return None;
        };

        let kind = batch.entity_kind();
        let count = batch.len();
        let save = self.store.save_ordered_batch(batch);
        let notifier = self.notifier.clone();

        Some(tokio::spawn(async move {
            match save.await {
                Ok(()) => tracing::debug!(?kind, count, "order saved"),
                Err(e) => {
                    tracing::warn!(?kind, error = %e, "order save failed");
                    notifier.error("Oops!", format!("Could not save the new order: {}", e));
                }
            }
        }))
    }
}
