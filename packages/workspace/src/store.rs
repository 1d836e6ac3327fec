//! Persistence collaborators
//!
//! The editor and pipeline cores never await these. Sessions spawn the
//! returned futures, so every future is `Send + 'static` and owns its inputs.

use crate::error::StoreResult;
use funnelcraft_editor::EditorElement;
use funnelcraft_pipeline::{OrderedBatch, PipelineBoard};
use futures::future::BoxFuture;

/// Loads and saves page trees by page id
pub trait PageStore: Send + Sync {
    /// `None` when the page has never been saved
    fn load_tree(&self, page_id: &str) -> BoxFuture<'static, StoreResult<Option<Vec<EditorElement>>>>;

    fn save_tree(&self, page_id: &str, elements: Vec<EditorElement>) -> BoxFuture<'static, StoreResult<()>>;
}

/// Persists lane and ticket positions
pub trait OrderStore: Send + Sync {
    /// Lanes of a pipeline with their tickets, in persisted order
    fn load_board(&self, pipeline_id: &str) -> BoxFuture<'static, StoreResult<PipelineBoard>>;

    /// Write every entity in the batch; entities not in the batch are untouched
    fn save_ordered_batch(&self, batch: OrderedBatch) -> BoxFuture<'static, StoreResult<()>>;
}
