//! In-process store, shared between clones

use crate::error::{StoreError, StoreResult};
use crate::store::{OrderStore, PageStore};
use funnelcraft_editor::EditorElement;
use funnelcraft_pipeline::{Lane, LaneDetails, OrderedBatch, PipelineBoard, Ticket};
use futures::future::{BoxFuture, FutureExt};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    pages: HashMap<String, Vec<EditorElement>>,
    lanes: BTreeMap<String, Lane>,
    tickets: BTreeMap<String, Ticket>,
    batches: Vec<OrderedBatch>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with [`StoreError::Unavailable`]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn insert_page(&self, page_id: impl Into<String>, elements: Vec<EditorElement>) {
        self.tables.write().await.pages.insert(page_id.into(), elements);
    }

    pub async fn page(&self, page_id: &str) -> Option<Vec<EditorElement>> {
        self.tables.read().await.pages.get(page_id).cloned()
    }

    /// Seed lanes and tickets from a board
    pub async fn insert_board(&self, board: &PipelineBoard) {
        let mut tables = self.tables.write().await;
        for details in &board.lanes {
            tables.lanes.insert(details.lane.id.clone(), details.lane.clone());
            for ticket in &details.tickets {
                tables.tickets.insert(ticket.id.clone(), ticket.clone());
            }
        }
    }

    /// Every batch written so far, oldest first
    pub async fn batches(&self) -> Vec<OrderedBatch> {
        self.tables.read().await.batches.clone()
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

impl PageStore for MemoryStore {
    fn load_tree(&self, page_id: &str) -> BoxFuture<'static, StoreResult<Option<Vec<EditorElement>>>> {
        let store = self.clone();
        let page_id = page_id.to_string();
        async move { Ok(store.page(&page_id).await) }.boxed()
    }

    fn save_tree(&self, page_id: &str, elements: Vec<EditorElement>) -> BoxFuture<'static, StoreResult<()>> {
        let store = self.clone();
        let page_id = page_id.to_string();
        async move {
            store.check_writable()?;
            store.insert_page(page_id, elements).await;
            Ok(())
        }
        .boxed()
    }
}

impl OrderStore for MemoryStore {
    fn load_board(&self, pipeline_id: &str) -> BoxFuture<'static, StoreResult<PipelineBoard>> {
        let store = self.clone();
        let pipeline_id = pipeline_id.to_string();
        async move {
            let tables = store.tables.read().await;
            Ok(assemble_board(
                &pipeline_id,
                tables.lanes.values(),
                tables.tickets.values(),
            ))
        }
        .boxed()
    }

    fn save_ordered_batch(&self, batch: OrderedBatch) -> BoxFuture<'static, StoreResult<()>> {
        let store = self.clone();
        async move {
            store.check_writable()?;

            let mut tables = store.tables.write().await;
            match &batch {
                OrderedBatch::Lanes(lanes) => {
                    for lane in lanes {
                        tables.lanes.insert(lane.id.clone(), lane.clone());
                    }
                }
                OrderedBatch::Tickets(tickets) => {
                    for ticket in tickets {
                        tables.tickets.insert(ticket.id.clone(), ticket.clone());
                    }
                }
            }
            tables.batches.push(batch);
            Ok(())
        }
        .boxed()
    }
}

/// Group tickets under the lanes of one pipeline
pub(crate) fn assemble_board<'a>(
    pipeline_id: &str,
    lanes: impl Iterator<Item = &'a Lane>,
    tickets: impl Iterator<Item = &'a Ticket> + Clone,
) -> PipelineBoard {
    let lanes = lanes
        .filter(|lane| lane.pipeline_id == pipeline_id)
        .map(|lane| LaneDetails {
            lane: lane.clone(),
            tickets: tickets
                .clone()
                .filter(|ticket| ticket.lane_id == lane.id)
                .cloned()
                .collect(),
        })
        .collect();

    PipelineBoard::new(pipeline_id, lanes)
}
