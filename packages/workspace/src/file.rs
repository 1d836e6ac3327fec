//! JSON files under a data directory
//!
//! ```text
//! <root>/pages/<page_id>.json   page tree
//! <root>/lanes.json             every lane, merged by id
//! <root>/tickets.json           every ticket, merged by id
//! ```

use crate::error::{StoreError, StoreResult};
use crate::memory::assemble_board;
use crate::store::{OrderStore, PageStore};
use funnelcraft_editor::{tree, EditorElement};
use funnelcraft_pipeline::{Lane, OrderedBatch, PipelineBoard, Ticket};
use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

const LANES_FILE: &str = "lanes.json";
const TICKETS_FILE: &str = "tickets.json";

#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
    /// Serializes read-merge-write of the order files
    order_lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            order_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a page file; ids that could escape the pages directory are rejected
    pub fn page_path(&self, page_id: &str) -> StoreResult<PathBuf> {
        let valid = !page_id.is_empty()
            && page_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidPageId(page_id.to_string()));
        }
        Ok(self.root.join("pages").join(format!("{}.json", page_id)))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Replace entries by id, keep everything else
async fn merge_by_id<T, F>(path: &Path, items: &[T], id: F) -> StoreResult<()>
where
    T: Serialize + DeserializeOwned + Clone,
    F: Fn(&T) -> String,
{
    let existing: Vec<T> = read_json(path).await?.unwrap_or_default();
    let mut merged: BTreeMap<String, T> = existing
        .into_iter()
        .map(|item| (id(&item), item))
        .collect();

    for item in items {
        merged.insert(id(item), item.clone());
    }

    let merged: Vec<&T> = merged.values().collect();
    write_json(path, &merged).await
}

impl PageStore for FileStore {
    fn load_tree(&self, page_id: &str) -> BoxFuture<'static, StoreResult<Option<Vec<EditorElement>>>> {
        let path = self.page_path(page_id);
        async move {
            let Some(elements) = read_json::<Vec<EditorElement>>(&path?).await? else {
                return Ok(None);
            };
            tree::validate(&elements)?;
            Ok(Some(elements))
        }
        .boxed()
    }

    fn save_tree(&self, page_id: &str, elements: Vec<EditorElement>) -> BoxFuture<'static, StoreResult<()>> {
        let path = self.page_path(page_id);
        async move { write_json(&path?, &elements).await }.boxed()
    }
}

impl OrderStore for FileStore {
    fn load_board(&self, pipeline_id: &str) -> BoxFuture<'static, StoreResult<PipelineBoard>> {
        let store = self.clone();
        let pipeline_id = pipeline_id.to_string();
        async move {
            let lanes: Vec<Lane> = read_json(&store.root.join(LANES_FILE)).await?.unwrap_or_default();
            let tickets: Vec<Ticket> = read_json(&store.root.join(TICKETS_FILE)).await?.unwrap_or_default();
            Ok(assemble_board(&pipeline_id, lanes.iter(), tickets.iter()))
        }
        .boxed()
    }

    fn save_ordered_batch(&self, batch: OrderedBatch) -> BoxFuture<'static, StoreResult<()>> {
        let store = self.clone();
        async move {
            let _guard = store.order_lock.lock().await;
            match &batch {
                OrderedBatch::Lanes(lanes) => {
                    merge_by_id(&store.root.join(LANES_FILE), lanes, |lane: &Lane| lane.id.clone()).await
                }
                OrderedBatch::Tickets(tickets) => {
                    merge_by_id(&store.root.join(TICKETS_FILE), tickets, |ticket: &Ticket| {
                        ticket.id.clone()
                    })
                    .await
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnelcraft_editor::{ElementContent, TreeError};
    use funnelcraft_pipeline::LaneDetails;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_page_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.load_tree("home").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_page_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let mut body = EditorElement::body();
        body.children_mut().unwrap().push(EditorElement::new(
            "t1",
            "Text",
            ElementContent::Text {
                inner_text: "Hello".to_string(),
            },
        ));
        let elements = vec![body];

        store.save_tree("home", elements.clone()).await.unwrap();

        assert!(dir.path().join("pages/home.json").exists());
        assert_eq!(store.load_tree("home").await.unwrap(), Some(elements));
    }

    #[tokio::test]
    async fn test_invalid_page_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.save_tree("broken", vec![]).await.unwrap();

        let result = store.load_tree("broken").await;
        assert!(matches!(result, Err(StoreError::InvalidTree(TreeError::MissingBody))));
    }

    #[tokio::test]
    async fn test_page_id_cannot_escape() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let result = store.save_tree("../outside", vec![EditorElement::body()]).await;
        assert!(matches!(result, Err(StoreError::InvalidPageId(_))));
    }

    #[tokio::test]
    async fn test_ordered_batches_merge() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let a = Lane::new("A", "Lead", "p1", 0);
        let b = Lane::new("B", "Won", "p1", 1);
        store
            .save_ordered_batch(OrderedBatch::Lanes(vec![a.clone(), b]))
            .await
            .unwrap();
        store
            .save_ordered_batch(OrderedBatch::Tickets(vec![Ticket::new("t1", "One", "B")]))
            .await
            .unwrap();

        // Partial batch only rewrites the lanes it names
        let mut moved = a.clone();
        moved.order = 2;
        store
            .save_ordered_batch(OrderedBatch::Lanes(vec![moved]))
            .await
            .unwrap();

        let board = store.load_board("p1").await.unwrap();
        let ids: Vec<_> = board.lanes.iter().map(LaneDetails::id).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(board.lane("B").unwrap().tickets[0].id, "t1");
    }
}
