//! # Drag-and-drop Reorder
//!
//! Applies a finished drag to a pipeline board and produces the batch of
//! renumbered entities that has to be persisted.
//!
//! ## Semantics
//!
//! - No destination, or a drop onto the source slot: nothing changes
//! - Lane drag: move the lane, renumber every lane
//! - Ticket drag inside a lane: move it, renumber that lane
//! - Ticket drag across lanes: remove from the source lane and renumber it,
//!   insert into the destination lane (reassigning `lane_id`) and renumber it.
//!   The batch holds destination tickets followed by source tickets
//!
//! Destination indexes past the end are clamped. Unknown lanes and
//! out-of-range source indexes leave the board unchanged.

use crate::model::{Lane, LaneDetails, Ticket};
use crate::ordered::{move_within, renumber, sort_by_order};
use serde::{Deserialize, Serialize};

/// Droppable id used for the lane strip
pub const LANES_DROPPABLE_ID: &str = "lanes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Lane,
    Ticket,
}

/// One end of a drag: a droppable and a slot inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    #[serde(rename = "droppableId", alias = "containerId")]
    pub container_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// Result of a finished drag as reported by the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

impl DragEnd {
    pub fn lane(from: usize, to: usize) -> Self {
        Self {
            kind: EntityKind::Lane,
            source: DragLocation::new(LANES_DROPPABLE_ID, from),
            destination: Some(DragLocation::new(LANES_DROPPABLE_ID, to)),
        }
    }

    pub fn ticket(source: DragLocation, destination: DragLocation) -> Self {
        Self {
            kind: EntityKind::Ticket,
            source,
            destination: Some(destination),
        }
    }

    /// Dropped outside any droppable, or back where it started
    pub fn is_noop(&self) -> bool {
        match &self.destination {
            None => true,
            Some(destination) => destination == &self.source,
        }
    }
}

/// Renumbered entities to persist, in write order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "items", rename_all = "lowercase")]
pub enum OrderedBatch {
    Lanes(Vec<Lane>),
    Tickets(Vec<Ticket>),
}

impl OrderedBatch {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            OrderedBatch::Lanes(_) => EntityKind::Lane,
            OrderedBatch::Tickets(_) => EntityKind::Ticket,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OrderedBatch::Lanes(lanes) => lanes.len(),
            OrderedBatch::Tickets(tickets) => tickets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    Unchanged,
    Reordered(OrderedBatch),
}

impl ReorderOutcome {
    pub fn batch(&self) -> Option<&OrderedBatch> {
        match self {
            ReorderOutcome::Unchanged => None,
            ReorderOutcome::Reordered(batch) => Some(batch),
        }
    }

    pub fn into_batch(self) -> Option<OrderedBatch> {
        match self {
            ReorderOutcome::Unchanged => None,
            ReorderOutcome::Reordered(batch) => Some(batch),
        }
    }
}

/// Lanes of one pipeline, each with its tickets, all in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BoardFile")]
pub struct PipelineBoard {
    pub pipeline_id: String,
    pub lanes: Vec<LaneDetails>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardFile {
    pipeline_id: String,
    #[serde(default)]
    lanes: Vec<LaneDetails>,
}

impl From<BoardFile> for PipelineBoard {
    fn from(file: BoardFile) -> Self {
        PipelineBoard::new(file.pipeline_id, file.lanes)
    }
}

impl PipelineBoard {
    /// Arrange lanes and tickets by their persisted order
    pub fn new(pipeline_id: impl Into<String>, mut lanes: Vec<LaneDetails>) -> Self {
        sort_by_order(&mut lanes);
        for lane in &mut lanes {
            sort_by_order(&mut lane.tickets);
        }

        Self {
            pipeline_id: pipeline_id.into(),
            lanes,
        }
    }

    pub fn lane(&self, lane_id: &str) -> Option<&LaneDetails> {
        self.lanes.iter().find(|lane| lane.id() == lane_id)
    }

    fn lane_position(&self, lane_id: &str) -> Option<usize> {
        self.lanes.iter().position(|lane| lane.id() == lane_id)
    }

    pub fn ticket(&self, ticket_id: &str) -> Option<&Ticket> {
        self.lanes
            .iter()
            .flat_map(|lane| &lane.tickets)
            .find(|ticket| ticket.id == ticket_id)
    }

    pub fn ticket_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.tickets.len()).sum()
    }

    /// Apply a finished drag in place
    pub fn apply_drag(&mut self, drop: &DragEnd) -> ReorderOutcome {
        let Some(destination) = drop.destination.as_ref().filter(|_| !drop.is_noop()) else {
            return ReorderOutcome::Unchanged;
        };

        let outcome = match drop.kind {
            EntityKind::Lane => self.move_lane(drop.source.index, destination.index),
            EntityKind::Ticket => self.move_ticket(&drop.source, destination),
        };

        match &outcome {
            ReorderOutcome::Unchanged => {
                tracing::debug!(kind = ?drop.kind, source = ?drop.source, "drag ignored");
            }
            ReorderOutcome::Reordered(batch) => {
                tracing::debug!(kind = ?batch.entity_kind(), count = batch.len(), "board reordered");
            }
        }
        outcome
    }

    fn move_lane(&mut self, from: usize, to: usize) -> ReorderOutcome {
        if !move_within(&mut self.lanes, from, to) {
            return ReorderOutcome::Unchanged;
        }
        renumber(&mut self.lanes);

        let lanes = self.lanes.iter().map(|lane| lane.lane.clone()).collect();
        ReorderOutcome::Reordered(OrderedBatch::Lanes(lanes))
    }

    fn move_ticket(&mut self, source: &DragLocation, destination: &DragLocation) -> ReorderOutcome {
        let (Some(from_lane), Some(to_lane)) = (
            self.lane_position(&source.container_id),
            self.lane_position(&destination.container_id),
        ) else {
            return ReorderOutcome::Unchanged;
        };

        if from_lane == to_lane {
            let tickets = &mut self.lanes[from_lane].tickets;
            if !move_within(tickets, source.index, destination.index) {
                return ReorderOutcome::Unchanged;
            }
            renumber(tickets);
            return ReorderOutcome::Reordered(OrderedBatch::Tickets(tickets.clone()));
        }

        let origin = &mut self.lanes[from_lane].tickets;
        if source.index >= origin.len() {
            return ReorderOutcome::Unchanged;
        }
        let mut ticket = origin.remove(source.index);
        renumber(origin);

        let target = &mut self.lanes[to_lane];
        ticket.lane_id = target.lane.id.clone();
        let index = destination.index.min(target.tickets.len());
        target.tickets.insert(index, ticket);
        renumber(&mut target.tickets);

        let mut batch = self.lanes[to_lane].tickets.clone();
        batch.extend(self.lanes[from_lane].tickets.iter().cloned());
        ReorderOutcome::Reordered(OrderedBatch::Tickets(batch))
    }
}

/// Apply a drag to a board value, returning the new board and the batch
pub fn reorder(mut board: PipelineBoard, drop: &DragEnd) -> (PipelineBoard, ReorderOutcome) {
    let outcome = board.apply_drag(drop);
    (board, outcome)
}
