//! Kanban entities: lanes, tickets and tags
//!
//! `order` is the entity's position inside its owning collection (lanes
//! inside a pipeline, tickets inside a lane).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub id: String,
    pub name: String,
    pub pipeline_id: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub name: String,
    pub lane_id: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, alias = "Tags")]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl Ticket {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lane_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lane_id: lane_id.into(),
            order: 0,
            description: None,
            value: None,
            tags: Vec::new(),
            assigned_user_id: None,
            customer_id: None,
        }
    }
}

/// A lane together with the tickets it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneDetails {
    #[serde(flatten)]
    pub lane: Lane,
    #[serde(default, alias = "Tickets")]
    pub tickets: Vec<Ticket>,
}

impl LaneDetails {
    pub fn new(lane: Lane) -> Self {
        Self {
            lane,
            tickets: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.lane.id
    }

    /// Append a ticket, taking ownership and the next position
    pub fn with_ticket(mut self, mut ticket: Ticket) -> Self {
        ticket.lane_id = self.lane.id.clone();
        ticket.order = self.tickets.len() as u32;
        self.tickets.push(ticket);
        self
    }
}

impl Lane {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pipeline_id: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pipeline_id: pipeline_id.into(),
            order,
            color: None,
        }
    }
}
