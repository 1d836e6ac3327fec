//! Error types for the editor

use crate::element::{ElementId, ElementType};
use crate::mutations::MutationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid tree: {0}")]
    Tree(#[from] TreeError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown element template: {0}")]
    UnknownTemplate(String),
}

/// Structural problems found in a loaded or decoded tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Tree has no body root")]
    MissingBody,

    #[error("Expected a single top-level body element, found {0} top-level elements")]
    MultipleRoots(usize),

    #[error("Body element {0} is nested inside the tree")]
    NestedBody(ElementId),

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("Invalid content for {element_type} element {id}: {reason}")]
    InvalidContent {
        id: ElementId,
        element_type: ElementType,
        reason: String,
    },
}
