//! # Page tree validation and storage encoding
//!
//! A well-formed page is a list holding exactly one top-level body element,
//! with ids unique across the whole tree. Trees that come from storage are
//! checked here before the editor accepts them.

use crate::element::{EditorElement, ElementId};
use crate::errors::{EditorError, TreeError};
use crate::visitor::{walk_element, walk_elements, Visitor};
use std::collections::HashSet;

/// Default page content: a single empty body
pub fn default_elements() -> Vec<EditorElement> {
    vec![EditorElement::body()]
}

/// Check the structural invariants of a page tree
pub fn validate(elements: &[EditorElement]) -> Result<(), TreeError> {
    match elements {
        [] => return Err(TreeError::MissingBody),
        [root] if !root.is_body() => return Err(TreeError::MissingBody),
        [_] => {}
        _ => return Err(TreeError::MultipleRoots(elements.len())),
    }

    let mut checker = InvariantChecker::default();
    walk_elements(&mut checker, elements);

    match checker.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Decode a stored page tree and validate it
pub fn from_json(json: &str) -> Result<Vec<EditorElement>, EditorError> {
    let elements: Vec<EditorElement> = serde_json::from_str(json)?;
    validate(&elements)?;
    Ok(elements)
}

/// Encode a page tree for storage
pub fn to_json(elements: &[EditorElement]) -> Result<String, EditorError> {
    Ok(serde_json::to_string(elements)?)
}

/// Total number of nodes across all trees
pub fn node_count(elements: &[EditorElement]) -> usize {
    elements.iter().map(EditorElement::node_count).sum()
}

/// Stops at the first violation
#[derive(Default)]
struct InvariantChecker {
    seen: HashSet<ElementId>,
    depth: usize,
    error: Option<TreeError>,
}

impl Visitor for InvariantChecker {
    fn visit_element(&mut self, element: &EditorElement) {
        if self.error.is_some() {
            return;
        }

        if element.is_body() && self.depth > 0 {
            self.error = Some(TreeError::NestedBody(element.id.clone()));
            return;
        }

        if !self.seen.insert(element.id.clone()) {
            self.error = Some(TreeError::DuplicateId(element.id.clone()));
            return;
        }

        self.depth += 1;
        walk_element(self, element);
        self.depth -= 1;
    }
}
