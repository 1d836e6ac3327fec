//! # Tree Mutations
//!
//! Structural operations on a page tree, addressed by element id.
//!
//! ## Semantics
//!
//! ### AddElement
//! - Appends the element to the children of the container with the given id
//! - Target must be container-like
//! - The new subtree may not reuse an id already in the tree, and may not
//!   contain a body
//!
//! ### UpdateElement
//! - Replaces the node with the same id wholesale (name, styles, type, content)
//! - The body root stays a body; nothing else may become one
//! - The replacement subtree may not reuse ids from elsewhere in the tree
//!
//! ### DeleteElement
//! - Removes the node and all of its descendants
//! - The body root cannot be deleted
//!
//! `apply` is total: a mutation that fails validation leaves the tree
//! unchanged. `try_apply` reports why instead.

use crate::element::{find_in, find_in_mut, EditorElement, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Structural mutation of a page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeMutation {
    /// Append an element to a container's children
    AddElement {
        container_id: ElementId,
        element: EditorElement,
    },

    /// Replace an element (matched by id)
    UpdateElement { element: EditorElement },

    /// Remove an element and its subtree
    DeleteElement { element_id: ElementId },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Container not found: {0}")]
    ContainerNotFound(ElementId),

    #[error("Element {0} cannot have children")]
    NotAContainer(ElementId),

    #[error("Node not found: {0}")]
    NodeNotFound(ElementId),

    #[error("The body root cannot be removed")]
    ProtectedRoot,

    #[error("Body element {0} can only be the page root")]
    BodyMisplaced(ElementId),

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),
}

impl TreeMutation {
    pub fn name(&self) -> &'static str {
        match self {
            TreeMutation::AddElement { .. } => "AddElement",
            TreeMutation::UpdateElement { .. } => "UpdateElement",
            TreeMutation::DeleteElement { .. } => "DeleteElement",
        }
    }

    /// Apply to a copy of the tree; the input is never modified
    ///
    /// A mutation that fails validation returns an identical tree.
    pub fn apply(&self, elements: &[EditorElement]) -> Vec<EditorElement> {
        let mut next = elements.to_vec();
        if let Err(e) = self.try_apply(&mut next) {
            tracing::debug!(mutation = self.name(), error = %e, "mutation skipped");
        }
        next
    }

    /// Apply in place with validation
    pub fn try_apply(&self, elements: &mut Vec<EditorElement>) -> Result<(), MutationError> {
        self.validate(elements)?;

        match self {
            TreeMutation::AddElement {
                container_id,
                element,
            } => Self::apply_add(elements, container_id, element),
            TreeMutation::UpdateElement { element } => Self::apply_update(elements, element),
            TreeMutation::DeleteElement { element_id } => Self::apply_delete(elements, element_id),
        }
    }

    /// Validate without applying
    pub fn validate(&self, elements: &[EditorElement]) -> Result<(), MutationError> {
        match self {
            TreeMutation::AddElement {
                container_id,
                element,
            } => {
                let container = find_in(elements, container_id)
                    .ok_or_else(|| MutationError::ContainerNotFound(container_id.clone()))?;

                if !container.is_container() {
                    return Err(MutationError::NotAContainer(container_id.clone()));
                }

                check_no_body(element)?;
                check_fresh_ids(elements, None, element)
            }

            TreeMutation::UpdateElement { element } => {
                let target = find_in(elements, &element.id)
                    .ok_or_else(|| MutationError::NodeNotFound(element.id.clone()))?;

                if target.is_body() {
                    // Root keeps its type; its children follow the usual rules
                    if !element.is_body() {
                        return Err(MutationError::BodyMisplaced(element.id.clone()));
                    }
                    for child in element.children().unwrap_or_default() {
                        check_no_body(child)?;
                    }
                } else {
                    check_no_body(element)?;
                }

                check_fresh_ids(elements, Some(target), element)
            }

            TreeMutation::DeleteElement { element_id } => {
                if elements.iter().any(|root| root.is_body() && &root.id == element_id) {
                    return Err(MutationError::ProtectedRoot);
                }

                find_in(elements, element_id)
                    .ok_or_else(|| MutationError::NodeNotFound(element_id.clone()))?;
                Ok(())
            }
        }
    }

    fn apply_add(
        elements: &mut [EditorElement],
        container_id: &ElementId,
        element: &EditorElement,
    ) -> Result<(), MutationError> {
        let container = find_in_mut(elements, container_id)
            .ok_or_else(|| MutationError::ContainerNotFound(container_id.clone()))?;

        let children = container
            .children_mut()
            .ok_or_else(|| MutationError::NotAContainer(container_id.clone()))?;
        children.push(element.clone());
        Ok(())
    }

    fn apply_update(
        elements: &mut [EditorElement],
        element: &EditorElement,
    ) -> Result<(), MutationError> {
        let target = find_in_mut(elements, &element.id)
            .ok_or_else(|| MutationError::NodeNotFound(element.id.clone()))?;
        *target = element.clone();
        Ok(())
    }

    fn apply_delete(
        elements: &mut Vec<EditorElement>,
        element_id: &ElementId,
    ) -> Result<(), MutationError> {
        if remove_from(elements, element_id) {
            Ok(())
        } else {
            Err(MutationError::NodeNotFound(element_id.clone()))
        }
    }
}

/// Add `element` to the container with `container_id`
pub fn add_element(
    elements: &[EditorElement],
    container_id: &ElementId,
    element: &EditorElement,
) -> Vec<EditorElement> {
    TreeMutation::AddElement {
        container_id: container_id.clone(),
        element: element.clone(),
    }
    .apply(elements)
}

/// Replace the element with the same id as `element`
pub fn update_element(elements: &[EditorElement], element: &EditorElement) -> Vec<EditorElement> {
    TreeMutation::UpdateElement {
        element: element.clone(),
    }
    .apply(elements)
}

/// Remove the element with `element_id` and its subtree
pub fn delete_element(elements: &[EditorElement], element_id: &ElementId) -> Vec<EditorElement> {
    TreeMutation::DeleteElement {
        element_id: element_id.clone(),
    }
    .apply(elements)
}

fn remove_from(elements: &mut Vec<EditorElement>, target_id: &ElementId) -> bool {
    if let Some(pos) = elements.iter().position(|e| &e.id == target_id) {
        elements.remove(pos);
        return true;
    }

    elements
        .iter_mut()
        .filter_map(EditorElement::children_mut)
        .any(|children| remove_from(children, target_id))
}

fn check_no_body(element: &EditorElement) -> Result<(), MutationError> {
    if element.is_body() {
        return Err(MutationError::BodyMisplaced(element.id.clone()));
    }

    for child in element.children().unwrap_or_default() {
        check_no_body(child)?;
    }
    Ok(())
}

/// Ids in `incoming` must be unique among themselves and unused in the tree,
/// ignoring the subtree `replacing` (which is about to be swapped out)
fn check_fresh_ids(
    elements: &[EditorElement],
    replacing: Option<&EditorElement>,
    incoming: &EditorElement,
) -> Result<(), MutationError> {
    let replaced: HashSet<&ElementId> = replacing.map(|r| r.ids()).unwrap_or_default().into_iter().collect();
    let existing: HashSet<&ElementId> = elements
        .iter()
        .flat_map(EditorElement::ids)
        .filter(|id| !replaced.contains(id))
        .collect();

    let mut seen = HashSet::new();
    for id in incoming.ids() {
        if existing.contains(id) || !seen.insert(id) {
            return Err(MutationError::DuplicateId(id.clone()));
        }
    }
    Ok(())
}
