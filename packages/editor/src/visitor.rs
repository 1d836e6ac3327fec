use crate::element::EditorElement;

/// Visitor pattern for traversing element trees immutably
///
/// The default implementation walks the entire tree depth-first, parents
/// before children. Override `visit_element` to act on nodes; call
/// `walk_element` from the override to keep descending.
pub trait Visitor: Sized {
    fn visit_element(&mut self, element: &EditorElement) {
        walk_element(self, element);
    }
}

pub fn walk_elements<V: Visitor>(visitor: &mut V, elements: &[EditorElement]) {
    for element in elements {
        visitor.visit_element(element);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &EditorElement) {
    if let Some(children) = element.children() {
        walk_elements(visitor, children);
    }
}
