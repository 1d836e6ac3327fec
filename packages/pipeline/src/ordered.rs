//! Positional primitives shared by lanes and tickets

use crate::model::{Lane, LaneDetails, Ticket};

/// An entity whose persisted `order` mirrors its index in a collection
pub trait Ordered {
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

impl Ordered for Lane {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl Ordered for LaneDetails {
    fn order(&self) -> u32 {
        self.lane.order
    }

    fn set_order(&mut self, order: u32) {
        self.lane.order = order;
    }
}

impl Ordered for Ticket {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// Set every item's order to its index
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as u32);
    }
}

/// Move the item at `from` so it lands at `to` (clamped to the last slot)
///
/// Returns false and leaves `items` untouched when `from` is out of range.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }

    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    true
}

/// Whether orders are exactly `0..len` in sequence
pub fn is_contiguous<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.order() == index as u32)
}

/// Stable sort by persisted order
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}
