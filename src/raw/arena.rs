use alloc::vec::Vec;

use super::handle::Handle;

/// Backing store for tree nodes.
///
/// [`insert`](Arena::insert) places a node and names it with a [`Handle`];
/// [`remove`](Arena::remove) hands the node back by value and parks the slot
/// for the next insert. A handle is valid from its insert until its remove.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    cells: Vec<Option<T>>,
    /// Emptied cells, most recently emptied last.
    vacant: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            cells: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Reserves room for `capacity` nodes up front.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    /// Nodes currently stored.
    pub(crate) const fn len(&self) -> usize {
        self.cells.len() - self.vacant.len()
    }

    pub(crate) fn insert(&mut self, node: T) -> Handle {
        if let Some(handle) = self.vacant.pop() {
            self.cells[handle.slot()] = Some(node);
            return handle;
        }

        let slot = self.cells.len();
        assert!(slot <= Handle::MAX, "`Arena::insert()` - all {} slots are in use!", Handle::MAX + 1);
        self.cells.push(Some(node));
        Handle::new(slot)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.cells[handle.slot()].as_ref().expect("`Arena::get()` - `handle` names an empty slot!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.cells[handle.slot()].as_mut().expect("`Arena::get_mut()` - `handle` names an empty slot!")
    }

    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let node = self.cells[handle.slot()].take().expect("`Arena::remove()` - `handle` names an empty slot!");
        self.vacant.push(handle);
        node
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
        self.vacant.clear();
    }
}
