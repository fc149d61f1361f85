//! Ownership-tracked node arena.
//!
//! Nodes live in a dense slot vector addressed by [`NodeId`]. Slot 0 is
//! the tree's nil sentinel, allocated at construction and never
//! reclaimed. Deleted slots go onto a free list and are reused by later
//! insertions; rotations only reassign ids and never allocate or free.
//!
//! Occupancy doubles as membership tracking: an id pointing at a vacant
//! slot identifies a deleted (or never-issued) node, which lets the trees
//! reject stale operands instead of corrupting structure.

use std::ops::{Index, IndexMut};

use crate::error::Error;
use crate::types::NodeId;

enum Slot<N> {
    Occupied(N),
    Vacant,
}

pub(crate) struct Arena<N> {
    slots: Vec<Slot<N>>,
    free: Vec<u32>,
    live: usize,
}

impl<N> Arena<N> {
    /// Creates an arena holding only the sentinel at slot 0.
    pub(crate) fn new(sentinel: N) -> Result<Self, Error> {
        let mut slots = Vec::new();
        slots.try_reserve(1).map_err(|_| Error::Allocation)?;
        slots.push(Slot::Occupied(sentinel));
        Ok(Self {
            slots,
            free: Vec::new(),
            live: 0,
        })
    }

    /// Allocates a slot for `node`, reusing the free list when possible.
    ///
    /// The tree is not touched on failure; construction happens entirely
    /// off to the side.
    pub(crate) fn try_alloc(&mut self, node: N) -> Result<NodeId, Error> {
        if let Some(idx) = self.free.pop() {
            self.slots[idx as usize] = Slot::Occupied(node);
            self.live += 1;
            return Ok(NodeId(idx));
        }
        if self.slots.len() > u32::MAX as usize {
            return Err(Error::Allocation);
        }
        self.slots.try_reserve(1).map_err(|_| Error::Allocation)?;
        let idx = self.slots.len() as u32;
        self.slots.push(Slot::Occupied(node));
        self.live += 1;
        Ok(NodeId(idx))
    }

    /// Returns the payload slot to the free list.
    pub(crate) fn free(&mut self, id: NodeId) -> N {
        debug_assert!(!id.is_nil(), "sentinel is never reclaimed");
        match std::mem::replace(&mut self.slots[id.index()], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.free.push(id.0);
                self.live -= 1;
                node
            }
            Slot::Vacant => unreachable!("double free caught by membership check"),
        }
    }

    /// True iff `id` addresses a live non-sentinel node.
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        !id.is_nil()
            && id.index() < self.slots.len()
            && matches!(self.slots[id.index()], Slot::Occupied(_))
    }

    /// Live node count, sentinel excluded.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Drops every node except the sentinel, which is reset to `sentinel`.
    pub(crate) fn clear(&mut self, sentinel: N) {
        self.slots.truncate(1);
        self.slots[0] = Slot::Occupied(sentinel);
        self.free.clear();
        self.live = 0;
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("access to freed node {:?}", id),
        }
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("access to freed node {:?}", id),
        }
    }
}
