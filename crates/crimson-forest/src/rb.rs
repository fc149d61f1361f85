//! Classical red-black tree: every node carries its own payload.

use crate::arena::Arena;
use crate::balance;
use crate::error::Error;
use crate::types::{Color, Key, NodeId, RbNode};
use crate::validate::{self, InvariantReport, InvariantViolation};

/// A red-black tree over `i64` keys with per-node payloads.
///
/// Duplicate keys are allowed; an equal key routes right, so later
/// duplicates land to the right of earlier ones. Node ids stay stable
/// across rotations and are invalidated by [`delete`](Self::delete).
///
/// Single-threaded: callers must serialize mutation externally. Readers
/// may share the tree freely (`&self` everywhere).
pub struct RbTree<V> {
    arena: Arena<RbNode<V>>,
    root: NodeId,
}

impl<V> RbTree<V> {
    /// Creates an empty tree. Fails only when the sentinel cannot be
    /// allocated.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            arena: Arena::new(RbNode::sentinel())?,
            root: NodeId::NIL,
        })
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.arena.live()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Inserts a new node and rebalances. Returns the new node's id.
    ///
    /// The node is fully constructed before any tree link is rewritten,
    /// so an allocation failure leaves the tree untouched.
    pub fn insert(&mut self, key: Key, data: Option<V>) -> Result<NodeId, Error> {
        let z = self.arena.try_alloc(RbNode::new(key, data))?;
        let mut y = NodeId::NIL;
        let mut x = self.root;
        while !x.is_nil() {
            y = x;
            x = if key < self.arena[x].key {
                self.arena[x].l
            } else {
                self.arena[x].r
            };
        }
        self.arena[z].p = y;
        if y.is_nil() {
            self.root = z;
        } else if key < self.arena[y].key {
            self.arena[y].l = z;
        } else {
            self.arena[y].r = z;
        }
        balance::insert_fixup(&mut self.arena, &mut self.root, z);
        Ok(z)
    }

    /// Removes `z` and rebalances, returning its payload.
    ///
    /// Stale ids (already deleted, never issued by this tree) are
    /// rejected with [`Error::InvalidOperand`].
    pub fn delete(&mut self, z: NodeId) -> Result<Option<V>, Error> {
        if !self.arena.contains(z) {
            return Err(Error::InvalidOperand);
        }
        let mut y = z;
        let mut removed_color = self.arena[y].color;
        let x;
        if self.arena[z].l.is_nil() {
            x = self.arena[z].r;
            balance::transplant(&mut self.arena, &mut self.root, z, x);
        } else if self.arena[z].r.is_nil() {
            x = self.arena[z].l;
            balance::transplant(&mut self.arena, &mut self.root, z, x);
        } else {
            y = balance::subtree_minimum(&self.arena, self.arena[z].r);
            removed_color = self.arena[y].color;
            x = self.arena[y].r;
            if self.arena[y].p == z {
                // x may be the sentinel; the fixup reads its parent back
                self.arena[x].p = y;
            } else {
                balance::transplant(&mut self.arena, &mut self.root, y, x);
                let zr = self.arena[z].r;
                self.arena[y].r = zr;
                self.arena[zr].p = y;
            }
            balance::transplant(&mut self.arena, &mut self.root, z, y);
            let zl = self.arena[z].l;
            self.arena[y].l = zl;
            self.arena[zl].p = y;
            let zc = self.arena[z].color;
            self.arena[y].color = zc;
        }
        if removed_color == Color::Black {
            balance::delete_fixup(&mut self.arena, &mut self.root, x);
        }
        Ok(self.arena.free(z).data)
    }

    /// Recursive search; equality anywhere on the path stops the
    /// descent.
    pub fn search(&self, key: Key) -> Option<NodeId> {
        let n = balance::search_from(&self.arena, self.root, key);
        (!n.is_nil()).then_some(n)
    }

    /// Loop form of [`search`](Self::search); identical results.
    pub fn search_iterative(&self, key: Key) -> Option<NodeId> {
        let n = balance::search_iterative_from(&self.arena, self.root, key);
        (!n.is_nil()).then_some(n)
    }

    /// Smallest-keyed node, or `None` on an empty tree.
    pub fn minimum(&self) -> Option<NodeId> {
        if self.root.is_nil() {
            return None;
        }
        Some(balance::subtree_minimum(&self.arena, self.root))
    }

    /// Largest-keyed node, or `None` on an empty tree.
    pub fn maximum(&self) -> Option<NodeId> {
        if self.root.is_nil() {
            return None;
        }
        Some(balance::subtree_maximum(&self.arena, self.root))
    }

    /// In-order successor. `Ok(None)` past the maximum; this variant
    /// does not wrap around.
    pub fn successor(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        if !self.arena.contains(node) {
            return Err(Error::InvalidOperand);
        }
        let r = self.arena[node].r;
        if !r.is_nil() {
            return Ok(Some(balance::subtree_minimum(&self.arena, r)));
        }
        let mut x = node;
        let mut y = self.arena[x].p;
        while !y.is_nil() && x == self.arena[y].r {
            x = y;
            y = self.arena[y].p;
        }
        Ok((!y.is_nil()).then_some(y))
    }

    /// In-order predecessor. `Ok(None)` past the minimum; no wraparound.
    pub fn predecessor(&self, node: NodeId) -> Result<Option<NodeId>, Error> {
        if !self.arena.contains(node) {
            return Err(Error::InvalidOperand);
        }
        let l = self.arena[node].l;
        if !l.is_nil() {
            return Ok(Some(balance::subtree_maximum(&self.arena, l)));
        }
        let mut x = node;
        let mut y = self.arena[x].p;
        while !y.is_nil() && x == self.arena[y].l {
            x = y;
            y = self.arena[y].p;
        }
        Ok((!y.is_nil()).then_some(y))
    }

    /// Key of a live node. Panics on a stale id.
    pub fn key(&self, node: NodeId) -> Key {
        self.arena[node].key
    }

    /// Payload of a live node. Panics on a stale id.
    pub fn data(&self, node: NodeId) -> Option<&V> {
        self.arena[node].data.as_ref()
    }

    /// Mutable payload of a live node. Panics on a stale id.
    pub fn data_mut(&mut self, node: NodeId) -> Option<&mut V> {
        self.arena[node].data.as_mut()
    }

    /// True iff `node` is a live member of this tree.
    pub fn contains(&self, node: NodeId) -> bool {
        self.arena.contains(node)
    }

    /// Drops every node; the tree is reusable afterwards.
    pub fn clear(&mut self) {
        self.arena.clear(RbNode::sentinel());
        self.root = NodeId::NIL;
    }

    /// Verifies the four red-black invariants, stopping at the first
    /// violation.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        validate::check(&self.arena, self.root)
    }

    /// Evaluates all four invariant checks regardless of failures.
    pub fn check_verbose(&self) -> InvariantReport {
        validate::check_verbose(&self.arena, self.root)
    }

    /// Explicit-stack variant of [`check`](Self::check), safe on
    /// arbitrarily unbalanced debug trees.
    pub fn check_iterative(&self) -> Result<(), InvariantViolation> {
        validate::check_iterative(&self.arena, self.root)
    }

    pub(crate) fn arena(&self) -> &Arena<RbNode<V>> {
        &self.arena
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }
}
