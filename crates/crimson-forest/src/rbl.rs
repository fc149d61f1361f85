//! Leaf-oriented red-black tree.
//!
//! Data lives only in leaves; internal *router* nodes steer search and
//! carry no payload. All leaves additionally form a circular
//! doubly-linked list in ascending key order (`max.next == min`; a sole
//! leaf links to itself), so ordered traversal is O(1) per step.
//!
//! Insertion always grows the tree by one router plus one leaf (except
//! into an empty tree); deletion removes a leaf together with its paired
//! router, promoting the sibling, so routers always keep exactly two
//! children.

use crate::arena::Arena;
use crate::balance;
use crate::error::Error;
use crate::types::{Color, Key, NodeId, RblNode};
use crate::validate::{self, InvariantReport, InvariantViolation};

/// Leaf-oriented red-black tree over `i64` keys.
///
/// Operand ids taken by mutating and hopping operations must be live
/// leaves of this tree; anything else is [`Error::InvalidOperand`].
pub struct RblTree<V> {
    arena: Arena<RblNode<V>>,
    root: NodeId,
    leaves: usize,
}

impl<V> RblTree<V> {
    /// Creates an empty tree. Fails only when the sentinel cannot be
    /// allocated.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            arena: Arena::new(RblNode::sentinel())?,
            root: NodeId::NIL,
            leaves: 0,
        })
    }

    /// Number of data leaves.
    pub fn len(&self) -> usize {
        self.leaves
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Inserts a new leaf and rebalances. Returns the leaf's id.
    ///
    /// The displaced leaf `y` is pushed one level down under a fresh
    /// router that inherits `y`'s color and position; the new leaf's
    /// list neighbors are resolved structurally on the already-spliced
    /// tree, replacing every stale link. Both allocations happen before
    /// any tree pointer is rewritten.
    pub fn insert(&mut self, key: Key, data: Option<V>) -> Result<NodeId, Error> {
        let z = self.arena.try_alloc(RblNode::leaf(key, data))?;
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

        if y.is_nil() {
            // first leaf: becomes the root and a one-element cycle
            self.root = z;
            self.arena[z].next = z;
            self.arena[z].prev = z;
        } else {
            let ykey = self.arena[y].key;
            let u = match self.arena.try_alloc(RblNode::router(ykey)) {
                Ok(u) => u,
                Err(e) => {
                    self.arena.free(z);
                    return Err(e);
                }
            };
            if y == self.root {
                self.root = u;
            } else {
                let yp = self.arena[y].p;
                if self.arena[yp].l == y {
                    self.arena[yp].l = u;
                } else {
                    self.arena[yp].r = u;
                }
                self.arena[u].p = yp;
            }
            self.arena[y].p = u;
            self.arena[z].p = u;

            if key < ykey {
                self.arena[u].l = z;
                self.arena[u].r = y;
                self.arena[u].key = key;
                let zprev = self.structural_predecessor(z);
                self.arena[z].prev = zprev;
                self.arena[zprev].next = z;
                self.arena[z].next = y;
                self.arena[y].prev = z;
                let ynext = self.structural_successor(y);
                self.arena[y].next = ynext;
                self.arena[ynext].prev = y;
            } else {
                self.arena[u].l = y;
                self.arena[u].r = z;
                let yprev = self.structural_predecessor(y);
                self.arena[y].prev = yprev;
                self.arena[yprev].next = y;
                self.arena[y].next = z;
                self.arena[z].prev = y;
                let znext = self.structural_successor(z);
                self.arena[z].next = znext;
                self.arena[znext].prev = z;
            }

            let ycolor = self.arena[y].color;
            self.arena[u].color = ycolor;
            self.arena[y].color = Color::Red;
        }

        balance::insert_fixup(&mut self.arena, &mut self.root, z);
        self.leaves += 1;
        Ok(z)
    }

    /// Removes `leaf` together with its paired router, promoting the
    /// sibling into the router's slot.
    ///
    /// The list unlink is O(1); the fixup runs iff the router was black,
    /// since only the router's color leaves the surviving paths.
    pub fn delete(&mut self, leaf: NodeId) -> Result<Option<V>, Error> {
        if !self.arena.contains(leaf) || !self.arena[leaf].is_leaf() {
            return Err(Error::InvalidOperand);
        }
        if leaf == self.root {
            self.root = NodeId::NIL;
            self.leaves = 0;
            return Ok(self.arena.free(leaf).data);
        }

        let prev = self.arena[leaf].prev;
        let next = self.arena[leaf].next;
        self.arena[prev].next = next;
        self.arena[next].prev = prev;

        let router = self.arena[leaf].p;
        let sibling = if self.arena[router].l == leaf {
            self.arena[router].r
        } else {
            self.arena[router].l
        };
        let removed_color = self.arena[router].color;
        balance::transplant(&mut self.arena, &mut self.root, router, sibling);
        if removed_color == Color::Black {
            balance::delete_fixup(&mut self.arena, &mut self.root, sibling);
        }

        self.arena.free(router);
        self.leaves -= 1;
        Ok(self.arena.free(leaf).data)
    }

    /// Recursive equality-stop search. May return a router whose key
    /// duplicates a leaf key; use [`find_leaf`](Self::find_leaf) when
    /// the result must be deletable.
    pub fn search(&self, key: Key) -> Option<NodeId> {
        let n = balance::search_from(&self.arena, self.root, key);
        (!n.is_nil()).then_some(n)
    }

    /// Loop form of [`search`](Self::search); identical results.
    pub fn search_iterative(&self, key: Key) -> Option<NodeId> {
        let n = balance::search_iterative_from(&self.arena, self.root, key);
        (!n.is_nil()).then_some(n)
    }

    /// Returns a leaf holding `key`, if any.
    ///
    /// Unlike [`search`](Self::search) this is an exact membership test:
    /// it never stops at a router, and a router whose key equals `key`
    /// forces both subtrees to be tried, since an equal-keyed leaf may
    /// sit on either side (the displaced leaf shares its router's key on
    /// the left; later duplicates land on the right). Among duplicates
    /// the right side wins.
    pub fn find_leaf(&self, key: Key) -> Option<NodeId> {
        self.find_leaf_from(self.root, key)
    }

    fn find_leaf_from(&self, x: NodeId, key: Key) -> Option<NodeId> {
        if x.is_nil() {
            return None;
        }
        if self.arena[x].is_leaf() {
            return (self.arena[x].key == key).then_some(x);
        }
        let node_key = self.arena[x].key;
        if key < node_key {
            self.find_leaf_from(self.arena[x].l, key)
        } else if key > node_key {
            self.find_leaf_from(self.arena[x].r, key)
        } else {
            self.find_leaf_from(self.arena[x].r, key)
                .or_else(|| self.find_leaf_from(self.arena[x].l, key))
        }
    }

    /// Smallest-keyed leaf, or `None` on an empty tree.
    pub fn minimum(&self) -> Option<NodeId> {
        if self.root.is_nil() {
            return None;
        }
        Some(balance::subtree_minimum(&self.arena, self.root))
    }

    /// Largest-keyed leaf, or `None` on an empty tree.
    pub fn maximum(&self) -> Option<NodeId> {
        if self.root.is_nil() {
            return None;
        }
        Some(balance::subtree_maximum(&self.arena, self.root))
    }

    /// Structural in-order successor leaf. Wraps around: the successor
    /// of the maximum is the minimum, consistent with the leaf list
    /// being circular.
    pub fn successor(&self, node: NodeId) -> Result<NodeId, Error> {
        if !self.arena.contains(node) {
            return Err(Error::InvalidOperand);
        }
        Ok(self.structural_successor(node))
    }

    /// Structural in-order predecessor leaf, wrapping to the maximum.
    pub fn predecessor(&self, node: NodeId) -> Result<NodeId, Error> {
        if !self.arena.contains(node) {
            return Err(Error::InvalidOperand);
        }
        Ok(self.structural_predecessor(node))
    }

    /// O(1) hop to the next leaf in the list.
    pub fn next_leaf(&self, leaf: NodeId) -> Result<NodeId, Error> {
        if !self.arena.contains(leaf) || !self.arena[leaf].is_leaf() {
            return Err(Error::InvalidOperand);
        }
        Ok(self.arena[leaf].next)
    }

    /// O(1) hop to the previous leaf in the list.
    pub fn prev_leaf(&self, leaf: NodeId) -> Result<NodeId, Error> {
        if !self.arena.contains(leaf) || !self.arena[leaf].is_leaf() {
            return Err(Error::InvalidOperand);
        }
        Ok(self.arena[leaf].prev)
    }

    /// Leaves in ascending key order, one full cycle starting at the
    /// minimum.
    pub fn leaves(&self) -> Leaves<'_, V> {
        let start = self.minimum();
        Leaves {
            tree: self,
            curr: start,
            start: start.unwrap_or(NodeId::NIL),
        }
    }

    /// True iff `node` is a live data leaf.
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.arena.contains(node) && self.arena[node].is_leaf()
    }

    /// Key of a live node. Panics on a stale id.
    pub fn key(&self, node: NodeId) -> Key {
        self.arena[node].key
    }

    /// Payload of a live node; routers always yield `None`. Panics on a
    /// stale id.
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
        self.arena.clear(RblNode::sentinel());
        self.root = NodeId::NIL;
        self.leaves = 0;
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

    /// Verifies the leaf-oriented structure: full routers with empty
    /// payloads, and list order agreeing with in-order traversal.
    pub fn check_structure(&self) -> Result<(), InvariantViolation> {
        validate::check_rbl_structure(&self.arena, self.root, self.leaves)
    }

    fn structural_successor(&self, x: NodeId) -> NodeId {
        let a = &self.arena;
        if !a[x].r.is_nil() {
            return balance::subtree_minimum(a, a[x].r);
        }
        let mut x = x;
        let mut y = a[x].p;
        while !y.is_nil() && x == a[y].r {
            x = y;
            y = a[y].p;
        }
        if y.is_nil() {
            balance::subtree_minimum(a, self.root)
        } else {
            balance::subtree_minimum(a, a[y].r)
        }
    }

    fn structural_predecessor(&self, x: NodeId) -> NodeId {
        let a = &self.arena;
        if !a[x].l.is_nil() {
            return balance::subtree_maximum(a, a[x].l);
        }
        let mut x = x;
        let mut y = a[x].p;
        while !y.is_nil() && x == a[y].l {
            x = y;
            y = a[y].p;
        }
        if y.is_nil() {
            balance::subtree_maximum(a, self.root)
        } else {
            balance::subtree_maximum(a, a[y].l)
        }
    }

    pub(crate) fn arena(&self) -> &Arena<RblNode<V>> {
        &self.arena
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }
}

/// Iterator over leaf ids in list order, one full cycle.
pub struct Leaves<'a, V> {
    tree: &'a RblTree<V>,
    curr: Option<NodeId>,
    start: NodeId,
}

impl<'a, V> Iterator for Leaves<'a, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let c = self.curr?;
        let n = self.tree.arena[c].next;
        self.curr = (n != self.start).then_some(n);
        Some(c)
    }
}
