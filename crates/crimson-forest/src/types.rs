//! Node layouts shared by both tree variants.
//!
//! All "pointers" are [`NodeId`] indices into a tree-owned arena. The
//! shared nil sentinel lives at index 0 and is always black; its color is
//! never written after construction.

/// Key type. Keys are plain integers; duplicates are allowed and route
/// to the right of an equal node.
pub type Key = i64;

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Stable arena index of a node.
///
/// Ids stay valid across rotations; they are invalidated by `delete` and
/// are only meaningful against the tree that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The shared nil sentinel.
    pub const NIL: NodeId = NodeId(0);

    #[inline]
    pub fn is_nil(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Structural accessors required by the rotation and fixup primitives.
///
/// Implemented by both node layouts so `balance` is written once.
pub trait Link {
    fn p(&self) -> NodeId;
    fn l(&self) -> NodeId;
    fn r(&self) -> NodeId;
    fn set_p(&mut self, v: NodeId);
    fn set_l(&mut self, v: NodeId);
    fn set_r(&mut self, v: NodeId);
    fn key(&self) -> Key;
    fn color(&self) -> Color;
    fn set_color(&mut self, c: Color);
}

/// Node of the classical red-black tree: every non-sentinel node holds
/// its own payload.
#[derive(Clone, Debug)]
pub struct RbNode<V> {
    pub(crate) key: Key,
    pub(crate) data: Option<V>,
    pub(crate) p: NodeId,
    pub(crate) l: NodeId,
    pub(crate) r: NodeId,
    pub(crate) color: Color,
}

impl<V> RbNode<V> {
    pub(crate) fn new(key: Key, data: Option<V>) -> Self {
        Self {
            key,
            data,
            p: NodeId::NIL,
            l: NodeId::NIL,
            r: NodeId::NIL,
            color: Color::Red,
        }
    }

    pub(crate) fn sentinel() -> Self {
        Self {
            key: 0,
            data: None,
            p: NodeId::NIL,
            l: NodeId::NIL,
            r: NodeId::NIL,
            color: Color::Black,
        }
    }
}

impl<V> Link for RbNode<V> {
    fn p(&self) -> NodeId {
        self.p
    }

    fn l(&self) -> NodeId {
        self.l
    }

    fn r(&self) -> NodeId {
        self.r
    }

    fn set_p(&mut self, v: NodeId) {
        self.p = v;
    }

    fn set_l(&mut self, v: NodeId) {
        self.l = v;
    }

    fn set_r(&mut self, v: NodeId) {
        self.r = v;
    }

    fn key(&self) -> Key {
        self.key
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, c: Color) {
        self.color = c;
    }
}

/// Node of the leaf-oriented tree.
///
/// Two kinds share this layout: data leaves, which additionally sit in a
/// circular doubly-linked list over all leaves in ascending key order,
/// and routers, which only steer search. Kind is structural: a node is a
/// leaf iff `l` is nil (routers always have two children). Routers never
/// carry a payload; leaves may legally carry `None`.
#[derive(Clone, Debug)]
pub struct RblNode<V> {
    pub(crate) key: Key,
    pub(crate) data: Option<V>,
    pub(crate) p: NodeId,
    pub(crate) l: NodeId,
    pub(crate) r: NodeId,
    pub(crate) prev: NodeId,
    pub(crate) next: NodeId,
    pub(crate) color: Color,
}

impl<V> RblNode<V> {
    pub(crate) fn leaf(key: Key, data: Option<V>) -> Self {
        Self {
            key,
            data,
            p: NodeId::NIL,
            l: NodeId::NIL,
            r: NodeId::NIL,
            prev: NodeId::NIL,
            next: NodeId::NIL,
            color: Color::Red,
        }
    }

    pub(crate) fn router(key: Key) -> Self {
        Self {
            key,
            data: None,
            p: NodeId::NIL,
            l: NodeId::NIL,
            r: NodeId::NIL,
            prev: NodeId::NIL,
            next: NodeId::NIL,
            color: Color::Red,
        }
    }

    pub(crate) fn sentinel() -> Self {
        Self {
            key: 0,
            data: None,
            p: NodeId::NIL,
            l: NodeId::NIL,
            r: NodeId::NIL,
            prev: NodeId::NIL,
            next: NodeId::NIL,
            color: Color::Black,
        }
    }

    /// A node is a leaf iff it has no left child; routers are full.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.l.is_nil()
    }
}

impl<V> Link for RblNode<V> {
    fn p(&self) -> NodeId {
        self.p
    }

    fn l(&self) -> NodeId {
        self.l
    }

    fn r(&self) -> NodeId {
        self.r
    }

    fn set_p(&mut self, v: NodeId) {
        self.p = v;
    }

    fn set_l(&mut self, v: NodeId) {
        self.l = v;
    }

    fn set_r(&mut self, v: NodeId) {
        self.r = v;
    }

    fn key(&self) -> Key {
        self.key
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, c: Color) {
        self.color = c;
    }
}
