//! Rotation, transplant and fixup primitives.
//!
//! Generic over [`Link`] so the classical and the leaf-oriented tree
//! share one implementation. All functions take the owning tree's root by
//! reference and update it when the rotation or splice happens at the
//! top.
//!
//! The fixups are the canonical 4-case procedures, both mirror arms
//! spelled out. The sentinel's parent link is written transiently during
//! `transplant` (the delete fixup reads it back); its color is never
//! written.

use crate::arena::Arena;
use crate::types::{Color, Key, Link, NodeId};

#[inline]
pub(crate) fn color<N: Link>(a: &Arena<N>, i: NodeId) -> Color {
    a[i].color()
}

#[inline]
fn set_color<N: Link>(a: &mut Arena<N>, i: NodeId, c: Color) {
    a[i].set_color(c);
}

#[inline]
pub(crate) fn parent<N: Link>(a: &Arena<N>, i: NodeId) -> NodeId {
    a[i].p()
}

#[inline]
pub(crate) fn left<N: Link>(a: &Arena<N>, i: NodeId) -> NodeId {
    a[i].l()
}

#[inline]
pub(crate) fn right<N: Link>(a: &Arena<N>, i: NodeId) -> NodeId {
    a[i].r()
}

/// Left rotation at `x`; `x.r` must be a real node.
pub(crate) fn rotate_left<N: Link>(a: &mut Arena<N>, root: &mut NodeId, x: NodeId) {
    let y = right(a, x);
    let yl = left(a, y);
    a[x].set_r(yl);
    if !yl.is_nil() {
        a[yl].set_p(x);
    }
    let xp = parent(a, x);
    a[y].set_p(xp);
    if xp.is_nil() {
        *root = y;
    } else if left(a, xp) == x {
        a[xp].set_l(y);
    } else {
        a[xp].set_r(y);
    }
    a[y].set_l(x);
    a[x].set_p(y);
}

/// Right rotation at `y`; `y.l` must be a real node.
pub(crate) fn rotate_right<N: Link>(a: &mut Arena<N>, root: &mut NodeId, y: NodeId) {
    let x = left(a, y);
    let xr = right(a, x);
    a[y].set_l(xr);
    if !xr.is_nil() {
        a[xr].set_p(y);
    }
    let yp = parent(a, y);
    a[x].set_p(yp);
    if yp.is_nil() {
        *root = x;
    } else if left(a, yp) == y {
        a[yp].set_l(x);
    } else {
        a[yp].set_r(x);
    }
    a[x].set_r(y);
    a[y].set_p(x);
}

/// Replaces the subtree rooted at `u` with the one rooted at `v`.
///
/// `v` may be the sentinel, in which case its parent link is written so
/// the delete fixup can walk up from it.
pub(crate) fn transplant<N: Link>(a: &mut Arena<N>, root: &mut NodeId, u: NodeId, v: NodeId) {
    let up = parent(a, u);
    if up.is_nil() {
        *root = v;
    } else if left(a, up) == u {
        a[up].set_l(v);
    } else {
        a[up].set_r(v);
    }
    a[v].set_p(up);
}

/// Restores the red-black invariants after inserting the red node `z`.
///
/// Loop invariant: the only possible violation is `z` and `z.p` both
/// red. Case 1 (red uncle) recolors and ascends two levels; case 2
/// (inner child) rotates into case 3; case 3 recolors and rotates at the
/// grandparent, which terminates the loop.
pub(crate) fn insert_fixup<N: Link>(a: &mut Arena<N>, root: &mut NodeId, mut z: NodeId) {
    while color(a, parent(a, z)) == Color::Red {
        let zp = parent(a, z);
        let zpp = parent(a, zp);
        if zp == left(a, zpp) {
            let y = right(a, zpp);
            if color(a, y) == Color::Red {
                // case 1
                set_color(a, zp, Color::Black);
                set_color(a, y, Color::Black);
                set_color(a, zpp, Color::Red);
                z = zpp;
            } else {
                if z == right(a, zp) {
                    // case 2
                    z = zp;
                    rotate_left(a, root, z);
                }
                // case 3
                let zp = parent(a, z);
                let zpp = parent(a, zp);
                set_color(a, zp, Color::Black);
                set_color(a, zpp, Color::Red);
                rotate_right(a, root, zpp);
            }
        } else {
            let y = left(a, zpp);
            if color(a, y) == Color::Red {
                // case 1
                set_color(a, zp, Color::Black);
                set_color(a, y, Color::Black);
                set_color(a, zpp, Color::Red);
                z = zpp;
            } else {
                if z == left(a, zp) {
                    // case 2
                    z = zp;
                    rotate_right(a, root, z);
                }
                // case 3
                let zp = parent(a, z);
                let zpp = parent(a, zp);
                set_color(a, zp, Color::Black);
                set_color(a, zpp, Color::Red);
                rotate_left(a, root, zpp);
            }
        }
    }
    if !root.is_nil() {
        set_color(a, *root, Color::Black);
    }
}

/// Discharges the "extra black" carried by `x` after a black node was
/// spliced out above it.
pub(crate) fn delete_fixup<N: Link>(a: &mut Arena<N>, root: &mut NodeId, mut x: NodeId) {
    while x != *root && color(a, x) == Color::Black {
        let xp = parent(a, x);
        if x == left(a, xp) {
            let mut w = right(a, xp);
            if color(a, w) == Color::Red {
                // case 1: red sibling
                set_color(a, w, Color::Black);
                set_color(a, xp, Color::Red);
                rotate_left(a, root, xp);
                w = right(a, parent(a, x));
            }
            if color(a, left(a, w)) == Color::Black && color(a, right(a, w)) == Color::Black {
                // case 2: both nephews black
                set_color(a, w, Color::Red);
                x = parent(a, x);
            } else {
                if color(a, right(a, w)) == Color::Black {
                    // case 3: far nephew black
                    set_color(a, left(a, w), Color::Black);
                    set_color(a, w, Color::Red);
                    rotate_right(a, root, w);
                    w = right(a, parent(a, x));
                }
                // case 4
                let xp = parent(a, x);
                set_color(a, w, color(a, xp));
                set_color(a, xp, Color::Black);
                set_color(a, right(a, w), Color::Black);
                rotate_left(a, root, xp);
                x = *root;
            }
        } else {
            let mut w = left(a, xp);
            if color(a, w) == Color::Red {
                // case 1
                set_color(a, w, Color::Black);
                set_color(a, xp, Color::Red);
                rotate_right(a, root, xp);
                w = left(a, parent(a, x));
            }
            if color(a, right(a, w)) == Color::Black && color(a, left(a, w)) == Color::Black {
                // case 2
                set_color(a, w, Color::Red);
                x = parent(a, x);
            } else {
                if color(a, left(a, w)) == Color::Black {
                    // case 3
                    set_color(a, right(a, w), Color::Black);
                    set_color(a, w, Color::Red);
                    rotate_left(a, root, w);
                    w = left(a, parent(a, x));
                }
                // case 4
                let xp = parent(a, x);
                set_color(a, w, color(a, xp));
                set_color(a, xp, Color::Black);
                set_color(a, left(a, w), Color::Black);
                rotate_right(a, root, xp);
                x = *root;
            }
        }
    }
    if !x.is_nil() {
        set_color(a, x, Color::Black);
    }
}

/// Leftmost node under `x`; returns `x` itself when nil.
pub(crate) fn subtree_minimum<N: Link>(a: &Arena<N>, mut x: NodeId) -> NodeId {
    while !x.is_nil() && !left(a, x).is_nil() {
        x = left(a, x);
    }
    x
}

/// Rightmost node under `x`; returns `x` itself when nil.
pub(crate) fn subtree_maximum<N: Link>(a: &Arena<N>, mut x: NodeId) -> NodeId {
    while !x.is_nil() && !right(a, x).is_nil() {
        x = right(a, x);
    }
    x
}

/// Recursive search; stops on the first node carrying `k`.
pub(crate) fn search_from<N: Link>(a: &Arena<N>, x: NodeId, k: Key) -> NodeId {
    if x.is_nil() || k == a[x].key() {
        return x;
    }
    if k < a[x].key() {
        search_from(a, left(a, x), k)
    } else {
        search_from(a, right(a, x), k)
    }
}

/// Loop form of [`search_from`]; identical results.
pub(crate) fn search_iterative_from<N: Link>(a: &Arena<N>, mut x: NodeId, k: Key) -> NodeId {
    while !x.is_nil() && k != a[x].key() {
        x = if k < a[x].key() {
            left(a, x)
        } else {
            right(a, x)
        };
    }
    x
}
