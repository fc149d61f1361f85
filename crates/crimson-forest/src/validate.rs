//! Read-only invariant checkers.
//!
//! Four independent checks prove the red-black invariants; none of them
//! mutates the tree, so they double as a correctness oracle in tests and
//! as a diagnostic reporter. [`check`] short-circuits, [`check_verbose`]
//! evaluates every sub-check even after a failure, and
//! [`check_iterative`] uses explicit stacks so it stays safe on
//! malformed trees whose depth cannot be assumed logarithmic.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::arena::Arena;
use crate::balance::{color, left, right};
use crate::types::{Color, Link, NodeId, RblNode};

/// A structural defect found by the validator.
///
/// Never produced by normal tree operation; a violation indicates a bug
/// in insert/delete/fixup logic or a hand-corrupted debug tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("the root is red")]
    RedRoot,
    #[error("a sentinel leaf is red")]
    RedLeaf,
    #[error("red node {0:?} has a red child")]
    RedRedEdge(NodeId),
    #[error("black-height mismatch under {0:?}")]
    BlackHeightMismatch(NodeId),
    #[error("router {0:?} is missing a child")]
    HalfRouter(NodeId),
    #[error("router {0:?} carries a payload")]
    RouterWithData(NodeId),
    #[error("leaf list out of order at {0:?}")]
    LeafListOrder(NodeId),
    #[error("leaf list link broken at {0:?}")]
    LeafListLink(NodeId),
    #[error("leaf count mismatch: expected {expected}, found {found}")]
    LeafCountMismatch { expected: usize, found: usize },
}

/// Outcome of every sub-check, pass or fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantReport {
    pub root_is_black: bool,
    pub leaves_black: bool,
    pub no_red_red: bool,
    pub black_height_uniform: bool,
}

impl InvariantReport {
    pub fn ok(&self) -> bool {
        self.root_is_black && self.leaves_black && self.no_red_red && self.black_height_uniform
    }
}

impl fmt::Display for InvariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = |ok: bool, pass: &str, fail: &str| {
            if ok {
                format!("  OK: {pass}")
            } else {
                format!("  FAIL: {fail}")
            }
        };
        writeln!(
            f,
            "{}",
            line(self.root_is_black, "the root is black", "the root is red")
        )?;
        writeln!(
            f,
            "{}",
            line(self.leaves_black, "each leaf is black", "leaves are not black")
        )?;
        writeln!(
            f,
            "{}",
            line(
                self.no_red_red,
                "each red node has black children",
                "there exists a red node with a red child"
            )
        )?;
        write!(
            f,
            "{}",
            line(
                self.black_height_uniform,
                "each path from root to leaf has the same length",
                "not all paths from root to leaf have the same length"
            )
        )
    }
}

/// Runs the four checks in order, stopping at the first violation.
pub(crate) fn check<N: Link>(a: &Arena<N>, root: NodeId) -> Result<(), InvariantViolation> {
    root_is_black(a, root)?;
    leaves_black(a, root)?;
    no_red_red(a, root)?;
    black_height(a, root).map(|_| ())
}

/// Runs all four checks regardless of failures.
pub(crate) fn check_verbose<N: Link>(a: &Arena<N>, root: NodeId) -> InvariantReport {
    InvariantReport {
        root_is_black: root_is_black(a, root).is_ok(),
        leaves_black: leaves_black(a, root).is_ok(),
        no_red_red: no_red_red(a, root).is_ok(),
        black_height_uniform: black_height(a, root).is_ok(),
    }
}

fn root_is_black<N: Link>(a: &Arena<N>, root: NodeId) -> Result<(), InvariantViolation> {
    if !root.is_nil() && color(a, root) == Color::Red {
        return Err(InvariantViolation::RedRoot);
    }
    Ok(())
}

fn leaves_black<N: Link>(a: &Arena<N>, x: NodeId) -> Result<(), InvariantViolation> {
    if x.is_nil() {
        return if color(a, NodeId::NIL) == Color::Black {
            Ok(())
        } else {
            Err(InvariantViolation::RedLeaf)
        };
    }
    leaves_black(a, left(a, x))?;
    leaves_black(a, right(a, x))
}

fn no_red_red<N: Link>(a: &Arena<N>, x: NodeId) -> Result<(), InvariantViolation> {
    if x.is_nil() {
        return Ok(());
    }
    let l = left(a, x);
    let r = right(a, x);
    if color(a, x) == Color::Red
        && (color(a, l) == Color::Red || color(a, r) == Color::Red)
    {
        return Err(InvariantViolation::RedRedEdge(x));
    }
    no_red_red(a, l)?;
    no_red_red(a, r)
}

/// Black nodes on any path from `x` down to a sentinel, sentinel
/// included. Only pairwise left/right equality is checked at each node.
fn black_height<N: Link>(a: &Arena<N>, x: NodeId) -> Result<u32, InvariantViolation> {
    if x.is_nil() {
        return Ok(1);
    }
    let lh = black_height(a, left(a, x))?;
    let rh = black_height(a, right(a, x))?;
    if lh != rh {
        return Err(InvariantViolation::BlackHeightMismatch(x));
    }
    Ok(lh + u32::from(color(a, x) == Color::Black))
}

/// Explicit-stack form of [`check`]; usable on arbitrarily unbalanced or
/// corrupted debug trees where recursion depth cannot be bounded.
pub(crate) fn check_iterative<N: Link>(
    a: &Arena<N>,
    root: NodeId,
) -> Result<(), InvariantViolation> {
    if root.is_nil() {
        return Ok(());
    }
    if color(a, root) == Color::Red {
        return Err(InvariantViolation::RedRoot);
    }

    // pre-order sweep: color checks, and node order for the height pass
    let mut stack = vec![root];
    let mut order = Vec::new();
    while let Some(x) = stack.pop() {
        order.push(x);
        let l = left(a, x);
        let r = right(a, x);
        if color(a, x) == Color::Red
            && (color(a, l) == Color::Red || color(a, r) == Color::Red)
        {
            return Err(InvariantViolation::RedRedEdge(x));
        }
        for c in [l, r] {
            if c.is_nil() {
                if color(a, NodeId::NIL) == Color::Red {
                    return Err(InvariantViolation::RedLeaf);
                }
            } else {
                stack.push(c);
            }
        }
    }

    // children precede parents in reversed pre-order
    let mut heights: HashMap<u32, u32> = HashMap::with_capacity(order.len());
    let height = |heights: &HashMap<u32, u32>, c: NodeId| -> u32 {
        if c.is_nil() {
            1
        } else {
            heights[&c.0]
        }
    };
    for &x in order.iter().rev() {
        let lh = height(&heights, left(a, x));
        let rh = height(&heights, right(a, x));
        if lh != rh {
            return Err(InvariantViolation::BlackHeightMismatch(x));
        }
        heights.insert(x.0, lh + u32::from(color(a, x) == Color::Black));
    }
    Ok(())
}

/// Leaf-oriented structure check: routers are full and payload-free, and
/// the leaf list agrees with in-order traversal, ascending keys, mutual
/// `prev`/`next` links and the wraparound closing the cycle.
pub(crate) fn check_rbl_structure<V>(
    a: &Arena<RblNode<V>>,
    root: NodeId,
    expected_leaves: usize,
) -> Result<(), InvariantViolation> {
    let mut inorder = Vec::new();
    let mut stack = Vec::new();
    let mut x = root;
    loop {
        while !x.is_nil() {
            stack.push(x);
            x = a[x].l;
        }
        let n = match stack.pop() {
            Some(n) => n,
            None => break,
        };
        let l = a[n].l;
        let r = a[n].r;
        if l.is_nil() != r.is_nil() {
            return Err(InvariantViolation::HalfRouter(n));
        }
        if !l.is_nil() && a[n].data.is_some() {
            return Err(InvariantViolation::RouterWithData(n));
        }
        if l.is_nil() {
            inorder.push(n);
        }
        x = r;
    }

    if inorder.len() != expected_leaves {
        return Err(InvariantViolation::LeafCountMismatch {
            expected: expected_leaves,
            found: inorder.len(),
        });
    }
    for w in inorder.windows(2) {
        if a[w[0]].key > a[w[1]].key {
            return Err(InvariantViolation::LeafListOrder(w[1]));
        }
    }
    let n = inorder.len();
    for i in 0..n {
        let this = inorder[i];
        let succ = inorder[(i + 1) % n];
        if a[this].next != succ || a[succ].prev != this {
            return Err(InvariantViolation::LeafListLink(this));
        }
    }
    Ok(())
}
