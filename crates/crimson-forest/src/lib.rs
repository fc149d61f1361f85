//! Arena-based red-black search trees.
//!
//! Two variants share one set of rotation and fixup primitives:
//!
//! - [`RbTree`] — the classical red-black tree, data stored in every
//!   node.
//! - [`RblTree`] — a leaf-oriented variant: data lives only in leaves,
//!   internal *router* nodes steer search, and all leaves form a sorted
//!   circular doubly-linked list.
//!
//! Instead of raw pointers, all links are [`NodeId`] indices into a
//! tree-owned arena with free-list reclamation; the shared nil sentinel
//! sits at index 0. Ids stay stable across rotations, are invalidated by
//! deletion, and stale ids are rejected with
//! [`Error::InvalidOperand`](error::Error::InvalidOperand) instead of
//! corrupting the structure.
//!
//! Trees are single-threaded: readers (search, min/max,
//! successor/predecessor, the [`validate`] checkers, the [`dot`]
//! exporter) may run side by side, but mutation requires exclusive
//! access.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | `Key`, `Color`, `NodeId`, node layouts |
//! | [`rb`] | classical tree operations |
//! | [`rbl`] | leaf-oriented tree operations and leaf iterator |
//! | [`validate`] | invariant checkers and the verbose report |
//! | [`dot`] | Graphviz DOT exporter |
//! | [`error`] | operation errors |

mod arena;
mod balance;

pub mod dot;
pub mod error;
pub mod rb;
pub mod rbl;
pub mod types;
pub mod validate;

pub use dot::DotExporter;
pub use error::Error;
pub use rb::RbTree;
pub use rbl::{Leaves, RblTree};
pub use types::{Color, Key, NodeId};
pub use validate::{InvariantReport, InvariantViolation};
