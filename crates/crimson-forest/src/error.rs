use thiserror::Error;

/// Errors surfaced by tree operations.
///
/// Absent keys are not errors; lookups return `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Node or tree allocation failed. Fatal for the call; no partial
    /// mutation is visible.
    #[error("node allocation failed")]
    Allocation,
    /// The operand node is not a live member of this tree (stale id,
    /// double delete, or a router where a leaf is required).
    #[error("operand node is not a live member of this tree")]
    InvalidOperand,
}
