use thiserror::Error;

/// Misuse by a trusted caller on the proving side. Verification never
/// produces one of these; it answers `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("value sequence cannot be empty")]
    EmptyValues,
    #[error("index set cannot be empty")]
    EmptyIndices,
    #[error("{indices} indices requested for {values} values")]
    TooManyIndices { indices: usize, values: usize },
    #[error("index {index} out of range for {len} values")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("tree has no root (no values)")]
    EmptyTree,
    #[error("malformed proof bytes: {reason}")]
    MalformedProofBytes { reason: &'static str },
}
