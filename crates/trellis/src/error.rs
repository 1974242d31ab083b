//! Error types for trellis operations.

use crate::domain::{BranchId, Sha};
use std::io;
use thiserror::Error;

/// The error type for trellis loading and validation.
///
/// Layout itself is infallible for well-formed input; errors only arise from
/// the document loader and the optional validation pass.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading an input document.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input document is not valid JSON or does not match the schema.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same commit sha appears more than once in the forest.
    #[error("duplicate commit sha in forest: {0}")]
    DuplicateSha(Sha),

    /// A branch is its own ancestor via `base_branch_id`.
    #[error("branch ancestry cycle involving: {0}")]
    BranchCycle(BranchId),
}

/// A specialized Result type for trellis operations.
pub type Result<T> = std::result::Result<T, Error>;
