//! Error type shared by every fallible operation in this crate.

use crate::definitions::Depth;
use thiserror::Error;

/// Errors reported by the kernels in this crate.
///
/// Both kinds are deterministic: retrying the same call with the same inputs
/// fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A shape, depth or channel precondition of the operation was violated.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The operation has no defined semantics for this sample layout.
    #[error("unsupported array type: depth {depth}, {channels} channel(s)")]
    UnsupportedType {
        /// Depth of the rejected grid.
        depth: Depth,
        /// Channel count of the rejected grid.
        channels: u8,
    },
}

/// Result type for the operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
