//! Error taxonomy for grid and shape operations.
//!
//! Feasibility outcomes (a shape that does not fit) are never errors; they are
//! reported as `false` or `None` by the container. Everything here is a
//! contract violation by the caller.

use crate::models::ShapeId;
use thiserror::Error;

/// Contract violations raised by buffers, grids, the catalog and containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Bit or cell index outside the buffer
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// Offending index (or end of the offending range)
        index: usize,
        /// Length of the buffer in bits
        len: usize,
    },
    /// Copy or compare between grids of different sizes
    #[error("dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        /// Dimensions of the destination grid
        expected: (u32, u32),
        /// Dimensions of the source grid
        actual: (u32, u32),
    },
    /// A shape with an empty border row or column was given to the catalog
    #[error("shape {width}x{height} is not trimmed")]
    NotTrimmed {
        /// Width of the rejected grid
        width: u32,
        /// Height of the rejected grid
        height: u32,
    },
    /// Unrecognized rotation degree or flip axis
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Shape id not issued by this catalog (or issued before a reset)
    #[error("unknown shape id {}", .0.get())]
    UnknownShape(ShapeId),
}

/// Result alias used throughout the crate.
pub type Result<T, E = GridError> = std::result::Result<T, E>;
