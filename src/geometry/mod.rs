//! Shape geometry on boolean grids
//!
//! Pure functions; every transform returns a new [`Grid`](crate::models::Grid):
//! - Trimming to the minimal bounding box of set cells
//! - Quarter-turn rotation and axis flips by exact coordinate remapping

/// Clockwise rotation and mirror flips
pub mod orientation;
/// Bounding-box trimming
pub mod trim;

pub use orientation::{flip, rotate, rotate_degrees};
pub use trim::{is_trimmed, trim};
