//! grid_pack - shape catalog and grid packing for tile-based inventories
//!
//! Stores item shapes as packed bit grids, rotates and flips them, interns
//! them into canonical ids, and packs them into containers with
//! collision-free placement, removal and reset.
//!
//! ```
//! use grid_pack::{Container, Grid, ShapeCatalog};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(ShapeCatalog::new());
//! let square = Grid::from_cells(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]).unwrap();
//! let id = catalog.intern(&square).unwrap();
//!
//! let mut container = Container::new(5, 5, catalog);
//! let item = container.try_add(id).unwrap().unwrap();
//! assert_eq!(container.free_space(), 21);
//! assert!(container.remove(item));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Canonical shape repository with memoized rotations and flips
pub mod catalog;
/// Environment-driven tuning knobs
pub mod config;
/// Containers: occupancy, fit search and stable item slots
pub mod container;
/// Error taxonomy
pub mod error;
/// Shape geometry (trim, rotate, flip)
pub mod geometry;
/// Core data structures (BitBuffer, Grid, ShapeId, Position, etc.)
pub mod models;
/// Shape ingestion and rendering helpers
pub mod tools;

pub use catalog::{Shape, ShapeCatalog};
pub use container::{Container, Fit, ItemIndex, ItemSlot, Placement, PlacementRequest};
pub use error::{GridError, Result};
pub use models::{BitBuffer, CellGrid, FlipAxis, Grid, Position, Rotation, ShapeId, ValueGrid};

use std::sync::Arc;
use tracing::info;

/// Intern a batch of (possibly untrimmed) grids and pack them into a new
/// container, in order, at their first fits.
///
/// Shapes that do not fit come back as `None`; the rest of the batch is still
/// attempted.
pub fn pack_shapes(
    catalog: &Arc<ShapeCatalog>,
    blocking: &Grid,
    shapes: &[Grid],
    allow_rotation: bool,
) -> Result<(Container, Vec<Option<Placement>>)> {
    let ids = catalog.intern_all(shapes)?;
    let mut container = Container::from_blocking_pattern(blocking, Arc::clone(catalog));
    let placements = container.place_multiple(&ids, allow_rotation)?;
    info!(
        requested = shapes.len(),
        placed = placements.iter().filter(|p| p.is_some()).count(),
        free = container.free_space(),
        "packed shapes"
    );
    Ok((container, placements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_shapes_skips_misfits() {
        let catalog = Arc::new(ShapeCatalog::new());
        let big = Grid::from_cells(4, 1, (0..4).map(|x| (x, 0))).unwrap();
        let mut padded = Grid::new(4, 4);
        padded.set_cell(1, 1, true);
        padded.set_cell(2, 1, true);

        let (container, placements) =
            pack_shapes(&catalog, &Grid::new(3, 3), &[big, padded], false).unwrap();
        assert_eq!(placements.len(), 2);
        assert!(placements[0].is_none());
        let placed = placements[1].unwrap();
        assert_eq!(placed.position, Position::new(0, 0));
        assert_eq!(container.item_count(), 1);
        assert_eq!(container.free_space(), 7);
    }

    #[test]
    fn test_pack_shapes_rotates_to_fit() {
        let catalog = Arc::new(ShapeCatalog::new());
        let tall = Grid::from_cells(1, 3, [(0, 0), (0, 1), (0, 2)]).unwrap();
        let (_, placements) = pack_shapes(&catalog, &Grid::new(3, 1), &[tall], true).unwrap();
        let placed = placements[0].unwrap();
        assert_eq!(placed.rotation, Rotation::Deg90);
        assert_eq!(catalog.bounds(placed.shape_id), Ok((3, 1)));
    }
}
