/// Packed bit storage with range operations
pub mod bit_buffer;
/// Bit-packed boolean grid
pub mod grid;
/// Container coordinates
pub mod point;
/// Shape identity, rotations and flip axes
pub mod shape;
/// Generic cell grids
pub mod value_grid;

pub use bit_buffer::BitBuffer;
pub use grid::Grid;
pub use point::Position;
pub use shape::{FlipAxis, Rotation, ShapeId};
pub use value_grid::{CellGrid, ValueGrid};
