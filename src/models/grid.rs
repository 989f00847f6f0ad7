use super::BitBuffer;
use crate::error::{GridError, Result};
use std::fmt;

/// Compact boolean grid for storing shapes and occupancy
///
/// Cells are laid out row-major over a single [`BitBuffer`]
/// (`index = y * width + x`).
#[derive(Debug, Clone, Default)]
pub struct Grid {
    width: u32,
    height: u32,
    bits: BitBuffer,
}

impl Grid {
    /// Create a new grid with all cells clear
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: BitBuffer::new(width as usize * height as usize),
        }
    }

    /// Create a grid with the listed cells set
    pub fn from_cells(
        width: u32,
        height: u32,
        cells: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self> {
        let mut grid = Self::new(width, height);
        for (x, y) in cells {
            if x >= width || y >= height {
                return Err(GridError::OutOfRange {
                    index: y as usize * width as usize + x as usize,
                    len: grid.size(),
                });
            }
            grid.set_cell(x, y, true);
        }
        Ok(grid)
    }

    /// Create a grid from row-major booleans; `cells.len()` must equal `width * height`
    pub fn from_bools(width: u32, height: u32, cells: &[bool]) -> Result<Self> {
        let mut grid = Self::new(width, height);
        if cells.len() != grid.size() {
            return Err(GridError::OutOfRange {
                index: cells.len(),
                len: grid.size(),
            });
        }
        for (i, _) in cells.iter().enumerate().filter(|(_, set)| **set) {
            grid.bits.set(i, true);
        }
        Ok(grid)
    }

    /// Get grid width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get grid height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells (`width * height`)
    #[inline]
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// True when either dimension is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `(x, y)` lies inside the grid
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Linear bit index of `(x, y)`
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get cell at (x, y). Callers validate with [`Grid::contains`].
    #[inline]
    pub fn get_cell(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.bits.get(self.index(x, y))
    }

    /// Set cell at (x, y). Callers validate with [`Grid::contains`].
    #[inline]
    pub fn set_cell(&mut self, x: u32, y: u32, value: bool) {
        debug_assert!(x < self.width && y < self.height);
        let index = self.index(x, y);
        self.bits.set(index, value);
    }

    /// Clear all cells
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: bool) {
        self.bits.fill(value);
    }

    /// Number of set cells, recomputed on every call
    pub fn occupied_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of clear cells
    pub fn free_count(&self) -> usize {
        self.size() - self.occupied_count()
    }

    /// Bitwise copy into `other`, which must have the same dimensions
    pub fn copy_to(&self, other: &mut Grid) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(GridError::DimensionMismatch {
                expected: (other.width, other.height),
                actual: (self.width, self.height),
            });
        }
        self.bits.copy_to(&mut other.bits, 0, 0, self.size());
        Ok(())
    }

    /// Coordinates of all set cells in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.bits
            .iter_ones()
            .map(move |i| ((i % width) as u32, (i / width) as u32))
    }

    /// Backing bits
    pub fn bits(&self) -> &BitBuffer {
        &self.bits
    }

    /// Mutable backing bits
    pub fn bits_mut(&mut self) -> &mut BitBuffer {
        &mut self.bits
    }
}

impl PartialEq for Grid {
    /// Same dimensions and same bits. Two zero-size grids are equal whatever
    /// their nominal width and height.
    fn eq(&self, other: &Self) -> bool {
        if self.size() == 0 && other.size() == 0 {
            return true;
        }
        self.width == other.width
            && self.height == other.height
            && self.bits.sequence_equal(&other.bits)
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    /// One line per row, `#` for set cells and `.` for clear ones
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.get_cell(x, y) { "#" } else { "." })?;
            }
            if y + 1 < self.height {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_basic() {
        let mut grid = Grid::new(8, 8);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.size(), 64);

        grid.set_cell(3, 4, true);
        assert!(grid.get_cell(3, 4));
        assert!(!grid.get_cell(3, 3));
        assert!(grid.bits().get(4 * 8 + 3));
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.free_count(), 63);

        grid.clear();
        assert!(!grid.get_cell(3, 4));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_contains() {
        let grid = Grid::new(3, 2);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(2, 1));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, 2));
        assert!(!grid.contains(-1, 0));
    }

    #[test]
    fn test_from_cells_rejects_outside() {
        assert!(Grid::from_cells(2, 2, [(0, 0), (1, 1)]).is_ok());
        assert!(Grid::from_cells(2, 2, [(2, 0)]).is_err());
        assert!(Grid::from_bools(2, 2, &[true, false, true]).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = Grid::from_cells(3, 3, [(1, 1)]).unwrap();
        let b = a.clone();
        a.set_cell(0, 0, true);
        assert!(!b.get_cell(0, 0));
        assert!(b.get_cell(1, 1));
    }

    #[test]
    fn test_copy_to_checks_dimensions() {
        let src = Grid::from_cells(3, 2, [(0, 0), (2, 1)]).unwrap();
        let mut dest = Grid::new(3, 2);
        dest.set_cell(1, 0, true);
        src.copy_to(&mut dest).unwrap();
        assert_eq!(dest, src);

        let mut wrong = Grid::new(2, 3);
        assert_eq!(
            src.copy_to(&mut wrong),
            Err(GridError::DimensionMismatch {
                expected: (2, 3),
                actual: (3, 2),
            })
        );
    }

    #[test]
    fn test_equality_rules() {
        let a = Grid::new(2, 3);
        let b = Grid::new(3, 2);
        assert_ne!(a, b);
        assert_eq!(Grid::new(0, 0), Grid::new(0, 5));
        assert_eq!(Grid::new(0, 0), Grid::default());

        let c = Grid::from_cells(2, 2, [(1, 0)]).unwrap();
        let d = Grid::from_bools(2, 2, &[false, true, false, false]).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn test_positions_and_display() {
        let grid = Grid::from_cells(3, 2, [(2, 0), (0, 1)]).unwrap();
        let cells: Vec<(u32, u32)> = grid.positions().collect();
        assert_eq!(cells, vec![(2, 0), (0, 1)]);
        assert_eq!(grid.to_string(), "..#\n#..");
    }
}
