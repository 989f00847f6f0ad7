//! Row-major grids parameterized by the stored cell value.
//!
//! [`CellGrid`] is the shared read/write surface; [`Grid`] is the bit-packed
//! `bool` specialization and [`ValueGrid`] stores any `Copy` value per cell.

use super::Grid;

/// Common cell access over row-major 2D surfaces
pub trait CellGrid {
    /// Value stored per cell
    type Cell: Copy + PartialEq;

    /// Width in cells
    fn width(&self) -> u32;

    /// Height in cells
    fn height(&self) -> u32;

    /// Read `(x, y)`; callers keep coordinates in bounds
    fn cell(&self, x: u32, y: u32) -> Self::Cell;

    /// Write `(x, y)`; callers keep coordinates in bounds
    fn set(&mut self, x: u32, y: u32, value: Self::Cell);

    /// Whether `(x, y)` lies inside the surface
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Count cells for which `pred` holds
    fn count_where(&self, mut pred: impl FnMut(Self::Cell) -> bool) -> usize
    where
        Self: Sized,
    {
        let mut count = 0;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if pred(self.cell(x, y)) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl CellGrid for Grid {
    type Cell = bool;

    fn width(&self) -> u32 {
        Grid::width(self)
    }

    fn height(&self) -> u32 {
        Grid::height(self)
    }

    fn cell(&self, x: u32, y: u32) -> bool {
        self.get_cell(x, y)
    }

    fn set(&mut self, x: u32, y: u32, value: bool) {
        self.set_cell(x, y, value);
    }
}

/// Grid holding one `T` per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGrid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Copy + Default> ValueGrid<T> {
    /// Create a grid with every cell at `T::default()`
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); width as usize * height as usize],
        }
    }

    /// Reset every cell to `T::default()`
    pub fn clear(&mut self) {
        self.fill(T::default());
    }
}

impl<T: Copy> ValueGrid<T> {
    /// Set every cell to `value`
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Row-major cell storage
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}

impl<T: Copy + PartialEq> CellGrid for ValueGrid<T> {
    type Cell = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn cell(&self, x: u32, y: u32) -> T {
        self.cells[self.index(x, y)]
    }

    fn set(&mut self, x: u32, y: u32, value: T) {
        let index = self.index(x, y);
        self.cells[index] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_grid() {
        let mut grid: ValueGrid<Option<u16>> = ValueGrid::new(4, 3);
        assert_eq!(grid.as_slice().len(), 12);
        grid.set(3, 2, Some(7));
        grid.set(0, 1, Some(2));
        assert_eq!(grid.cell(3, 2), Some(7));
        assert_eq!(grid.cell(0, 0), None);
        assert_eq!(grid.count_where(|c| c.is_some()), 2);

        grid.clear();
        assert_eq!(grid.count_where(|c| c.is_some()), 0);
    }

    #[test]
    fn test_bool_grid_through_trait() {
        fn stamp<G: CellGrid<Cell = bool>>(grid: &mut G) {
            grid.set(1, 1, true);
        }
        let mut grid = Grid::new(2, 2);
        stamp(&mut grid);
        assert!(grid.get_cell(1, 1));
        assert_eq!(grid.count_where(|c| c), 1);
        assert!(CellGrid::contains(&grid, 1, 1));
        assert!(!CellGrid::contains(&grid, 2, 1));
    }
}
