use crate::models::Grid;

/// Check whether a column contains any set cell
fn column_any(grid: &Grid, x: u32) -> bool {
    (0..grid.height()).any(|y| grid.get_cell(x, y))
}

/// Check whether a row contains any set cell
fn row_any(grid: &Grid, y: u32) -> bool {
    let width = grid.width() as usize;
    grid.bits().test_any(y as usize * width, width)
}

/// True if the grid has no empty border row or column.
///
/// Empty grids are vacuously trimmed.
pub fn is_trimmed(grid: &Grid) -> bool {
    if grid.is_empty() {
        return true;
    }
    row_any(grid, 0)
        && row_any(grid, grid.height() - 1)
        && column_any(grid, 0)
        && column_any(grid, grid.width() - 1)
}

/// Shrink the grid to the bounding box of its set cells, re-origined at (0, 0).
///
/// Returns a 0x0 grid when no cell is set. Rows are moved as bit runs rather
/// than cell by cell.
pub fn trim(grid: &Grid) -> Grid {
    let height = grid.height();
    let Some(min_y) = (0..height).find(|&y| row_any(grid, y)) else {
        return Grid::new(0, 0);
    };
    if is_trimmed(grid) {
        return grid.clone();
    }
    let max_y = (min_y..height)
        .rev()
        .find(|&y| row_any(grid, y))
        .unwrap_or(min_y);

    let width = grid.width() as usize;
    let bits = grid.bits();
    let mut min_x = width;
    let mut max_x = 0;
    for y in min_y..=max_y {
        let row = y as usize * width;
        if let Some(first) = bits.first_set(row, width) {
            min_x = min_x.min(first - row);
        }
        if let Some(last) = bits.last_set(row, width) {
            max_x = max_x.max(last - row);
        }
    }

    let new_width = max_x - min_x + 1;
    let new_height = (max_y - min_y + 1) as usize;
    let mut out = Grid::new(new_width as u32, new_height as u32);
    for row in 0..new_height {
        let src = (min_y as usize + row) * width + min_x;
        bits.copy_to(out.bits_mut(), row * new_width, src, new_width);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_trimmed() {
        assert!(is_trimmed(&Grid::new(0, 0)));
        assert!(is_trimmed(&Grid::new(0, 4)));
        assert!(!is_trimmed(&Grid::new(2, 2)));
    }

    #[test]
    fn test_is_trimmed_borders() {
        // #.
        // .#
        let diag = Grid::from_cells(2, 2, [(0, 0), (1, 1)]).unwrap();
        assert!(is_trimmed(&diag));

        // .#.
        // ###
        let tee = Grid::from_cells(3, 2, [(1, 0), (0, 1), (1, 1), (2, 1)]).unwrap();
        assert!(is_trimmed(&tee));

        // ##.
        // ##.
        let slack = Grid::from_cells(3, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]).unwrap();
        assert!(!is_trimmed(&slack));
    }

    #[test]
    fn test_trim_single_cell() {
        let grid = Grid::from_cells(5, 5, [(2, 2)]).unwrap();
        let trimmed = trim(&grid);
        assert_eq!(trimmed.width(), 1);
        assert_eq!(trimmed.height(), 1);
        assert!(trimmed.get_cell(0, 0));
    }

    #[test]
    fn test_trim_no_cells() {
        let trimmed = trim(&Grid::new(4, 3));
        assert_eq!((trimmed.width(), trimmed.height()), (0, 0));
        assert!(trimmed.is_empty());
    }

    #[test]
    fn test_trim_band_spans_rows() {
        // ........
        // ...#....
        // ......#.
        // ....#...
        // ........
        let grid = Grid::from_cells(8, 5, [(3, 1), (6, 2), (4, 3)]).unwrap();
        let trimmed = trim(&grid);
        assert_eq!((trimmed.width(), trimmed.height()), (4, 3));
        let expected = Grid::from_cells(4, 3, [(0, 0), (3, 1), (1, 2)]).unwrap();
        assert_eq!(trimmed, expected);
        assert!(is_trimmed(&trimmed));
    }

    #[test]
    fn test_trim_already_trimmed_is_clone() {
        let grid = Grid::from_cells(2, 2, [(0, 0), (1, 1)]).unwrap();
        assert_eq!(trim(&grid), grid);
    }

    #[test]
    fn test_trim_wide_rows_cross_words() {
        let mut grid = Grid::new(150, 3);
        grid.set_cell(5, 1, true);
        grid.set_cell(140, 1, true);
        grid.set_cell(70, 2, true);
        let trimmed = trim(&grid);
        assert_eq!((trimmed.width(), trimmed.height()), (136, 2));
        assert!(trimmed.get_cell(0, 0));
        assert!(trimmed.get_cell(135, 0));
        assert!(trimmed.get_cell(65, 1));
        assert_eq!(trimmed.occupied_count(), 3);
    }
}
