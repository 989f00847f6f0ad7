use crate::error::Result;
use crate::models::{FlipAxis, Grid, Rotation};

/// Rotate a grid clockwise.
///
/// | rotation | new size | `(x, y)` maps to |
/// |---|---|---|
/// | 90°  | `(h, w)` | `(h - 1 - y, x)` |
/// | 180° | `(w, h)` | `(w - 1 - x, h - 1 - y)` |
/// | 270° | `(h, w)` | `(y, w - 1 - x)` |
pub fn rotate(grid: &Grid, rotation: Rotation) -> Grid {
    let (w, h) = (grid.width(), grid.height());
    let mut out = match rotation {
        Rotation::Deg0 => return grid.clone(),
        Rotation::Deg90 | Rotation::Deg270 => Grid::new(h, w),
        Rotation::Deg180 => Grid::new(w, h),
    };
    for (x, y) in grid.positions() {
        let (nx, ny) = match rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (h - 1 - y, x),
            Rotation::Deg180 => (w - 1 - x, h - 1 - y),
            Rotation::Deg270 => (y, w - 1 - x),
        };
        out.set_cell(nx, ny, true);
    }
    out
}

/// Rotate by a degree value; anything but 0, 90, 180 or 270 is rejected
pub fn rotate_degrees(grid: &Grid, degrees: u32) -> Result<Grid> {
    Ok(rotate(grid, Rotation::from_degrees(degrees)?))
}

/// Mirror a grid across an axis. Dimensions are unchanged.
pub fn flip(grid: &Grid, axis: FlipAxis) -> Grid {
    let (w, h) = (grid.width(), grid.height());
    let mut out = Grid::new(w, h);
    match axis {
        FlipAxis::Horizontal => {
            for (x, y) in grid.positions() {
                out.set_cell(w - 1 - x, y, true);
            }
        }
        FlipAxis::Vertical => {
            // Whole rows swap places, so move them as bit runs
            let row = w as usize;
            for y in 0..h as usize {
                let dest = (h as usize - 1 - y) * row;
                grid.bits().copy_to(out.bits_mut(), dest, y * row, row);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ###
    // #..
    fn ell() -> Grid {
        Grid::from_cells(3, 2, [(0, 0), (1, 0), (2, 0), (0, 1)]).unwrap()
    }

    #[test]
    fn test_rotate90() {
        // ##
        // .#
        // .#
        let expected = Grid::from_cells(2, 3, [(0, 0), (1, 0), (1, 1), (1, 2)]).unwrap();
        assert_eq!(rotate(&ell(), Rotation::Deg90), expected);
    }

    #[test]
    fn test_rotate180() {
        // ..#
        // ###
        let expected = Grid::from_cells(3, 2, [(2, 0), (0, 1), (1, 1), (2, 1)]).unwrap();
        assert_eq!(rotate(&ell(), Rotation::Deg180), expected);
    }

    #[test]
    fn test_rotate270() {
        // #.
        // #.
        // ##
        let expected = Grid::from_cells(2, 3, [(0, 0), (0, 1), (0, 2), (1, 2)]).unwrap();
        assert_eq!(rotate(&ell(), Rotation::Deg270), expected);
    }

    #[test]
    fn test_rotate_full_turn() {
        let shape = ell();
        let mut turned = shape.clone();
        for _ in 0..4 {
            turned = rotate(&turned, Rotation::Deg90);
        }
        assert_eq!(turned, shape);
        assert_eq!(
            rotate(&shape, Rotation::Deg180),
            rotate(&rotate(&shape, Rotation::Deg90), Rotation::Deg90)
        );
    }

    #[test]
    fn test_cross_is_rotation_symmetric() {
        let cross = Grid::from_cells(3, 3, [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]).unwrap();
        let rotated = rotate(&cross, Rotation::Deg90);
        assert_eq!(rotated, cross);
        assert_eq!(cross.occupied_count(), 5);
        assert_eq!(rotated.occupied_count(), 5);
    }

    #[test]
    fn test_rotate_degrees_rejects_unknown() {
        assert!(rotate_degrees(&ell(), 90).is_ok());
        assert!(rotate_degrees(&ell(), 45).is_err());
    }

    #[test]
    fn test_flip_axes() {
        // ###
        // ..#
        let horizontal = Grid::from_cells(3, 2, [(0, 0), (1, 0), (2, 0), (2, 1)]).unwrap();
        assert_eq!(flip(&ell(), FlipAxis::Horizontal), horizontal);

        // #..
        // ###
        let vertical = Grid::from_cells(3, 2, [(0, 0), (0, 1), (1, 1), (2, 1)]).unwrap();
        assert_eq!(flip(&ell(), FlipAxis::Vertical), vertical);

        for axis in [FlipAxis::Horizontal, FlipAxis::Vertical] {
            assert_eq!(flip(&flip(&ell(), axis), axis), ell());
        }
    }

    #[test]
    fn test_transforms_of_empty_grid() {
        let empty = Grid::new(0, 0);
        assert!(rotate(&empty, Rotation::Deg90).is_empty());
        assert!(flip(&empty, FlipAxis::Vertical).is_empty());
    }
}
