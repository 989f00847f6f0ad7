use std::fmt;

/// Integer grid coordinate of a shape's top-left corner inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    /// Y coordinate (row); compared first so ordering is row-major
    pub y: i32,
    /// X coordinate (column)
    pub x: i32,
}

impl Position {
    /// Create a new position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate position by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Row-major scan order score within a surface `width` cells wide
    pub fn scan_order(&self, width: u32) -> i64 {
        self.y as i64 * width as i64 + self.x as i64
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_is_row_major() {
        let a = Position::new(4, 0);
        let b = Position::new(0, 1);
        assert!(a < b);
        assert!(a.scan_order(5) < b.scan_order(5));
        assert_eq!(a.translate(1, 2), Position::new(5, 2));
        assert_eq!(b.to_string(), "(0, 1)");
    }
}
