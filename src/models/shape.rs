use crate::error::GridError;
use std::str::FromStr;

/// Canonical shape identity issued by a [`ShapeCatalog`](crate::catalog::ShapeCatalog)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ShapeId(i32);

impl ShapeId {
    /// The reserved empty (0x0) shape
    pub const EMPTY: ShapeId = ShapeId(0);

    /// Wrap a raw id
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer id
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Check if this is the reserved empty shape
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

/// Clockwise rotation in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// No rotation
    #[default]
    Deg0 = 0,
    /// 90° clockwise
    Deg90 = 1,
    /// 180°
    Deg180 = 2,
    /// 270° clockwise
    Deg270 = 3,
}

impl Rotation {
    /// All rotations in ascending order
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Get rotation from degrees (0, 90, 180 or 270)
    pub fn from_degrees(degrees: u32) -> Result<Self, GridError> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(GridError::InvalidArgument(format!(
                "rotation must be 0, 90, 180 or 270 degrees, got {other}"
            ))),
        }
    }

    /// Get rotation from a quarter-turn count (wraps modulo 4)
    pub fn from_quarter_turns(turns: u8) -> Self {
        Self::ALL[(turns & 3) as usize]
    }

    /// Angle in degrees
    pub fn degrees(self) -> u32 {
        self.quarter_turns() as u32 * 90
    }

    /// Number of 90° clockwise steps
    pub fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// Check if this rotation swaps width and height
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Mirror axis for [`flip`](crate::geometry::flip)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipAxis {
    /// Mirror left-right: `x -> width - 1 - x`
    Horizontal,
    /// Mirror top-bottom: `y -> height - 1 - y`
    Vertical,
}

impl FromStr for FlipAxis {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(FlipAxis::Horizontal),
            "v" | "vertical" => Ok(FlipAxis::Vertical),
            other => Err(GridError::InvalidArgument(format!(
                "flip axis must be horizontal or vertical, got {other:?}"
            ))),
        }
    }
}
