use crate::catalog::Shape;
use crate::models::{Position, Rotation, ShapeId};
use std::fmt;
use std::sync::Arc;

/// Stable handle to an item placed in a [`Container`](super::Container).
///
/// Valid until the item is removed; afterwards the same index may be handed
/// to a different item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIndex(pub(crate) usize);

impl ItemIndex {
    /// Wrap a raw slot index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw slot index
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed item: which shape, and where its top-left corner sits
#[derive(Debug, Clone)]
pub struct ItemSlot {
    pub(crate) shape_id: ShapeId,
    pub(crate) position: Position,
    pub(crate) shape: Arc<Shape>,
}

impl ItemSlot {
    /// Canonical id of the placed (already rotated) shape
    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    /// Top-left corner inside the container
    pub fn position(&self) -> Position {
        self.position
    }

    /// Catalog entry of the placed shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// A feasible spot found by a rotating search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    /// Top-left corner
    pub position: Position,
    /// Rotation applied to the requested shape
    pub rotation: Rotation,
    /// Canonical id of the rotated shape
    pub shape_id: ShapeId,
}

/// Outcome of a successful placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Slot the item now occupies
    pub index: ItemIndex,
    /// Canonical id of the placed (rotated) shape
    pub shape_id: ShapeId,
    /// Top-left corner
    pub position: Position,
    /// Rotation applied to the requested shape
    pub rotation: Rotation,
}

/// What to place and how much freedom the container has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Shape to place
    pub shape_id: ShapeId,
    /// Fixed top-left corner; `None` searches for the first fit
    pub position: Option<Position>,
    /// Whether 90°/180°/270° variants may be tried
    pub allow_rotation: bool,
}

impl PlacementRequest {
    /// Place anywhere, unrotated
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            position: None,
            allow_rotation: false,
        }
    }

    /// Pin the top-left corner
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Allow rotated variants
    pub fn rotating(mut self) -> Self {
        self.allow_rotation = true;
        self
    }
}
