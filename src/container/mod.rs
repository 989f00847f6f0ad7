//! Item container with collision-free placement
//!
//! A [`Container`] keeps an occupancy [`Grid`], a per-cell occupant map and a
//! slot table of placed items. Slot indices are stable for an item's lifetime;
//! freed indices go on a LIFO free list and are reused before the table grows.
//!
//! Invariant after every mutation: the set cells of the occupancy grid are
//! exactly the initial blocked cells plus the footprints of all live items.

mod search;
mod slot;

pub use slot::{Fit, ItemIndex, ItemSlot, Placement, PlacementRequest};

use crate::catalog::{Shape, ShapeCatalog};
use crate::error::Result;
use crate::models::{CellGrid, Grid, Position, Rotation, ShapeId, ValueGrid};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Occupancy grid plus stable-indexed item table
#[derive(Debug, Clone)]
pub struct Container {
    catalog: Arc<ShapeCatalog>,
    occupancy: Grid,
    occupants: ValueGrid<Option<ItemIndex>>,
    initial: Grid,
    slots: Vec<Option<ItemSlot>>,
    free: Vec<usize>,
}

impl Container {
    /// Create an empty container
    pub fn new(width: u32, height: u32, catalog: Arc<ShapeCatalog>) -> Self {
        Self::from_blocking_pattern(&Grid::new(width, height), catalog)
    }

    /// Create a container whose set cells in `pattern` are permanently blocked.
    ///
    /// The pattern is the snapshot restored by [`Container::reset`].
    pub fn from_blocking_pattern(pattern: &Grid, catalog: Arc<ShapeCatalog>) -> Self {
        Self {
            catalog,
            occupancy: pattern.clone(),
            occupants: ValueGrid::new(pattern.width(), pattern.height()),
            initial: pattern.clone(),
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Get container width
    pub fn width(&self) -> u32 {
        self.occupancy.width()
    }

    /// Get container height
    pub fn height(&self) -> u32 {
        self.occupancy.height()
    }

    /// Shape catalog the container resolves ids against
    pub fn catalog(&self) -> &Arc<ShapeCatalog> {
        &self.catalog
    }

    /// Live occupancy, blocked cells included
    pub fn occupancy(&self) -> &Grid {
        &self.occupancy
    }

    /// Blocked cells captured at construction
    pub fn initial_snapshot(&self) -> &Grid {
        &self.initial
    }

    /// Number of live items
    pub fn item_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever allocated (live or free)
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.occupancy.occupied_count()
    }

    /// Number of free cells
    pub fn free_space(&self) -> usize {
        self.occupancy.free_count()
    }

    /// Slot of a live item
    pub fn item(&self, index: ItemIndex) -> Option<&ItemSlot> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    /// Live items in index order
    pub fn items(&self) -> impl Iterator<Item = (ItemIndex, &ItemSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (ItemIndex(i), s)))
    }

    /// Item covering `(x, y)`; `None` for free, blocked or out-of-bounds cells
    pub fn cell_occupant(&self, x: i32, y: i32) -> Option<ItemIndex> {
        if !self.occupancy.contains(x, y) {
            return None;
        }
        self.occupants.cell(x as u32, y as u32)
    }

    /// Place a shape at its first fit, unrotated
    pub fn try_add(&mut self, shape_id: ShapeId) -> Result<Option<ItemIndex>> {
        let shape = self.catalog.shape(shape_id)?;
        match self.find_first_fit(shape.grid()) {
            Some(pos) => Ok(Some(self.insert(shape, pos))),
            None => Ok(None),
        }
    }

    /// Place a shape at its first fit, trying rotations in order
    pub fn try_add_rotating(&mut self, shape_id: ShapeId) -> Result<Option<Placement>> {
        let Some(fit) = self.find_first_fit_with_rotation(shape_id)? else {
            return Ok(None);
        };
        Ok(Some(self.commit(fit)?))
    }

    /// Place a shape with its top-left corner at `pos`
    pub fn try_add_at(&mut self, shape_id: ShapeId, pos: Position) -> Result<Option<ItemIndex>> {
        let shape = self.catalog.shape(shape_id)?;
        if !self.can_place(shape.grid(), pos) {
            return Ok(None);
        }
        Ok(Some(self.insert(shape, pos)))
    }

    /// Resolve a placement request: fixed or searched position, with or
    /// without rotation
    pub fn place(&mut self, request: PlacementRequest) -> Result<Option<Placement>> {
        let id = request.shape_id;
        let fit = match (request.position, request.allow_rotation) {
            (Some(pos), true) => self.find_rotation_at(id, pos)?,
            (None, true) => self.find_first_fit_with_rotation(id)?,
            (Some(pos), false) => self.can_place_id(id, pos)?.then_some(Fit {
                position: pos,
                rotation: Rotation::Deg0,
                shape_id: id,
            }),
            (None, false) => {
                let shape = self.catalog.shape(id)?;
                self.find_first_fit(shape.grid()).map(|position| Fit {
                    position,
                    rotation: Rotation::Deg0,
                    shape_id: id,
                })
            }
        };
        match fit {
            Some(fit) => Ok(Some(self.commit(fit)?)),
            None => Ok(None),
        }
    }

    /// Place shapes one after another at their first fits.
    ///
    /// A shape that does not fit is reported as `None` and the batch carries
    /// on; only contract errors (such as an unknown id) stop it.
    pub fn place_multiple(
        &mut self,
        shapes: &[ShapeId],
        allow_rotation: bool,
    ) -> Result<Vec<Option<Placement>>> {
        let mut placed = Vec::with_capacity(shapes.len());
        for &shape_id in shapes {
            let mut request = PlacementRequest::new(shape_id);
            request.allow_rotation = allow_rotation;
            let outcome = self.place(request)?;
            if outcome.is_none() {
                warn!(shape = shape_id.get(), "no room for shape, skipping");
            }
            placed.push(outcome);
        }
        Ok(placed)
    }

    fn commit(&mut self, fit: Fit) -> Result<Placement> {
        let shape = self.catalog.shape(fit.shape_id)?;
        let index = self.insert(shape, fit.position);
        Ok(Placement {
            index,
            shape_id: fit.shape_id,
            position: fit.position,
            rotation: fit.rotation,
        })
    }

    /// Stamp a feasible shape and record it, reusing the most recently freed
    /// slot if there is one
    fn insert(&mut self, shape: Arc<Shape>, pos: Position) -> ItemIndex {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        let item = ItemIndex(index);
        self.stamp(shape.grid(), pos, Some(item));
        trace!(index, shape = shape.id().get(), x = pos.x, y = pos.y, "item placed");
        self.slots[index] = Some(ItemSlot {
            shape_id: shape.id(),
            position: pos,
            shape,
        });
        item
    }

    /// Write a footprint into the occupancy and occupant grids; `None`
    /// clears it
    fn stamp(&mut self, shape: &Grid, pos: Position, occupant: Option<ItemIndex>) {
        let shape_width = shape.width() as usize;
        let width = self.width() as usize;
        let (px, py) = (pos.x as usize, pos.y as usize);
        let occupancy = self.occupancy.bits_mut();
        for row in 0..shape.height() as usize {
            let src = row * shape_width;
            let dst = (py + row) * width + px;
            let mut off = 0;
            while off < shape_width {
                let n = (shape_width - off).min(64);
                let mask = shape.bits().get_bits(src + off, n);
                if mask != 0 {
                    let current = occupancy.get_bits(dst + off, n);
                    let next = if occupant.is_some() {
                        current | mask
                    } else {
                        current & !mask
                    };
                    occupancy.set_bits(dst + off, next, n);
                }
                off += n;
            }
        }
        for (x, y) in shape.positions() {
            self.occupants
                .set(pos.x as u32 + x, pos.y as u32 + y, occupant);
        }
    }

    /// Remove an item and free its slot. Returns false (and does nothing) for
    /// out-of-range or already free indices.
    pub fn remove(&mut self, index: ItemIndex) -> bool {
        let Some(slot) = self.slots.get_mut(index.0).and_then(Option::take) else {
            return false;
        };
        self.stamp(slot.shape.grid(), slot.position, None);
        self.free.push(index.0);
        trace!(index = index.0, "item removed");
        true
    }

    /// Restore the initial blocked cells and drop every item and free slot
    pub fn clear(&mut self) {
        let size = self.initial.size();
        self.initial
            .bits()
            .copy_to(self.occupancy.bits_mut(), 0, 0, size);
        self.occupants.clear();
        let dropped = self.item_count();
        self.slots.clear();
        self.free.clear();
        debug!(dropped, "container reset");
    }

    /// Alias of [`Container::clear`]
    pub fn reset(&mut self) {
        self.clear();
    }

    /// Recompute occupancy from the snapshot and live slots and compare it
    /// with the stored state
    pub fn is_consistent(&self) -> bool {
        let mut expected = self.initial.clone();
        let mut occupants = ValueGrid::new(self.width(), self.height());
        for (index, slot) in self.items() {
            for (x, y) in slot.shape.grid().positions() {
                let cx = slot.position.x + x as i32;
                let cy = slot.position.y + y as i32;
                if !expected.contains(cx, cy) || expected.get_cell(cx as u32, cy as u32) {
                    return false;
                }
                expected.set_cell(cx as u32, cy as u32, true);
                occupants.set(cx as u32, cy as u32, Some(index));
            }
        }
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        expected == self.occupancy && occupants == self.occupants && live == self.item_count()
    }
}
