//! Canonical shape repository
//!
//! Interns trimmed grids into small integer [`ShapeId`]s. Lookup is
//! content-addressed: equal `(width, height)` and equal bits always resolve to
//! the same id. Each entry lazily memoizes the id of its 90° rotation and its
//! horizontal mirror, so repeated transform requests cost one lookup.
//!
//! The catalog is append-only until [`ShapeCatalog::reset`]. Find-or-create is
//! serialized by a writer mutex; memoized neighbours live in per-entry
//! [`OnceLock`]s and are read without taking that mutex.

use crate::config;
use crate::error::{GridError, Result};
use crate::geometry::{flip, is_trimmed, rotate, trim};
use crate::models::{FlipAxis, Grid, Rotation, ShapeId};
use rayon::prelude::*;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};
use tracing::debug;

/// A catalog entry: trimmed pattern plus memoized transform neighbours
#[derive(Debug)]
pub struct Shape {
    id: ShapeId,
    grid: Grid,
    rotate90: OnceLock<ShapeId>,
    flip: OnceLock<ShapeId>,
}

impl Shape {
    fn new(id: ShapeId, grid: Grid) -> Self {
        Self {
            id,
            grid,
            rotate90: OnceLock::new(),
            flip: OnceLock::new(),
        }
    }

    /// Canonical id of this shape
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Trimmed pattern
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Bounding box width
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Bounding box height
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Number of cells the shape covers
    pub fn occupied_count(&self) -> usize {
        self.grid.occupied_count()
    }

    /// Memoized 90° clockwise neighbour, if already computed
    pub fn cached_rotate90(&self) -> Option<ShapeId> {
        self.rotate90.get().copied()
    }

    /// Memoized horizontal mirror, if already computed
    pub fn cached_flip(&self) -> Option<ShapeId> {
        self.flip.get().copied()
    }
}

/// Repository of canonical shapes
#[derive(Debug)]
pub struct ShapeCatalog {
    entries: RwLock<Vec<Arc<Shape>>>,
    writer: Mutex<()>,
}

impl ShapeCatalog {
    /// Create a catalog holding only the reserved empty shape
    pub fn new() -> Self {
        Self::with_capacity(config::catalog_capacity())
    }

    /// Create a catalog with room for `capacity` shapes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity.max(1));
        entries.push(Self::empty_entry());
        Self {
            entries: RwLock::new(entries),
            writer: Mutex::new(()),
        }
    }

    fn empty_entry() -> Arc<Shape> {
        let shape = Shape::new(ShapeId::EMPTY, Grid::new(0, 0));
        let _ = shape.rotate90.set(ShapeId::EMPTY);
        let _ = shape.flip.set(ShapeId::EMPTY);
        Arc::new(shape)
    }

    /// Number of entries, the reserved empty shape included
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when only the reserved empty shape is present
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Look up an entry by id
    pub fn shape(&self, id: ShapeId) -> Result<Arc<Shape>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        usize::try_from(id.get())
            .ok()
            .and_then(|index| entries.get(index))
            .cloned()
            .ok_or(GridError::UnknownShape(id))
    }

    /// Trimmed pattern of an entry
    pub fn grid(&self, id: ShapeId) -> Result<Grid> {
        Ok(self.shape(id)?.grid().clone())
    }

    /// Bounding box `(width, height)` of an entry
    pub fn bounds(&self, id: ShapeId) -> Result<(u32, u32)> {
        let shape = self.shape(id)?;
        Ok((shape.width(), shape.height()))
    }

    /// Find an existing id for a trimmed grid without inserting
    pub fn find(&self, grid: &Grid) -> Option<ShapeId> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .find(|shape| shape.grid == *grid)
            .map(|shape| shape.id)
    }

    /// Return the id of `grid`, inserting it if new.
    ///
    /// The grid must already be trimmed; the catalog never trims on the
    /// caller's behalf.
    pub fn intern(&self, grid: &Grid) -> Result<ShapeId> {
        if !is_trimmed(grid) {
            return Err(GridError::NotTrimmed {
                width: grid.width(),
                height: grid.height(),
            });
        }

        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = self.find(grid) {
            return Ok(id);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let id = ShapeId::new(entries.len() as i32);
        entries.push(Arc::new(Shape::new(id, grid.clone())));
        debug!(
            id = id.get(),
            width = grid.width(),
            height = grid.height(),
            cells = grid.occupied_count(),
            "interned new shape"
        );
        Ok(id)
    }

    /// Trim `grid` and intern the result
    pub fn intern_trimmed(&self, grid: &Grid) -> Result<ShapeId> {
        self.intern(&trim(grid))
    }

    /// Trim and intern a batch of grids, returning ids in input order.
    ///
    /// Large batches are spread over the rayon pool.
    pub fn intern_all(&self, grids: &[Grid]) -> Result<Vec<ShapeId>> {
        if grids.len() >= config::parallel_ingest_min() {
            grids.par_iter().map(|g| self.intern_trimmed(g)).collect()
        } else {
            grids.iter().map(|g| self.intern_trimmed(g)).collect()
        }
    }

    /// Id of the shape rotated 90° clockwise
    pub fn rotate90(&self, id: ShapeId) -> Result<ShapeId> {
        let shape = self.shape(id)?;
        if let Some(cached) = shape.cached_rotate90() {
            return Ok(cached);
        }
        let rotated = self.intern(&rotate(shape.grid(), Rotation::Deg90))?;
        Ok(*shape.rotate90.get_or_init(|| rotated))
    }

    /// Id of the shape mirrored left-right. `flip(flip(id)) == id`.
    pub fn flip(&self, id: ShapeId) -> Result<ShapeId> {
        let shape = self.shape(id)?;
        if let Some(cached) = shape.cached_flip() {
            return Ok(cached);
        }
        let flipped = self.intern(&flip(shape.grid(), FlipAxis::Horizontal))?;
        let _ = self.shape(flipped)?.flip.set(id);
        Ok(*shape.flip.get_or_init(|| flipped))
    }

    /// Id of the shape after `rotation`, chained through the 90° cache
    pub fn rotated(&self, id: ShapeId, rotation: Rotation) -> Result<ShapeId> {
        let mut current = id;
        for _ in 0..rotation.quarter_turns() {
            current = self.rotate90(current)?;
        }
        Ok(current)
    }

    /// Id of the shape mirrored across `axis`.
    ///
    /// A vertical mirror is a horizontal mirror followed by a half turn.
    pub fn flipped(&self, id: ShapeId, axis: FlipAxis) -> Result<ShapeId> {
        let mirrored = self.flip(id)?;
        match axis {
            FlipAxis::Horizontal => Ok(mirrored),
            FlipAxis::Vertical => self.rotated(mirrored, Rotation::Deg180),
        }
    }

    /// Distinct ids reachable from `id` by rotation, in rotation order
    pub fn variants(&self, id: ShapeId) -> Result<Vec<(Rotation, ShapeId)>> {
        let mut out = vec![(Rotation::Deg0, id)];
        let mut current = id;
        for rotation in &Rotation::ALL[1..] {
            current = self.rotate90(current)?;
            if current == id {
                break;
            }
            if !out.iter().any(|(_, seen)| *seen == current) {
                out.push((*rotation, current));
            }
        }
        Ok(out)
    }

    /// Drop every entry except the reserved empty shape.
    ///
    /// Ids issued before the reset must not be used afterwards.
    pub fn reset(&self) {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = entries.len() - 1;
        entries.truncate(1);
        debug!(dropped, "shape catalog reset");
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
