//! Feasibility checks and fit search. Nothing here mutates the container.

use super::{Container, Fit};
use crate::error::Result;
use crate::models::{Grid, Position, Rotation, ShapeId};

impl Container {
    /// Check whether `shape` can sit with its top-left corner at `pos`:
    /// fully inside the container and not covering any occupied cell.
    pub fn can_place(&self, shape: &Grid, pos: Position) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        if pos.x as i64 + shape.width() as i64 > self.width() as i64
            || pos.y as i64 + shape.height() as i64 > self.height() as i64
        {
            return false;
        }
        !self.overlaps(shape, pos.x as usize, pos.y as usize)
    }

    /// [`Container::can_place`] for a catalog shape
    pub fn can_place_id(&self, shape_id: ShapeId, pos: Position) -> Result<bool> {
        let shape = self.catalog.shape(shape_id)?;
        Ok(self.can_place(shape.grid(), pos))
    }

    /// Compare each shape row against the occupancy row beneath it, 64 bits
    /// at a time. Caller has already checked bounds.
    fn overlaps(&self, shape: &Grid, px: usize, py: usize) -> bool {
        let shape_width = shape.width() as usize;
        let width = self.width() as usize;
        let occupancy = self.occupancy.bits();
        for row in 0..shape.height() as usize {
            let src = row * shape_width;
            let dst = (py + row) * width + px;
            let mut off = 0;
            while off < shape_width {
                let n = (shape_width - off).min(64);
                let mask = shape.bits().get_bits(src + off, n);
                if mask != 0 && occupancy.get_bits(dst + off, n) & mask != 0 {
                    return true;
                }
                off += n;
            }
        }
        false
    }

    /// Candidate top-left positions in row-major order, or nothing if the
    /// shape is larger than the container
    fn candidates(&self, shape: &Grid) -> impl Iterator<Item = Position> {
        let fits = shape.width() <= self.width() && shape.height() <= self.height();
        let max_x = self.width().saturating_sub(shape.width()) as i32;
        let max_y = self.height().saturating_sub(shape.height()) as i32;
        (0..=max_y)
            .filter(move |_| fits)
            .flat_map(move |y| (0..=max_x).map(move |x| Position::new(x, y)))
    }

    /// First feasible position scanning rows top to bottom, columns left to
    /// right (smallest y, then smallest x)
    pub fn find_first_fit(&self, shape: &Grid) -> Option<Position> {
        self.candidates(shape)
            .find(|pos| !self.overlaps(shape, pos.x as usize, pos.y as usize))
    }

    /// Feasible position with the lowest score; ties keep the earliest in
    /// scan order
    pub fn find_best_fit_by(
        &self,
        shape: &Grid,
        mut score: impl FnMut(Position) -> i64,
    ) -> Option<Position> {
        let mut best: Option<(i64, Position)> = None;
        for pos in self.candidates(shape) {
            if self.overlaps(shape, pos.x as usize, pos.y as usize) {
                continue;
            }
            let s = score(pos);
            if best.is_none_or(|(current, _)| s < current) {
                best = Some((s, pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    /// Best fit under the default score `y * width + x`.
    ///
    /// This lands on the same position as [`Container::find_first_fit`];
    /// custom scoring goes through [`Container::find_best_fit_by`].
    pub fn find_best_fit(&self, shape: &Grid) -> Option<Position> {
        let width = self.width();
        self.find_best_fit_by(shape, |pos| pos.scan_order(width))
    }

    /// First fit trying 0°, 90°, 180° and 270° in order.
    ///
    /// Stops early once a rotation comes back to the starting shape, so
    /// symmetric shapes are not searched twice.
    pub fn find_first_fit_with_rotation(&self, shape_id: ShapeId) -> Result<Option<Fit>> {
        let mut current = shape_id;
        for rotation in Rotation::ALL {
            if rotation != Rotation::Deg0 {
                current = self.catalog.rotate90(current)?;
                if current == shape_id {
                    break;
                }
            }
            let shape = self.catalog.shape(current)?;
            if let Some(position) = self.find_first_fit(shape.grid()) {
                return Ok(Some(Fit {
                    position,
                    rotation,
                    shape_id: current,
                }));
            }
        }
        Ok(None)
    }

    /// Like [`Container::find_first_fit_with_rotation`] but at a fixed position
    pub fn find_rotation_at(&self, shape_id: ShapeId, pos: Position) -> Result<Option<Fit>> {
        let mut current = shape_id;
        for rotation in Rotation::ALL {
            if rotation != Rotation::Deg0 {
                current = self.catalog.rotate90(current)?;
                if current == shape_id {
                    break;
                }
            }
            let shape = self.catalog.shape(current)?;
            if self.can_place(shape.grid(), pos) {
                return Ok(Some(Fit {
                    position: pos,
                    rotation,
                    shape_id: current,
                }));
            }
        }
        Ok(None)
    }
}
