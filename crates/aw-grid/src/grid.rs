//! Occupancy grid and coordinate-space conversion.
//!
//! # Coordinate spaces
//!
//! The grid is a `size × size` matrix centred on the world origin.  Cell
//! `(gx, gy)` covers the unit square whose centre is
//!
//! ```text
//! world = (gx - size/2 + 0.5, gy - size/2 + 0.5)
//! ```
//!
//! and world coordinate `c` falls in cell `round(c + size/2 - 0.5)`, with
//! halves rounding up.  The two maps are exact inverses on cell centres.
//!
//! # Out-of-bounds cells
//!
//! World space extends past the grid, so conversions may produce cells
//! outside `[0, size)`.  Such cells report as blocked; marking one returns
//! `OutOfBounds` and leaves the grid unchanged.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use aw_core::{AwError, AwResult, GridCell, WorldPos};

/// A square matrix of free/blocked cells.
///
/// Storage is column-major (`x * size + y`) in a flat `Vec<bool>`.  The size
/// is fixed at construction; [`clear`](Self::clear) frees every cell without
/// reallocating.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OccupancyGrid {
    size: u32,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// An all-free grid with `size × size` cells.
    pub fn new(size: u32) -> Self {
        let n = size as usize * size as usize;
        Self { size, blocked: vec![false; n] }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        let s = self.size as i32;
        (0..s).contains(&cell.x) && (0..s).contains(&cell.y)
    }

    /// Flat storage index of `cell`, or `None` when out of bounds.
    #[inline]
    pub fn index_of(&self, cell: GridCell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.x as usize * self.size as usize + cell.y as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn cell_at(&self, index: usize) -> GridCell {
        let s = self.size as usize;
        GridCell::new((index / s) as i32, (index % s) as i32)
    }

    /// `true` if `cell` cannot be entered.  Out-of-bounds cells count as
    /// blocked.
    #[inline]
    pub fn is_blocked(&self, cell: GridCell) -> bool {
        match self.index_of(cell) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }

    /// Blocked flag by flat index (hot path for the pathfinder).
    #[inline]
    pub fn is_blocked_index(&self, index: usize) -> bool {
        self.blocked[index]
    }

    /// Mark `cell` as blocked.
    ///
    /// Returns [`AwError::OutOfBounds`] when the cell lies outside the grid;
    /// the grid is left unchanged in that case.  Callers placing obstacles
    /// near the world edge are expected to treat this as informational.
    pub fn mark_blocked(&mut self, cell: GridCell) -> AwResult<()> {
        let i = self.index_of(cell).ok_or(AwError::OutOfBounds(cell))?;
        self.blocked[i] = true;
        Ok(())
    }

    /// Free every cell.
    pub fn clear(&mut self) {
        self.blocked.fill(false);
    }

    // ── Coordinate conversion ─────────────────────────────────────────────

    /// Cell containing world position `pos`.
    #[inline]
    pub fn to_grid(&self, pos: WorldPos) -> GridCell {
        let half = self.size as f32 / 2.0;
        // round-half-up of (c + half - 0.5)
        GridCell::new((pos.x + half).floor() as i32, (pos.y + half).floor() as i32)
    }

    /// World position of the centre of `cell`.
    #[inline]
    pub fn to_world(&self, cell: GridCell) -> WorldPos {
        let half = self.size as f32 / 2.0;
        WorldPos::new(cell.x as f32 - half + 0.5, cell.y as f32 - half + 0.5)
    }
}
