//! World-space and grid-space coordinate types.
//!
//! `WorldPos` is the continuous plane agents move through; `GridCell` is an
//! integer cell of the occupancy grid.  Conversion between the two depends on
//! the grid size and lives on `aw_grid::OccupancyGrid`.
//!
//! World coordinates use `f32`, matching the precision a presentation layer
//! needs; a 40×40 grid never comes near the limits of single precision.

use std::f32::consts::SQRT_2;

// ── WorldPos ──────────────────────────────────────────────────────────────────

/// A point on the world plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move `factor` of the way toward `target` (linear interpolation).
    ///
    /// Applied once per tick this gives exponential approach: the remaining
    /// distance shrinks by `1 - factor` every step and never overshoots.
    #[inline]
    pub fn lerp(self, target: WorldPos, factor: f32) -> WorldPos {
        WorldPos {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }
}

impl std::fmt::Display for WorldPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── GridCell ──────────────────────────────────────────────────────────────────

/// An integer cell coordinate.
///
/// Signed so that world positions beyond the grid edge convert to a cell that
/// is representable but out of bounds, rather than wrapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell displaced by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> GridCell {
        GridCell { x: self.x + dx, y: self.y + dy }
    }

    /// Straight-line distance between cell coordinates.
    #[inline]
    pub fn euclidean(self, other: GridCell) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Cheapest 8-connected move cost on an empty grid: diagonal steps cost
    /// √2, the leftover straight run costs 1 per cell.
    pub fn octile(self, other: GridCell) -> f32 {
        let dx = (other.x - self.x).unsigned_abs();
        let dy = (other.y - self.y).unsigned_abs();
        let diag = dx.min(dy) as f32;
        let straight = dx.abs_diff(dy) as f32;
        diag * SQRT_2 + straight
    }

    /// Number of 8-connected steps between the cells on an empty grid.
    #[inline]
    pub fn chebyshev(self, other: GridCell) -> u32 {
        (other.x - self.x)
            .unsigned_abs()
            .max((other.y - self.y).unsigned_abs())
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
