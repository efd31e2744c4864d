//! `aw-grid` — occupancy grid and pathfinding.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `OccupancyGrid` — blocked cells + world/grid conversion     |
//! | [`router`]  | `PathFinder` trait, `GridPath`, `AStarPathFinder`           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod grid;
pub mod router;

#[cfg(test)]
mod tests;

pub use grid::OccupancyGrid;
pub use router::{AStarPathFinder, GridPath, PathFinder, SearchOutcome, SearchStats};
