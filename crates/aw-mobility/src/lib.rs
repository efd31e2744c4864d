//! `aw-mobility` — agent paths and movement.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`state`]   | `PathState` — waypoints plus a monotone cursor                    |
//! | [`store`]   | `MobilityStore` — sparse `AgentId → PathState` map                |
//! | [`engine`]  | `MobilityEngine<P>` — path planning via a `PathFinder` + movement |
//!
//! # Movement model (exponential approach)
//!
//! Each tick an agent covers a fixed fraction of the remaining distance to
//! its current waypoint:
//!
//! ```text
//! pos ← pos + (waypoint - pos) · approach_factor
//! ```
//!
//! Once it is closer than `arrival_epsilon` the cursor advances to the next
//! waypoint.  Agents therefore slow down as they near each waypoint and never
//! overshoot; with the reference factor 0.4 and epsilon 0.1 a one-cell hop
//! takes about five ticks.

pub mod engine;
pub mod state;
pub mod store;


pub use engine::MobilityEngine;
pub use state::PathState;
pub use store::MobilityStore;
