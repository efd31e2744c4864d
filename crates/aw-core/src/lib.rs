//! `aw-core` — foundational types for the `rust_awaken` simulator.
//!
//! This crate is a dependency of every other `aw-*` crate.  It has no
//! `aw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ObstacleId`, `ClusterId`                  |
//! | [`geo`]         | `WorldPos`, `GridCell`                                |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `SimConfig`, `StrategyKind`                           |
//! | [`rng`]         | `SceneRng` (seeded scene generation)                  |
//! | [`error`]       | `AwError`, `AwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SimConfig, StrategyKind};
pub use error::{AwError, AwResult};
pub use geo::{GridCell, WorldPos};
pub use ids::{AgentId, ClusterId, ObstacleId};
pub use rng::SceneRng;
pub use time::Tick;
