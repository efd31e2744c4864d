//! `aw-agent` — registries for everything the simulation tracks per entity.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `AgentStore` (SoA agent state + activation order)         |
//! | [`obstacle`]    | `ObstacleStore`                                           |
//! | [`claims`]      | `TargetedSet` — dormant agents already claimed as targets |
//! | [`cluster`]     | `Cluster`, `ClusterSet`, `build_clusters`                 |
//!
//! Relationships between entities (`target`, `cluster`) are stored as typed
//! ids, never references, so every registry can be cleared or rebuilt
//! without dangling links.

pub mod claims;
pub mod cluster;
pub mod obstacle;
pub mod store;


pub use claims::TargetedSet;
pub use cluster::{Cluster, ClusterSet, build_clusters};
pub use obstacle::ObstacleStore;
pub use store::AgentStore;
