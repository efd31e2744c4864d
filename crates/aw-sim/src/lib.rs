//! `aw-sim` — tick loop orchestrator for the rust_awaken simulator.
//!
//! # Tick loop
//!
//! ```text
//! while state == Running:
//!   ① Assign    — the configured strategy sets or replaces targets and
//!                 paths for active agents (path searches happen here).
//!   ② Move      — every active agent with a path steps toward its current
//!                 waypoint (exponential approach).
//!   ③ Arrivals  — each agent that was active when the pass began, has
//!                 exhausted its path and still holds a target wakes that
//!                 target (or drops it if somebody else already did).
//!   ④ Complete? — once every registered agent is active the run stops.
//! ```
//!
//! # Lifecycle
//!
//! ```text
//!            start_run            all active
//!   Idle ─────────────▶ Running ─────────────▶ Complete
//!    ▲                                            │
//!    └──────────── reset_run / reset_all ─────────┘
//! ```
//!
//! Scene construction (`add_obstacle`, `add_agent`) is only accepted while
//! `Idle`.  `reset_run` restores the layout captured by `start_run`;
//! `reset_all` forgets the scene entirely.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use aw_core::{SimConfig, StrategyKind};
//! use aw_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::new(40, StrategyKind::Clustering))
//!     .obstacle(0.0, 0.0)
//!     .agent(-10.0, -10.0)
//!     .agent(12.0, 7.0)
//!     .build()?;
//! sim.start_run(AgentId(0))?;
//! let report = sim.run_until_complete(10_000, &mut NoopObserver)?;
//! assert!(report.complete);
//! ```

pub mod builder;
pub mod error;
pub mod layout;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use layout::InitialLayout;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{AgentView, RunState, Simulation, TickReport};
