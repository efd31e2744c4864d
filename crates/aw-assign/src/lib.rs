//! `aw-assign` — deciding which dormant agent each active agent pursues.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`context`]    | `AssignContext<'a, P>` — mutable tick view; commit and wake  |
//! | [`strategy`]   | `Assign` trait, `AssignmentStrategy` enum, `AssignReport`    |
//! | [`greedy`]     | `GreedyStatic`, `GreedyDynamic`                              |
//! | [`clustering`] | `Clustering`                                                 |
//!
//! # Contract
//!
//! A strategy runs once per tick, before movement.  It may set or replace
//! agents' targets, paths and clusters, and add or release claims in the
//! `TargetedSet`; it never moves an agent and never activates one.  An
//! unreachable candidate is skipped for the tick, never retried in a loop.
//!
//! Every policy calls the path finder at most once per (active agent,
//! candidate) pair per tick.  For the greedy policies that is
//! O(active × dormant) searches per tick; clustering narrows each agent's
//! candidates to one member of its own cluster.

pub mod clustering;
pub mod context;
pub mod greedy;
pub mod strategy;


pub use clustering::Clustering;
pub use context::AssignContext;
pub use greedy::{GreedyDynamic, GreedyStatic};
pub use strategy::{Assign, AssignReport, AssignmentStrategy};
