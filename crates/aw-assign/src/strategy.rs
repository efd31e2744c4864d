//! The `Assign` trait and the configured-strategy enum.

use aw_core::StrategyKind;
use aw_grid::PathFinder;

use crate::{AssignContext, Clustering, GreedyDynamic, GreedyStatic};

/// What a policy did during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignReport {
    /// Path searches run.
    pub searches: usize,
    /// Agents that took a target (fresh or replacement).
    pub assigned: usize,
    /// Of those, agents that dropped a previous target to do so.
    pub switched: usize,
    /// Candidates found unreachable.
    pub unreachable: usize,
}

/// A target-assignment policy.
///
/// Called once per tick with a mutable [`AssignContext`].  Implementations
/// must leave the `TargetedSet` consistent: every claimed agent is dormant
/// and targeted by exactly one active agent.
pub trait Assign {
    fn assign<P: PathFinder>(&self, ctx: &mut AssignContext<'_, P>) -> AssignReport;
}

/// The policy selected by [`StrategyKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStrategy {
    GreedyStatic(GreedyStatic),
    GreedyDynamic(GreedyDynamic),
    Clustering(Clustering),
}

impl AssignmentStrategy {
    pub fn from_kind(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::GreedyStatic  => AssignmentStrategy::GreedyStatic(GreedyStatic),
            StrategyKind::GreedyDynamic => AssignmentStrategy::GreedyDynamic(GreedyDynamic),
            StrategyKind::Clustering    => AssignmentStrategy::Clustering(Clustering),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            AssignmentStrategy::GreedyStatic(_)  => StrategyKind::GreedyStatic,
            AssignmentStrategy::GreedyDynamic(_) => StrategyKind::GreedyDynamic,
            AssignmentStrategy::Clustering(_)    => StrategyKind::Clustering,
        }
    }
}

impl From<StrategyKind> for AssignmentStrategy {
    fn from(kind: StrategyKind) -> Self {
        Self::from_kind(kind)
    }
}

impl Assign for AssignmentStrategy {
    fn assign<P: PathFinder>(&self, ctx: &mut AssignContext<'_, P>) -> AssignReport {
        match self {
            AssignmentStrategy::GreedyStatic(s)  => s.assign(ctx),
            AssignmentStrategy::GreedyDynamic(s) => s.assign(ctx),
            AssignmentStrategy::Clustering(s)    => s.assign(ctx),
        }
    }
}
