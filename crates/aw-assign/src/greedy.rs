//! Nearest-first assignment.
//!
//! Both greedy policies rank every unclaimed dormant agent by path length
//! (cell count) from the active agent's current cell.  Candidates are visited
//! in registry order and only a strictly shorter path replaces the current
//! best, so the earliest-registered of several equally close candidates wins.

use tracing::trace;

use aw_core::AgentId;
use aw_grid::{GridPath, PathFinder};

use crate::{Assign, AssignContext, AssignReport};

/// Shortest-path unclaimed dormant candidate for `agent`, if any is reachable.
fn nearest_unclaimed<P: PathFinder>(
    ctx:    &AssignContext<'_, P>,
    agent:  AgentId,
    report: &mut AssignReport,
) -> Option<(AgentId, GridPath)> {
    let mut best: Option<(AgentId, GridPath)> = None;

    for candidate in ctx.agents.dormant_ids() {
        if ctx.claims.contains(candidate) {
            continue;
        }
        report.searches += 1;
        let Some(path) = ctx.path_between(agent, candidate) else {
            trace!(tick = %ctx.tick, %agent, %candidate, "candidate unreachable");
            report.unreachable += 1;
            continue;
        };
        if best.as_ref().is_none_or(|(_, b)| path.len() < b.len()) {
            best = Some((candidate, path));
        }
    }

    best
}

// ── GreedyStatic ──────────────────────────────────────────────────────────────

/// Commit each idle active agent to its nearest unclaimed dormant agent and
/// never reconsider.
///
/// Agents that already hold a target are skipped entirely, so each agent runs
/// at most one round of searches per target it takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyStatic;

impl Assign for GreedyStatic {
    fn assign<P: PathFinder>(&self, ctx: &mut AssignContext<'_, P>) -> AssignReport {
        let mut report = AssignReport::default();
        let active = ctx.agents.active_agents().to_vec();

        for agent in active {
            if !ctx.agents.any_dormant() {
                break;
            }
            if ctx.agents.target[agent.index()].is_some() {
                continue;
            }
            if let Some((target, path)) = nearest_unclaimed(ctx, agent, &mut report) {
                trace!(tick = %ctx.tick, %agent, %target, len = path.len(), "static assignment");
                ctx.commit(agent, target, &path);
                report.assigned += 1;
            }
        }

        report
    }
}

// ── GreedyDynamic ─────────────────────────────────────────────────────────────

/// Re-evaluate every active agent's target each tick.
///
/// An agent switches to the best unclaimed candidate when it has no target,
/// when its target has meanwhile been activated by someone else, or when the
/// candidate's full path is strictly shorter than what is left of its
/// current one.  A tie keeps the current target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyDynamic;

impl Assign for GreedyDynamic {
    fn assign<P: PathFinder>(&self, ctx: &mut AssignContext<'_, P>) -> AssignReport {
        let mut report = AssignReport::default();
        let active = ctx.agents.active_agents().to_vec();

        for agent in active {
            if !ctx.agents.any_dormant() {
                break;
            }
            let Some((best, path)) = nearest_unclaimed(ctx, agent, &mut report) else {
                continue;
            };

            let current = ctx.agents.target[agent.index()];
            let remaining = ctx.mobility.store.remaining(agent).unwrap_or(usize::MAX);
            let switch = match current {
                None => true,
                Some(t) => ctx.agents.is_active(t) || path.len() < remaining,
            };
            if !switch {
                continue;
            }

            if let Some(old) = current {
                if !ctx.agents.is_active(old) {
                    ctx.claims.release(old);
                }
                report.switched += 1;
                trace!(tick = %ctx.tick, %agent, from = %old, to = %best, len = path.len(), remaining, "dynamic switch");
            } else {
                trace!(tick = %ctx.tick, %agent, target = %best, len = path.len(), "dynamic assignment");
            }
            ctx.commit(agent, best, &path);
            report.assigned += 1;
        }

        report
    }
}
