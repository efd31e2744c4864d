//! Cluster-scoped assignment.
//!
//! On its first call of a run the policy partitions every dormant agent into
//! clusters (see [`aw_agent::build_clusters`]).  Each active agent without a
//! cluster takes the next one from the queue; once the queue is exhausted such
//! agents idle.  An agent without a target tries exactly one candidate per
//! tick: the first unclaimed dormant member of its cluster.  A member it
//! cannot reach is evicted from the cluster so the next tick tries another.

use tracing::{debug, trace};

use aw_grid::PathFinder;

use crate::{Assign, AssignContext, AssignReport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clustering;

impl Assign for Clustering {
    fn assign<P: PathFinder>(&self, ctx: &mut AssignContext<'_, P>) -> AssignReport {
        let mut report = AssignReport::default();

        if !ctx.clusters.is_built() {
            let pool = ctx
                .agents
                .dormant_ids()
                .map(|a| (a, ctx.agents.position[a.index()]))
                .collect();
            ctx.clusters.build(pool, ctx.cluster_threshold);
            debug!(tick = %ctx.tick, clusters = ctx.clusters.len(), threshold = ctx.cluster_threshold, "clusters built");
        }

        let active = ctx.agents.active_agents().to_vec();
        for agent in active {
            if ctx.agents.cluster[agent.index()].is_none() {
                if let Some(id) = ctx.clusters.next_unassigned() {
                    trace!(tick = %ctx.tick, %agent, cluster = %id, "cluster handed out");
                    ctx.agents.cluster[agent.index()] = Some(id);
                }
            }

            if ctx.agents.target[agent.index()].is_some() {
                continue;
            }
            let Some(cluster) = ctx.agents.cluster[agent.index()] else { continue };

            let candidate = ctx
                .clusters
                .members(cluster)
                .iter()
                .copied()
                .find(|&m| !ctx.agents.is_active(m) && !ctx.claims.contains(m));
            let Some(candidate) = candidate else { continue };

            report.searches += 1;
            match ctx.path_between(agent, candidate) {
                Some(path) => {
                    trace!(tick = %ctx.tick, %agent, target = %candidate, %cluster, len = path.len(), "cluster assignment");
                    ctx.commit(agent, candidate, &path);
                    report.assigned += 1;
                }
                None => {
                    trace!(tick = %ctx.tick, %agent, %candidate, %cluster, "cluster member unreachable, evicted");
                    report.unreachable += 1;
                    if let Some((id, true)) = ctx.clusters.evict(candidate) {
                        ctx.agents.clear_cluster_refs(id);
                    }
                }
            }
        }

        report
    }
}
