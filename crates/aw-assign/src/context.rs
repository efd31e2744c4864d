//! The mutable per-tick view assignment policies and arrivals work against.

use aw_agent::{AgentStore, ClusterSet, TargetedSet};
use aw_core::{AgentId, Tick};
use aw_grid::{GridPath, OccupancyGrid, PathFinder};
use aw_mobility::MobilityEngine;

/// Everything a policy, or the arrival pass after movement, may read or
/// mutate during one tick.
///
/// Built by `aw-sim` from disjoint field borrows of the `Simulation`, so the
/// grid stays shared while agents, paths, claims and clusters are exclusive.
pub struct AssignContext<'a, P: PathFinder> {
    /// Tick being processed.
    pub tick: Tick,

    /// Occupancy grid (read-only for the whole run).
    pub grid: &'a OccupancyGrid,

    /// Agent registry: positions, activity, targets, clusters.
    pub agents: &'a mut AgentStore,

    /// Path finder plus per-agent paths.
    pub mobility: &'a mut MobilityEngine<P>,

    /// Dormant agents already claimed.
    pub claims: &'a mut TargetedSet,

    /// Per-run cluster cache (clustering policy only).
    pub clusters: &'a mut ClusterSet,

    /// Seed distance used when the cluster cache is first built.
    pub cluster_threshold: f32,
}

impl<P: PathFinder> AssignContext<'_, P> {
    /// Path from `agent`'s current cell to `candidate`'s cell.
    #[inline]
    pub fn path_between(&self, agent: AgentId, candidate: AgentId) -> Option<GridPath> {
        self.mobility.plan(
            self.grid,
            self.agents.position[agent.index()],
            self.agents.position[candidate.index()],
        )
    }

    /// Point `agent` at `target` along `path` and claim the target.
    pub fn commit(&mut self, agent: AgentId, target: AgentId, path: &GridPath) {
        self.agents.target[agent.index()] = Some(target);
        self.mobility.begin_travel(agent, path, self.grid);
        self.claims.claim(target);
    }

    /// Clear `agent`'s target and path.  Claims are left alone.
    pub fn drop_target(&mut self, agent: AgentId) {
        self.agents.target[agent.index()] = None;
        self.mobility.stop(agent);
    }

    /// `claimer` has reached dormant `target`: activate it.
    ///
    /// The claim is released and the target leaves its cluster, retiring the
    /// cluster if it was the last member.  The woken agent joins `claimer`'s
    /// cluster, and both agents start the next tick without a target.
    pub fn wake(&mut self, claimer: AgentId, target: AgentId) {
        self.agents.activate(target);
        self.claims.release(target);
        if let Some((cluster, true)) = self.clusters.evict(target) {
            self.agents.clear_cluster_refs(cluster);
        }
        self.agents.cluster[target.index()] = self.agents.cluster[claimer.index()];
        self.drop_target(target);
        self.drop_target(claimer);
    }
}
