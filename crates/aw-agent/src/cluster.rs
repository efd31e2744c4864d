//! Spatial clusters of dormant agents.
//!
//! # Building
//!
//! [`build_clusters`] is a single-link greedy pass: take the last agent left
//! in the pool as a seed, absorb every remaining agent closer than the
//! threshold to that seed, and repeat until the pool is empty.  Seeds and
//! cluster order depend only on pool order, which keeps runs reproducible.
//! Distances are measured to the seed only, so a cluster's diameter is below
//! twice the threshold.
//!
//! # Lifetime
//!
//! Clusters are built once per run and then only shrink.  A [`ClusterSet`]
//! hands them out front-to-back through a FIFO queue; several agents may end
//! up sharing one cluster when an agent activated by a cluster holder
//! inherits the holder's cluster.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use aw_core::{AgentId, ClusterId, WorldPos};

/// An unordered group of dormant agents.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    pub members: Vec<AgentId>,
}

impl Cluster {
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }
}

/// Partition `pool` into threshold-based single-link clusters.
///
/// The first member of each returned cluster is its seed.
pub fn build_clusters(mut pool: Vec<(AgentId, WorldPos)>, threshold: f32) -> Vec<Cluster> {
    let mut clusters = Vec::new();

    while let Some((seed, seed_pos)) = pool.pop() {
        let mut members = vec![seed];
        // Walk backwards so removals don't disturb unvisited indices.
        for i in (0..pool.len()).rev() {
            if seed_pos.distance(pool[i].1) < threshold {
                members.push(pool.remove(i).0);
            }
        }
        clusters.push(Cluster { members });
    }

    clusters
}

// ── ClusterSet ────────────────────────────────────────────────────────────────

/// The per-run cluster cache.
///
/// Starts unbuilt; the clustering strategy calls [`build`](Self::build) on
/// its first invocation of a run.  Members leave their cluster through
/// [`evict`](Self::evict) when they activate or prove unreachable.  An
/// emptied cluster is retired: it stays in the id space but has no members
/// and is never handed out again.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
    /// Clusters not yet handed to any agent, front first.
    queue: VecDeque<ClusterId>,
    /// Which cluster each remaining member belongs to.
    home: FxHashMap<AgentId, ClusterId>,
    built: bool,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once clusters have been computed for this run.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Cluster `pool` and queue every cluster for hand-out.
    ///
    /// Replaces any previous contents.
    pub fn build(&mut self, pool: Vec<(AgentId, WorldPos)>, threshold: f32) {
        self.clear();
        for (i, cluster) in build_clusters(pool, threshold).into_iter().enumerate() {
            let id = ClusterId(i as u32);
            for &m in &cluster.members {
                self.home.insert(m, id);
            }
            self.queue.push_back(id);
            self.clusters.push(cluster);
        }
        self.built = true;
    }

    /// Take the next never-assigned cluster, skipping any that were retired
    /// while still queued.
    pub fn next_unassigned(&mut self) -> Option<ClusterId> {
        while let Some(id) = self.queue.pop_front() {
            if !self.clusters[id.index()].is_empty() {
                return Some(id);
            }
        }
        None
    }

    /// Clusters still waiting to be handed out.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Total clusters built this run, retired ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Remaining members of `id`.
    #[inline]
    pub fn members(&self, id: ClusterId) -> &[AgentId] {
        &self.clusters[id.index()].members
    }

    /// `true` when `id` has no members left.
    #[inline]
    pub fn is_retired(&self, id: ClusterId) -> bool {
        self.clusters[id.index()].is_empty()
    }

    /// All clusters with at least one member, with their ids.
    pub fn live(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(i, c)| (ClusterId(i as u32), c))
    }

    /// Cluster `agent` currently belongs to.
    #[inline]
    pub fn cluster_of(&self, agent: AgentId) -> Option<ClusterId> {
        self.home.get(&agent).copied()
    }

    /// Remove `agent` from its cluster.
    ///
    /// Returns the cluster it left and whether that cluster is now empty,
    /// or `None` if the agent belonged to no cluster.
    pub fn evict(&mut self, agent: AgentId) -> Option<(ClusterId, bool)> {
        let id = self.home.remove(&agent)?;
        let members = &mut self.clusters[id.index()].members;
        members.retain(|&m| m != agent);
        Some((id, members.is_empty()))
    }

    /// Forget all clusters; the next run rebuilds them.
    pub fn clear(&mut self) {
        self.clusters.clear();
        self.queue.clear();
        self.home.clear();
        self.built = false;
    }
}
