//! Structure-of-Arrays agent storage.
//!
//! Every `Vec` field has exactly `len()` elements; the `AgentId` value is the
//! index into all of them:
//!
//! ```ignore
//! let pos = store.position[agent.index()];
//! ```
//!
//! Path state (waypoints and cursor) lives in `aw_mobility::MobilityStore`,
//! which is sparse because only agents with a target carry a path.

use aw_core::{AgentId, ClusterId, WorldPos};

/// Registry of all agents.
///
/// Agents are appended with [`push`](Self::push) and never removed during a
/// run; a reset clears the whole store and re-registers the saved layout, so
/// ids stay dense and stable across resets.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStore {
    /// Current world position.
    pub position: Vec<WorldPos>,

    /// `true` once the agent has been activated.  Never reverts during a run.
    pub active: Vec<bool>,

    /// Dormant agent this agent is travelling to activate.
    pub target: Vec<Option<AgentId>>,

    /// Cluster this agent is working through (clustering strategy only).
    pub cluster: Vec<Option<ClusterId>>,

    /// Active agents in activation order.
    activation_order: Vec<AgentId>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new dormant agent at `pos`.
    pub fn push(&mut self, pos: WorldPos) -> AgentId {
        let id = AgentId(self.position.len() as u32);
        self.position.push(pos);
        self.active.push(false);
        self.target.push(None);
        self.cluster.push(None);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.len()
    }

    /// Iterator over all `AgentId`s in registration order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.len() as u32).map(AgentId)
    }

    // ── Activation ────────────────────────────────────────────────────────

    #[inline]
    pub fn is_active(&self, agent: AgentId) -> bool {
        self.active[agent.index()]
    }

    /// Mark `agent` active and append it to the activation order.
    ///
    /// Returns `false` (and changes nothing) if it was already active.
    pub fn activate(&mut self, agent: AgentId) -> bool {
        if self.active[agent.index()] {
            return false;
        }
        self.active[agent.index()] = true;
        self.activation_order.push(agent);
        true
    }

    /// Active agents, in the order they were activated.
    #[inline]
    pub fn active_agents(&self) -> &[AgentId] {
        &self.activation_order
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.activation_order.len()
    }

    /// Dormant agents in registration order.
    pub fn dormant_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|&a| !self.is_active(a))
    }

    /// Split borrow for the movement pass: the activation order (read) and
    /// every position (write).
    #[inline]
    pub fn active_and_positions_mut(&mut self) -> (&[AgentId], &mut [WorldPos]) {
        (&self.activation_order, &mut self.position)
    }

    /// `true` if at least one agent is still dormant.
    #[inline]
    pub fn any_dormant(&self) -> bool {
        self.active_count() < self.len()
    }

    /// `true` once every registered agent is active.
    #[inline]
    pub fn all_active(&self) -> bool {
        !self.any_dormant()
    }

    // ── Relationship helpers ──────────────────────────────────────────────

    /// Drop every agent's reference to `cluster`.
    pub fn clear_cluster_refs(&mut self, cluster: ClusterId) {
        for slot in self.cluster.iter_mut() {
            if *slot == Some(cluster) {
                *slot = None;
            }
        }
    }

    /// Remove every agent.
    pub fn clear(&mut self) {
        self.position.clear();
        self.active.clear();
        self.target.clear();
        self.cluster.clear();
        self.activation_order.clear();
    }
}
