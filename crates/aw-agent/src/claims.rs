//! The set of dormant agents currently claimed as somebody's target.

use rustc_hash::FxHashSet;

use aw_core::AgentId;

/// Dormant agents that an active agent is already travelling to.
///
/// Set semantics guarantee an agent is claimed at most once.  Entries are
/// added when a strategy commits to a target and removed when that target
/// activates or its claimant switches away.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetedSet {
    inner: FxHashSet<AgentId>,
}

impl TargetedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `agent`.  Returns `false` if it was already claimed.
    #[inline]
    pub fn claim(&mut self, agent: AgentId) -> bool {
        self.inner.insert(agent)
    }

    /// Release a claim.  Returns `false` if `agent` was not claimed.
    #[inline]
    pub fn release(&mut self, agent: AgentId) -> bool {
        self.inner.remove(&agent)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.inner.contains(&agent)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Claimed agents in ascending id order.
    pub fn sorted(&self) -> Vec<AgentId> {
        let mut v: Vec<AgentId> = self.inner.iter().copied().collect();
        v.sort_unstable();
        v
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
