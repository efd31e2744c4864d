//! The `MobilityStore` — sparse per-agent path cache.

use rustc_hash::FxHashMap;

use aw_core::AgentId;

use crate::PathState;

/// Paths for agents that currently have one.
///
/// Only agents travelling toward a target have an entry; entries are removed
/// when the target activates or the path is abandoned.
#[derive(Debug, Clone, Default)]
pub struct MobilityStore {
    pub paths: FxHashMap<AgentId, PathState>,
}

impl MobilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `agent`'s path.
    #[inline]
    pub fn set(&mut self, agent: AgentId, path: PathState) {
        self.paths.insert(agent, path);
    }

    /// Drop `agent`'s path, returning it if there was one.
    #[inline]
    pub fn clear(&mut self, agent: AgentId) -> Option<PathState> {
        self.paths.remove(&agent)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&PathState> {
        self.paths.get(&agent)
    }

    #[inline]
    pub fn has_path(&self, agent: AgentId) -> bool {
        self.paths.contains_key(&agent)
    }

    /// Waypoints left on `agent`'s path, or `None` if it has no path.
    #[inline]
    pub fn remaining(&self, agent: AgentId) -> Option<usize> {
        self.paths.get(&agent).map(PathState::remaining)
    }

    /// `true` if `agent` has no path or has reached its last waypoint.
    #[inline]
    pub fn is_exhausted(&self, agent: AgentId) -> bool {
        self.paths.get(&agent).is_none_or(PathState::is_exhausted)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Drop every path.
    pub fn clear_all(&mut self) {
        self.paths.clear();
    }
}
