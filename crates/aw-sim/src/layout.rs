//! Snapshot of a scene as it stood when a run started.

use aw_core::WorldPos;

/// Obstacle and agent positions captured by `Simulation::start_run`.
///
/// Entries are in registration order, so replaying them through
/// `add_obstacle`/`add_agent` reproduces the same ids.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialLayout {
    pub obstacles: Vec<WorldPos>,
    pub agents:    Vec<WorldPos>,
}

impl InitialLayout {
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}
