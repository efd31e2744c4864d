//! Per-agent path state.

use aw_core::WorldPos;

/// Waypoints an agent is following and how far along it is.
///
/// `index` only ever increases while the path is held; a new path replaces
/// the whole state.
#[derive(Debug, Clone, PartialEq)]
pub struct PathState {
    /// Cell-centre waypoints from the agent's start cell to its target's cell.
    pub waypoints: Vec<WorldPos>,

    /// Index of the waypoint currently being approached.  Equal to
    /// `waypoints.len()` once the path is exhausted.
    pub index: usize,
}

impl PathState {
    #[inline]
    pub fn new(waypoints: Vec<WorldPos>) -> Self {
        Self { waypoints, index: 0 }
    }

    /// The waypoint being approached, or `None` when exhausted.
    #[inline]
    pub fn current(&self) -> Option<WorldPos> {
        self.waypoints.get(self.index).copied()
    }

    /// Waypoints not yet reached, the current one included.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.waypoints.len().saturating_sub(self.index)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.waypoints.len()
    }

    /// Move the cursor to the next waypoint (saturating at the end).
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.index += 1;
        }
    }
}
