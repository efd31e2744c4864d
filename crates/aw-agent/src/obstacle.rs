//! Obstacle registry.

use aw_core::{ObstacleId, WorldPos};

/// World positions of every placed obstacle, indexed by `ObstacleId`.
///
/// Obstacles whose position falls outside the grid are still recorded here;
/// they simply have no effect on pathfinding.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleStore {
    pub position: Vec<WorldPos>,
}

impl ObstacleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pos: WorldPos) -> ObstacleId {
        let id = ObstacleId(self.position.len() as u32);
        self.position.push(pos);
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

    pub fn clear(&mut self) {
        self.position.clear();
    }
}
