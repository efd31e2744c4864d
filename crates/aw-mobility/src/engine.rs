//! High-level mobility engine: plans grid paths and advances agents.

use aw_agent::AgentStore;
use aw_core::{AgentId, SimConfig, WorldPos};
use aw_grid::{GridPath, OccupancyGrid, PathFinder};

use crate::{MobilityStore, PathState};

/// Wraps a [`PathFinder`] and a [`MobilityStore`] with the movement
/// parameters of the run.
///
/// # Type parameter
///
/// `P` must implement [`PathFinder`] (e.g. [`aw_grid::AStarPathFinder`]).
/// Swap it at compile time for a different search with no runtime overhead.
pub struct MobilityEngine<P: PathFinder> {
    /// The grid search.
    pub pathfinder: P,

    /// Per-agent paths.
    pub store: MobilityStore,

    /// Fraction of the remaining distance covered per tick, in `(0, 1]`.
    pub approach_factor: f32,

    /// Distance below which a waypoint counts as reached.
    pub arrival_epsilon: f32,
}

impl<P: PathFinder> MobilityEngine<P> {
    /// Create an engine with no paths and the movement parameters from
    /// `config`.
    pub fn new(pathfinder: P, config: &SimConfig) -> Self {
        Self {
            pathfinder,
            store:           MobilityStore::new(),
            approach_factor: config.approach_factor,
            arrival_epsilon: config.arrival_epsilon,
        }
    }

    /// Search for a path between the cells containing `from` and `to`.
    #[inline]
    pub fn plan(&self, grid: &OccupancyGrid, from: WorldPos, to: WorldPos) -> Option<GridPath> {
        self.pathfinder.find_path(grid, grid.to_grid(from), grid.to_grid(to))
    }

    /// Start `agent` along `path`, replacing any path it had.
    pub fn begin_travel(&mut self, agent: AgentId, path: &GridPath, grid: &OccupancyGrid) {
        self.store.set(agent, PathState::new(path.to_world(grid)));
    }

    /// Abandon `agent`'s path.
    #[inline]
    pub fn stop(&mut self, agent: AgentId) {
        self.store.clear(agent);
    }

    /// Move every active agent one step along its path.
    ///
    /// Returns the number of agents that reached a waypoint this step.
    pub fn advance(&mut self, agents: &mut AgentStore) -> usize {
        let (active, positions) = agents.active_and_positions_mut();
        let mut reached = 0;

        for &agent in active {
            let Some(state) = self.store.paths.get_mut(&agent) else { continue };
            let Some(waypoint) = state.current() else { continue };

            let pos = positions[agent.index()].lerp(waypoint, self.approach_factor);
            positions[agent.index()] = pos;

            if pos.distance(waypoint) < self.arrival_epsilon {
                state.advance();
                reached += 1;
            }
        }

        reached
    }
}
