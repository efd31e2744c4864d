//! Fluent builder for constructing a [`Simulation`].

use aw_core::{SimConfig, WorldPos};
use aw_grid::{AStarPathFinder, PathFinder};

use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — grid size, strategy, movement parameters
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default             |
/// |--------------------|---------------------|
/// | `.pathfinder(p)`   | [`AStarPathFinder`] |
/// | `.obstacle(x, y)`  | no obstacles        |
/// | `.agent(x, y)`     | no agents           |
///
/// Obstacles and agents are registered in the order given, so the n-th
/// `.agent` call becomes `AgentId(n)`.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .obstacles(walls)
///     .agents(robots)
///     .build()?;
/// sim.start_run(AgentId(0))?;
/// ```
pub struct SimBuilder<P: PathFinder = AStarPathFinder> {
    config:     SimConfig,
    pathfinder: P,
    obstacles:  Vec<WorldPos>,
    agents:     Vec<WorldPos>,
}

impl SimBuilder<AStarPathFinder> {
    /// Create a builder using the default A* path finder.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            pathfinder: AStarPathFinder,
            obstacles:  Vec::new(),
            agents:     Vec::new(),
        }
    }
}

impl<P: PathFinder> SimBuilder<P> {
    /// Swap the path finder.
    pub fn pathfinder<Q: PathFinder>(self, pathfinder: Q) -> SimBuilder<Q> {
        SimBuilder {
            config:    self.config,
            pathfinder,
            obstacles: self.obstacles,
            agents:    self.agents,
        }
    }

    pub fn obstacle(mut self, x: f32, y: f32) -> Self {
        self.obstacles.push(WorldPos::new(x, y));
        self
    }

    pub fn obstacles(mut self, positions: impl IntoIterator<Item = WorldPos>) -> Self {
        self.obstacles.extend(positions);
        self
    }

    pub fn agent(mut self, x: f32, y: f32) -> Self {
        self.agents.push(WorldPos::new(x, y));
        self
    }

    pub fn agents(mut self, positions: impl IntoIterator<Item = WorldPos>) -> Self {
        self.agents.extend(positions);
        self
    }

    /// Validate the config and return an `Idle` [`Simulation`] holding the
    /// scene.
    pub fn build(self) -> SimResult<Simulation<P>> {
        let mut sim = Simulation::with_pathfinder(self.config, self.pathfinder)?;
        for pos in self.obstacles {
            sim.add_obstacle(pos.x, pos.y)?;
        }
        for pos in self.agents {
            sim.add_agent(pos.x, pos.y)?;
        }
        Ok(sim)
    }
}
