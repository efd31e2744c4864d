//! Scene loading: CSV files or a seeded random scatter.
//!
//! # CSV format
//!
//! One row per object, world coordinates (the grid is centred on the
//! origin).  Agents are registered in file order, so the first `agent` row
//! becomes `AgentId(0)`.
//!
//! ```csv
//! kind,x,y
//! obstacle,0.5,3.5
//! agent,-12.0,4.25
//! agent,9.5,-9.5
//! ```

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use aw_core::{SceneRng, SimConfig, WorldPos};
use aw_grid::OccupancyGrid;
use aw_sim::SimBuilder;

/// Draws allowed per agent before a random scene gives up.
const MAX_REDRAWS: usize = 10_000;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Obstacle,
    Agent,
}

#[derive(Deserialize)]
struct SceneRecord {
    kind: Kind,
    x:    f32,
    y:    f32,
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// Obstacle and agent positions, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub obstacles: Vec<WorldPos>,
    pub agents:    Vec<WorldPos>,
}

impl Scene {
    /// Load a scene from a CSV file.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening scene {}", path.display()))?;
        Self::load_reader(file).with_context(|| format!("reading scene {}", path.display()))
    }

    /// Like [`load_csv`](Self::load_csv) but accepts any `Read` source.
    pub fn load_reader<R: Read>(reader: R) -> Result<Self> {
        let mut scene = Scene::default();
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        for (row, record) in csv_reader.deserialize::<SceneRecord>().enumerate() {
            let record = record.with_context(|| format!("scene row {}", row + 1))?;
            let pos = WorldPos::new(record.x, record.y);
            match record.kind {
                Kind::Obstacle => scene.obstacles.push(pos),
                Kind::Agent    => scene.agents.push(pos),
            }
        }
        Ok(scene)
    }

    /// Scatter `agents` agents and `obstacles` obstacles uniformly over a
    /// `grid_size` grid.  The two populations draw from independent streams;
    /// agents are redrawn until they stand on a free cell.
    ///
    /// Fails if the obstacles leave no free cell, or an agent finds none
    /// within `MAX_REDRAWS` draws.
    pub fn random(seed: u64, grid_size: u32, agents: usize, obstacles: usize) -> Result<Self> {
        SimConfig { grid_size, ..SimConfig::default() }.validate()?;
        let half = grid_size as f32 / 2.0;
        let mut grid = OccupancyGrid::new(grid_size);

        let mut rng = SceneRng::new(seed);
        let mut obstacle_rng = rng.child(0);
        let mut agent_rng = rng.child(1);

        let obstacles: Vec<WorldPos> = (0..obstacles).map(|_| obstacle_rng.world_pos(half)).collect();
        for &pos in &obstacles {
            let cell = grid.to_grid(pos);
            // Rounding can push a draw onto the far edge; it blocks nothing.
            grid.mark_blocked(cell).ok();
        }
        if agents > 0 && grid.blocked_count() == grid.cell_count() {
            bail!("{} obstacles cover every cell of a {grid_size}x{grid_size} grid", obstacles.len());
        }

        let mut placed = Vec::with_capacity(agents);
        for n in 0..agents {
            let pos = (0..MAX_REDRAWS)
                .map(|_| agent_rng.world_pos(half))
                .find(|&p| !grid.is_blocked(grid.to_grid(p)))
                .with_context(|| format!("no free cell for agent {n} after {MAX_REDRAWS} draws"))?;
            placed.push(pos);
        }

        Ok(Scene { obstacles, agents: placed })
    }

    /// A builder holding this scene.
    pub fn builder(&self, config: SimConfig) -> SimBuilder {
        SimBuilder::new(config)
            .obstacles(self.obstacles.iter().copied())
            .agents(self.agents.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let csv = "kind,x,y\nagent,1.0,2.0\nobstacle, 0.5 , 0.5\nagent,-3,4\n";
        let scene = Scene::load_reader(Cursor::new(csv)).unwrap();
        assert_eq!(scene.agents, vec![WorldPos::new(1.0, 2.0), WorldPos::new(-3.0, 4.0)]);
        assert_eq!(scene.obstacles, vec![WorldPos::new(0.5, 0.5)]);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let csv = "kind,x,y\nrobot,1.0,2.0\n";
        let err = Scene::load_reader(Cursor::new(csv)).unwrap_err();
        assert!(format!("{err:#}").contains("scene row 1"));
    }

    #[test]
    fn random_scene_is_seeded() {
        let a = Scene::random(9, 40, 10, 5).unwrap();
        assert_eq!(a, Scene::random(9, 40, 10, 5).unwrap());
        assert_ne!(a, Scene::random(10, 40, 10, 5).unwrap());
        assert_eq!((a.agents.len(), a.obstacles.len()), (10, 5));
        assert!(a.agents.iter().all(|p| p.x.abs() <= 20.0 && p.y.abs() <= 20.0));
    }

    #[test]
    fn random_agents_avoid_obstacles() {
        let scene = Scene::random(4, 6, 12, 20).unwrap();
        let mut grid = OccupancyGrid::new(6);
        for &p in &scene.obstacles {
            grid.mark_blocked(grid.to_grid(p)).ok();
        }
        assert_eq!(scene.agents.len(), 12);
        assert!(scene.agents.iter().all(|&p| !grid.is_blocked(grid.to_grid(p))));
    }

    #[test]
    fn fully_blocked_grid_is_an_error() {
        // A single-cell grid: any obstacle covers it.
        let err = Scene::random(1, 1, 2, 3).unwrap_err();
        assert!(err.to_string().contains("cover every cell"), "{err}");

        // No agents to place, nothing to fail.
        assert_eq!(Scene::random(1, 1, 0, 3).unwrap().obstacles.len(), 3);
        assert!(Scene::random(1, 0, 1, 0).is_err());
    }
}
