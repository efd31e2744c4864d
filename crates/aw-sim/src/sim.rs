//! The `Simulation` aggregate and its tick loop.

use std::fmt;

use tracing::{debug, info};

use aw_agent::{AgentStore, ClusterSet, ObstacleStore, TargetedSet};
use aw_assign::{Assign, AssignContext, AssignmentStrategy};
use aw_core::{AgentId, ClusterId, ObstacleId, SimConfig, StrategyKind, Tick, WorldPos};
use aw_grid::{AStarPathFinder, OccupancyGrid, PathFinder};
use aw_mobility::{MobilityEngine, PathState};

use crate::{InitialLayout, NoopObserver, SimError, SimObserver, SimResult};

// ── RunState ──────────────────────────────────────────────────────────────────

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Scene may be edited; no agent is active.
    #[default]
    Idle,
    /// Ticks advance the run.
    Running,
    /// Every agent is active; ticks are no-ops.
    Complete,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            RunState::Idle     => "idle",
            RunState::Running  => "running",
            RunState::Complete => "complete",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Query types ───────────────────────────────────────────────────────────────

/// What [`Simulation::tick`] reports back to the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick counter after the call (unchanged if the run was not running).
    pub tick: Tick,
    /// Agents activated during this call.
    pub woken: usize,
    /// `true` once every agent is active.
    pub complete: bool,
}

/// Read-only snapshot of one agent for a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:       AgentId,
    pub position: WorldPos,
    pub active:   bool,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The whole simulation: scene, run state, and the assignment policy.
///
/// `Simulation<P>` drives the tick loop described in the crate docs.  The
/// path finder is a type parameter so tests can wrap or replace the default
/// [`AStarPathFinder`] with no runtime cost.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Simulation::new`].
pub struct Simulation<P: PathFinder = AStarPathFinder> {
    config:    SimConfig,
    grid:      OccupancyGrid,
    agents:    AgentStore,
    obstacles: ObstacleStore,
    mobility:  MobilityEngine<P>,
    claims:    TargetedSet,
    clusters:  ClusterSet,
    strategy:  AssignmentStrategy,
    state:     RunState,
    tick:      Tick,
    layout:    Option<InitialLayout>,
}

impl Simulation<AStarPathFinder> {
    /// Empty scene with the default A* path finder.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_pathfinder(config, AStarPathFinder)
    }
}

impl<P: PathFinder> Simulation<P> {
    /// Empty scene using `pathfinder` for every search.
    pub fn with_pathfinder(config: SimConfig, pathfinder: P) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            grid:      OccupancyGrid::new(config.grid_size),
            agents:    AgentStore::new(),
            obstacles: ObstacleStore::new(),
            mobility:  MobilityEngine::new(pathfinder, &config),
            claims:    TargetedSet::new(),
            clusters:  ClusterSet::new(),
            strategy:  AssignmentStrategy::from_kind(config.strategy),
            state:     RunState::Idle,
            tick:      Tick::ZERO,
            layout:    None,
            config,
        })
    }

    fn require(&self, op: &'static str, allowed: &[RunState]) -> SimResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SimError::InvalidState { op, state: self.state })
        }
    }

    // ── Scene construction ────────────────────────────────────────────────

    /// Change the grid size and strategy.
    ///
    /// Allowed while `Idle` or `Complete`.  The grid is rebuilt and every
    /// recorded obstacle re-marked on it; obstacles that now fall outside
    /// stay recorded but block nothing.
    pub fn configure(&mut self, grid_size: u32, strategy: StrategyKind) -> SimResult<()> {
        self.require("configure", &[RunState::Idle, RunState::Complete])?;
        let config = SimConfig { grid_size, strategy, ..self.config.clone() };
        config.validate()?;

        self.grid = OccupancyGrid::new(grid_size);
        for &pos in &self.obstacles.position {
            mark_obstacle(&mut self.grid, pos);
        }
        self.strategy = AssignmentStrategy::from_kind(strategy);
        self.config = config;
        info!(grid_size, strategy = %strategy, "simulation configured");
        Ok(())
    }

    /// Record an obstacle at world `(x, y)` and block its cell.
    pub fn add_obstacle(&mut self, x: f32, y: f32) -> SimResult<ObstacleId> {
        self.require("add an obstacle", &[RunState::Idle])?;
        let pos = WorldPos::new(x, y);
        mark_obstacle(&mut self.grid, pos);
        Ok(self.obstacles.push(pos))
    }

    /// Register a dormant agent at world `(x, y)`.
    pub fn add_agent(&mut self, x: f32, y: f32) -> SimResult<AgentId> {
        self.require("add an agent", &[RunState::Idle])?;
        Ok(self.agents.push(WorldPos::new(x, y)))
    }

    // ── Run control ───────────────────────────────────────────────────────

    /// Capture the layout, zero the tick counter and activate `first`.
    pub fn start_run(&mut self, first: AgentId) -> SimResult<()> {
        self.require("start a run", &[RunState::Idle])?;
        if !self.agents.contains(first) {
            return Err(SimError::AgentNotFound(first));
        }

        self.layout = Some(InitialLayout {
            obstacles: self.obstacles.position.clone(),
            agents:    self.agents.position.clone(),
        });
        self.clear_run_state();
        self.agents.activate(first);
        self.state = RunState::Running;
        info!(
            agent = %first,
            agents = self.agents.len(),
            obstacles = self.obstacles.len(),
            strategy = %self.strategy.kind(),
            "run started"
        );
        Ok(())
    }

    /// Advance one tick.  See [`tick_with`](Self::tick_with).
    pub fn tick(&mut self) -> TickReport {
        self.tick_with(&mut NoopObserver)
    }

    /// Advance one tick, reporting to `observer`.
    ///
    /// Does nothing unless the run is `Running`; the returned report then
    /// just reflects the current state.
    pub fn tick_with<O: SimObserver>(&mut self, observer: &mut O) -> TickReport {
        if self.state != RunState::Running {
            return self.report(0);
        }

        self.tick = self.tick.next();
        let now = self.tick;
        observer.on_tick_start(now);

        // ── ① Assign ──────────────────────────────────────────────────────
        let assign = {
            let mut ctx = AssignContext {
                tick:              now,
                grid:              &self.grid,
                agents:            &mut self.agents,
                mobility:          &mut self.mobility,
                claims:            &mut self.claims,
                clusters:          &mut self.clusters,
                cluster_threshold: self.config.cluster_threshold,
            };
            self.strategy.assign(&mut ctx)
        };

        // ── ② Move ────────────────────────────────────────────────────────
        let reached = self.mobility.advance(&mut self.agents);

        // ── ③ Arrivals ────────────────────────────────────────────────────
        let woken = self.resolve_arrivals(now, observer);

        observer.on_tick_end(now, &assign, woken);
        debug!(
            tick = %now,
            searches = assign.searches,
            assigned = assign.assigned,
            switched = assign.switched,
            reached,
            woken,
            active = self.agents.active_count(),
            "tick"
        );

        // ── ④ Complete? ───────────────────────────────────────────────────
        if self.agents.all_active() {
            self.state = RunState::Complete;
            info!(tick = %now, agents = self.agents.len(), "run complete");
            observer.on_complete(now);
        }

        self.report(woken)
    }

    /// Tick until the run completes or `max_ticks` ticks have elapsed.
    ///
    /// Returns the last tick's report; `complete` is `false` if the budget
    /// ran out first (some agent may be unreachable).
    pub fn run_until_complete<O: SimObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> SimResult<TickReport> {
        self.require("run", &[RunState::Running])?;
        let mut report = self.report(0);
        for _ in 0..max_ticks {
            report = self.tick_with(observer);
            if report.complete {
                break;
            }
        }
        Ok(report)
    }

    /// Return to `Idle` with the layout captured at the last `start_run`.
    ///
    /// Agents keep their ids.  Without a captured layout only run state is
    /// cleared.
    pub fn reset_run(&mut self) {
        if let Some(layout) = self.layout.clone() {
            self.grid.clear();
            self.obstacles.clear();
            self.agents.clear();
            for &pos in &layout.obstacles {
                mark_obstacle(&mut self.grid, pos);
                self.obstacles.push(pos);
            }
            for &pos in &layout.agents {
                self.agents.push(pos);
            }
        }
        self.clear_run_state();
        self.state = RunState::Idle;
        info!(agents = self.agents.len(), obstacles = self.obstacles.len(), "run reset");
    }

    /// Remove every agent and obstacle and forget the captured layout.
    pub fn reset_all(&mut self) {
        self.grid.clear();
        self.obstacles.clear();
        self.agents.clear();
        self.layout = None;
        self.clear_run_state();
        self.state = RunState::Idle;
        info!("scene cleared");
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every agent in registration order.
    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        self.agents.agent_ids().map(|id| self.view(id))
    }

    pub fn agent(&self, id: AgentId) -> Option<AgentView> {
        self.agents.contains(id).then(|| self.view(id))
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Every recorded obstacle, including any outside the grid.
    pub fn obstacle_positions(&self) -> &[WorldPos] {
        &self.obstacles.position
    }

    /// Ticks elapsed in the current run.
    pub fn tick_count(&self) -> u64 {
        self.tick.0
    }

    pub fn is_complete(&self) -> bool {
        self.state == RunState::Complete
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Active agents in activation order.
    pub fn active_agents(&self) -> &[AgentId] {
        self.agents.active_agents()
    }

    pub fn target_of(&self, id: AgentId) -> Option<AgentId> {
        self.agents.target.get(id.index()).copied().flatten()
    }

    /// Remaining waypoints of `id`'s current path.
    pub fn path_of(&self, id: AgentId) -> Option<&PathState> {
        self.mobility.store.get(id)
    }

    pub fn cluster_of(&self, id: AgentId) -> Option<ClusterId> {
        self.agents.cluster.get(id.index()).copied().flatten()
    }

    /// Claimed dormant agents in ascending id order.
    pub fn targeted(&self) -> Vec<AgentId> {
        self.claims.sorted()
    }

    /// This run's clusters (empty unless the clustering strategy has run).
    pub fn clusters(&self) -> &ClusterSet {
        &self.clusters
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Layout captured by the last `start_run`, if any.
    pub fn initial_layout(&self) -> Option<&InitialLayout> {
        self.layout.as_ref()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn view(&self, id: AgentId) -> AgentView {
        AgentView {
            id,
            position: self.agents.position[id.index()],
            active:   self.agents.is_active(id),
        }
    }

    fn report(&self, woken: usize) -> TickReport {
        TickReport { tick: self.tick, woken, complete: self.is_complete() }
    }

    /// Forget everything a run derives: activity, targets, paths, claims,
    /// clusters and the tick counter.  Positions are left alone.
    fn clear_run_state(&mut self) {
        let positions = std::mem::take(&mut self.agents.position);
        self.agents.clear();
        for pos in positions {
            self.agents.push(pos);
        }
        self.mobility.store.clear_all();
        self.claims.clear();
        self.clusters.clear();
        self.tick = Tick::ZERO;
    }

    /// Wake the target of every agent that has finished its path.
    ///
    /// Only agents active when the pass begins are considered; an agent woken
    /// here first acts next tick.
    fn resolve_arrivals<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> usize {
        let active = self.agents.active_agents().to_vec();
        let mut ctx = AssignContext {
            tick:              now,
            grid:              &self.grid,
            agents:            &mut self.agents,
            mobility:          &mut self.mobility,
            claims:            &mut self.claims,
            clusters:          &mut self.clusters,
            cluster_threshold: self.config.cluster_threshold,
        };
        let mut woken = 0;

        for claimer in active {
            let Some(target) = ctx.agents.target[claimer.index()] else { continue };
            if !ctx.mobility.store.is_exhausted(claimer) {
                continue;
            }

            if ctx.agents.is_active(target) {
                ctx.drop_target(claimer);
                continue;
            }

            ctx.wake(claimer, target);
            woken += 1;
            debug!(tick = %now, %claimer, woken = %target, "activation");
            observer.on_activation(now, claimer, target);
        }

        woken
    }
}

/// Block the cell under `pos`; an off-grid obstacle blocks nothing.
fn mark_obstacle(grid: &mut OccupancyGrid, pos: WorldPos) {
    let cell = grid.to_grid(pos);
    if let Err(err) = grid.mark_blocked(cell) {
        debug!(%pos, %err, "obstacle outside grid");
    }
}
