//! Unit tests for aw-sim.

use aw_core::{AgentId, SimConfig, StrategyKind, Tick};

use crate::{SimBuilder, SimObserver, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(strategy: StrategyKind) -> SimConfig {
    SimConfig::new(40, strategy)
}

/// Two agents one cell apart, both on cell centres of a 40-cell grid.
fn adjacent_pair(strategy: StrategyKind) -> Simulation {
    SimBuilder::new(config(strategy))
        .agent(0.5, 0.5)
        .agent(1.5, 0.5)
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    starts:      Vec<Tick>,
    activations: Vec<(Tick, AgentId, AgentId)>,
    woken_total: usize,
    completed:   Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_activation(&mut self, tick: Tick, claimer: AgentId, woken: AgentId) {
        self.activations.push((tick, claimer, woken));
    }

    fn on_tick_end(&mut self, _tick: Tick, _assign: &aw_assign::AssignReport, woken: usize) {
        self.woken_total += woken;
    }

    fn on_complete(&mut self, final_tick: Tick) {
        self.completed = Some(final_tick);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn registers_scene_in_order() {
        let sim = SimBuilder::new(config(StrategyKind::GreedyStatic))
            .obstacle(3.0, 3.0)
            .agent(-5.0, -5.0)
            .agent(5.0, 5.0)
            .build()
            .unwrap();
        assert_eq!(sim.agent_count(), 2);
        assert_eq!(sim.agent(AgentId(1)).unwrap().position.x, 5.0);
        assert_eq!(sim.obstacle_positions().len(), 1);
        assert_eq!(sim.grid().blocked_count(), 1);
        assert_eq!(sim.state(), crate::RunState::Idle);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = SimConfig { approach_factor: 0.0, ..SimConfig::default() };
        assert!(matches!(Simulation::new(bad), Err(SimError::Config(_))));

        let bad = SimConfig::new(0, StrategyKind::Clustering);
        assert!(matches!(SimBuilder::new(bad).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn oversized_grid_is_an_error_not_a_panic() {
        let huge = SimConfig::new(u32::MAX, StrategyKind::GreedyStatic);
        assert!(matches!(Simulation::new(huge), Err(SimError::Config(_))));

        let just_over = SimConfig::new(SimConfig::MAX_GRID_SIZE + 1, StrategyKind::Clustering);
        assert!(matches!(SimBuilder::new(just_over).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn off_grid_obstacle_is_recorded_but_blocks_nothing() {
        let sim = SimBuilder::new(config(StrategyKind::GreedyStatic))
            .obstacle(500.0, 0.0)
            .build()
            .unwrap();
        assert_eq!(sim.obstacle_positions().len(), 1);
        assert_eq!(sim.grid().blocked_count(), 0);
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;
    use crate::{NoopObserver, RunState, SimError};

    #[test]
    fn tick_before_start_is_a_no_op() {
        let mut sim = adjacent_pair(StrategyKind::GreedyStatic);
        let report = sim.tick();
        assert_eq!(report.tick, Tick::ZERO);
        assert!(!report.complete);
        assert_eq!(sim.tick_count(), 0);
        assert!(sim.active_agents().is_empty());
    }

    #[test]
    fn start_run_validates() {
        let mut sim = adjacent_pair(StrategyKind::GreedyStatic);
        assert!(matches!(sim.start_run(AgentId(9)), Err(SimError::AgentNotFound(AgentId(9)))));
        assert_eq!(sim.state(), RunState::Idle, "failed start changes nothing");
        assert!(sim.initial_layout().is_none());

        sim.start_run(AgentId(0)).unwrap();
        assert_eq!(sim.state(), RunState::Running);
        assert_eq!(sim.active_agents(), &[AgentId(0)]);
        assert!(matches!(
            sim.start_run(AgentId(1)),
            Err(SimError::InvalidState { state: RunState::Running, .. })
        ));
    }

    #[test]
    fn construction_only_while_idle() {
        let mut sim = adjacent_pair(StrategyKind::GreedyStatic);
        sim.start_run(AgentId(0)).unwrap();
        assert!(sim.add_agent(3.0, 3.0).is_err());
        assert!(sim.add_obstacle(3.0, 3.0).is_err());
        assert!(sim.configure(20, StrategyKind::Clustering).is_err());
        assert_eq!(sim.agent_count(), 2);
        assert!(sim.obstacle_positions().is_empty());
    }

    #[test]
    fn single_agent_completes_on_first_tick() {
        let mut sim = SimBuilder::new(config(StrategyKind::GreedyDynamic))
            .agent(0.0, 0.0)
            .build()
            .unwrap();
        sim.start_run(AgentId(0)).unwrap();
        let report = sim.tick();
        assert!(report.complete);
        assert_eq!(report.tick, Tick(1));

        // Further ticks change nothing.
        let report = sim.tick();
        assert_eq!(report.tick, Tick(1));
        assert!(sim.is_complete());
    }

    #[test]
    fn run_until_complete_requires_running() {
        let mut sim = adjacent_pair(StrategyKind::GreedyStatic);
        assert!(matches!(
            sim.run_until_complete(10, &mut NoopObserver),
            Err(SimError::InvalidState { state: RunState::Idle, .. })
        ));
    }

    #[test]
    fn configure_rebuilds_grid() {
        let mut sim = SimBuilder::new(config(StrategyKind::GreedyStatic))
            .obstacle(15.0, 0.0)
            .build()
            .unwrap();
        assert_eq!(sim.grid().blocked_count(), 1);

        // Cell 35 on a 40 grid; off the grid once it shrinks to 20.
        sim.configure(20, StrategyKind::Clustering).unwrap();
        assert_eq!(sim.grid().size(), 20);
        assert_eq!(sim.grid().blocked_count(), 0);
        assert_eq!(sim.obstacle_positions().len(), 1);
        assert_eq!(sim.strategy(), StrategyKind::Clustering);

        sim.configure(40, StrategyKind::GreedyStatic).unwrap();
        assert_eq!(sim.grid().blocked_count(), 1);

        assert!(sim.configure(0, StrategyKind::GreedyStatic).is_err());
        assert_eq!(sim.grid().size(), 40, "rejected config leaves grid alone");

        let err = sim.configure(u32::MAX, StrategyKind::Clustering);
        assert!(matches!(err, Err(crate::SimError::Config(_))));
        assert_eq!(sim.grid().size(), 40);
        assert_eq!(sim.grid().blocked_count(), 1);
        assert_eq!(sim.strategy(), StrategyKind::GreedyStatic);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use super::*;
    use crate::NoopObserver;

    #[test]
    fn same_cell_pair_wakes_on_first_tick() {
        for kind in StrategyKind::ALL {
            let mut sim = SimBuilder::new(config(kind))
                .agent(0.5, 0.5)
                .agent(0.5, 0.5)
                .build()
                .unwrap();
            sim.start_run(AgentId(0)).unwrap();
            let report = sim.tick();
            assert!(report.complete, "{kind}");
            assert_eq!(report.woken, 1);
        }
    }

    #[test]
    fn adjacent_pair_timing() {
        // Tick 1 consumes the start waypoint; the one-cell hop then shrinks
        // by 0.6 per tick and drops below 0.1 on the fifth step.
        let mut sim = adjacent_pair(StrategyKind::GreedyStatic);
        sim.start_run(AgentId(0)).unwrap();

        sim.tick();
        assert_eq!(sim.target_of(AgentId(0)), Some(AgentId(1)));
        assert_eq!(sim.targeted(), vec![AgentId(1)]);
        assert_eq!(sim.path_of(AgentId(0)).unwrap().index, 1);

        for _ in 2..6 {
            assert!(!sim.tick().complete);
        }
        let report = sim.tick();
        assert!(report.complete);
        assert_eq!(report.tick, Tick(6));
        assert!(sim.targeted().is_empty());
        assert_eq!(sim.target_of(AgentId(0)), None);
        assert!(sim.path_of(AgentId(0)).is_none());
        assert_eq!(sim.active_agents(), &[AgentId(0), AgentId(1)]);
    }

    #[test]
    fn observer_sees_every_activation() {
        let mut sim = SimBuilder::new(config(StrategyKind::GreedyStatic))
            .agent(0.5, 0.5)
            .agent(3.5, 0.5)
            .agent(6.5, 0.5)
            .build()
            .unwrap();
        sim.start_run(AgentId(0)).unwrap();
        let mut rec = Recorder::default();
        let report = sim.run_until_complete(1_000, &mut rec).unwrap();

        assert!(report.complete);
        assert_eq!(rec.completed, Some(report.tick));
        assert_eq!(rec.starts.len() as u64, report.tick.0);
        assert_eq!(rec.woken_total, 2);
        let order: Vec<_> = rec.activations.iter().map(|&(_, c, w)| (c, w)).collect();
        assert_eq!(order, vec![(AgentId(0), AgentId(1)), (AgentId(0), AgentId(2))]);
        assert!(rec.activations[0].0 < rec.activations[1].0);
    }

    #[test]
    fn woken_agent_acts_from_next_tick() {
        let mut sim = SimBuilder::new(config(StrategyKind::GreedyStatic))
            .agent(0.5, 0.5)
            .agent(0.5, 0.5)
            .agent(10.5, 10.5)
            .build()
            .unwrap();
        sim.start_run(AgentId(0)).unwrap();
        sim.tick();
        assert_eq!(sim.active_agents(), &[AgentId(0), AgentId(1)]);
        assert_eq!(sim.target_of(AgentId(1)), None);

        sim.tick();
        // Agent 0 gets first pick; agent 1 finds the only candidate claimed.
        assert_eq!(sim.target_of(AgentId(0)), Some(AgentId(2)));
        assert_eq!(sim.target_of(AgentId(1)), None);
    }

    #[test]
    fn unreachable_agent_never_completes() {
        let mut builder = SimBuilder::new(SimConfig::new(12, StrategyKind::GreedyDynamic))
            .agent(-5.5, -5.5)
            .agent(0.5, 0.5);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx != 0 || dy != 0 {
                    builder = builder.obstacle(0.5 + dx as f32, 0.5 + dy as f32);
                }
            }
        }
        let mut sim = builder.build().unwrap();
        sim.start_run(AgentId(0)).unwrap();
        let report = sim.run_until_complete(50, &mut NoopObserver).unwrap();
        assert!(!report.complete);
        assert_eq!(report.tick, Tick(50));
        assert!(sim.targeted().is_empty());
        assert!(!sim.agent(AgentId(1)).unwrap().active);
    }

    #[test]
    fn woken_agent_inherits_cluster() {
        let mut sim = SimBuilder::new(config(StrategyKind::Clustering))
            .agent(0.5, 0.5)
            .agent(1.5, 0.5)
            .agent(2.5, 0.5)
            .build()
            .unwrap();
        sim.start_run(AgentId(0)).unwrap();
        sim.tick();
        // One cluster [2, 1]; agent 0 heads for its seed.
        assert_eq!(sim.clusters().len(), 1);
        let cluster = sim.cluster_of(AgentId(0));
        assert!(cluster.is_some());
        assert_eq!(sim.target_of(AgentId(0)), Some(AgentId(2)));

        let mut rec = Recorder::default();
        while rec.activations.is_empty() {
            sim.tick_with(&mut rec);
        }
        assert_eq!(rec.activations[0].2, AgentId(2));
        assert_eq!(sim.cluster_of(AgentId(2)), cluster);

        let report = sim.run_until_complete(1_000, &mut NoopObserver).unwrap();
        assert!(report.complete);
        assert!(sim.clusters().live().next().is_none());
        assert_eq!(sim.cluster_of(AgentId(0)), None);
    }
}

// ── Resets ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resets {
    use super::*;
    use crate::{NoopObserver, RunState};

    fn scene(kind: StrategyKind) -> Simulation {
        SimBuilder::new(config(kind))
            .obstacle(2.5, 0.5)
            .obstacle(2.5, 1.5)
            .agent(0.5, 0.5)
            .agent(5.5, 0.5)
            .agent(-6.5, 4.5)
            .build()
            .unwrap()
    }

    #[test]
    fn reset_run_restores_layout_and_ids() {
        let mut sim = scene(StrategyKind::GreedyDynamic);
        let before: Vec<_> = sim.agents().collect();
        sim.start_run(AgentId(0)).unwrap();
        let first = sim.run_until_complete(2_000, &mut NoopObserver).unwrap();
        assert!(first.complete);

        sim.reset_run();
        assert_eq!(sim.state(), RunState::Idle);
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.agents().collect::<Vec<_>>(), before);
        assert!(sim.targeted().is_empty());
        assert!(sim.clusters().is_empty());
        assert_eq!(sim.grid().blocked_count(), 2);
        assert_eq!(sim.obstacle_positions().len(), 2);
        assert!(sim.initial_layout().is_some());

        // Deterministic replay.
        sim.start_run(AgentId(0)).unwrap();
        let second = sim.run_until_complete(2_000, &mut NoopObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reset_run_mid_run_and_edit() {
        let mut sim = scene(StrategyKind::Clustering);
        sim.start_run(AgentId(1)).unwrap();
        for _ in 0..10 {
            sim.tick();
        }
        sim.reset_run();
        assert!(sim.active_agents().is_empty());
        assert!(sim.agents().all(|a| !a.active));
        // Idle again: the scene may be edited.
        assert_eq!(sim.add_agent(8.5, 8.5).unwrap(), AgentId(3));
    }

    #[test]
    fn reset_run_without_layout_keeps_scene() {
        let mut sim = scene(StrategyKind::GreedyStatic);
        sim.reset_run();
        assert_eq!(sim.agent_count(), 3);
        assert_eq!(sim.grid().blocked_count(), 2);
    }

    #[test]
    fn reset_all_clears_everything() {
        let mut sim = scene(StrategyKind::GreedyStatic);
        sim.start_run(AgentId(0)).unwrap();
        sim.tick();
        sim.reset_all();
        assert_eq!(sim.state(), RunState::Idle);
        assert_eq!(sim.agent_count(), 0);
        assert!(sim.obstacle_positions().is_empty());
        assert_eq!(sim.grid().blocked_count(), 0);
        assert!(sim.initial_layout().is_none());
        assert_eq!(sim.config().grid_size, 40, "config survives");
    }
}
