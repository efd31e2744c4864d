//! awaken — headless driver for the rust_awaken simulator.
//!
//! Loads a scene (the embedded demo scene, a CSV file, or a seeded random
//! scatter), then runs one or every assignment strategy on it from the same
//! starting agent and prints how many ticks each needed.
//!
//! ```text
//! awaken [STRATEGY|all] [SCENE.csv | random:SEED]
//! RUST_LOG=aw_sim=debug awaken clustering
//! ```

mod scene;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use aw_assign::AssignReport;
use aw_core::{AgentId, SimConfig, StrategyKind, Tick};
use aw_sim::SimObserver;

use scene::Scene;

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_SIZE:        u32   = SimConfig::DEFAULT_GRID_SIZE;
const MAX_TICKS:        u64   = 50_000;
const RANDOM_AGENTS:    usize = 30;
const RANDOM_OBSTACLES: usize = 120;

// ── Scene CSV ─────────────────────────────────────────────────────────────────

// An L-shaped wall through the middle of the 40×40 grid with agents spread
// over all four quadrants.  Agent 0 starts the run.
const SCENE_CSV: &str = "\
kind,x,y\n\
obstacle,0.5,-12.5\n\
obstacle,0.5,-11.5\n\
obstacle,0.5,-10.5\n\
obstacle,0.5,-9.5\n\
obstacle,0.5,-8.5\n\
obstacle,0.5,-7.5\n\
obstacle,0.5,-6.5\n\
obstacle,0.5,-5.5\n\
obstacle,0.5,-4.5\n\
obstacle,0.5,-3.5\n\
obstacle,0.5,-2.5\n\
obstacle,0.5,-1.5\n\
obstacle,0.5,-0.5\n\
obstacle,1.5,-0.5\n\
obstacle,2.5,-0.5\n\
obstacle,3.5,-0.5\n\
obstacle,4.5,-0.5\n\
obstacle,5.5,-0.5\n\
obstacle,6.5,-0.5\n\
obstacle,7.5,-0.5\n\
agent,-15.5,-15.5\n\
agent,-13.0,-14.0\n\
agent,-4.5,-9.0\n\
agent,-3.0,-2.0\n\
agent,4.0,-6.0\n\
agent,6.5,-3.5\n\
agent,12.0,-14.5\n\
agent,16.5,-16.0\n\
agent,-16.0,5.5\n\
agent,-9.5,12.0\n\
agent,-2.5,17.5\n\
agent,3.5,3.5\n\
agent,4.5,4.0\n\
agent,9.0,11.0\n\
agent,15.0,6.5\n\
agent,17.5,17.5\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Totals across a run.
#[derive(Default)]
struct RunStats {
    searches:  usize,
    switches:  usize,
    woken:     usize,
    last_wake: Tick,
}

impl SimObserver for RunStats {
    fn on_activation(&mut self, tick: Tick, claimer: AgentId, woken: AgentId) {
        tracing::debug!(%tick, %claimer, %woken, "woke");
        self.woken += 1;
        self.last_wake = tick;
    }

    fn on_tick_end(&mut self, _tick: Tick, assign: &AssignReport, _woken: usize) {
        self.searches += assign.searches;
        self.switches += assign.switched;
    }
}

// ── Arguments ─────────────────────────────────────────────────────────────────

fn parse_strategies(arg: Option<&str>) -> Result<Vec<StrategyKind>> {
    match arg {
        None | Some("all") => Ok(StrategyKind::ALL.to_vec()),
        Some(name) => Ok(vec![name.parse()?]),
    }
}

fn load_scene(arg: Option<&str>) -> Result<Scene> {
    match arg {
        None => Scene::load_reader(SCENE_CSV.as_bytes()),
        Some(source) => match source.strip_prefix("random:") {
            Some(seed) => {
                let seed = seed.parse().with_context(|| format!("bad seed {seed:?}"))?;
                Scene::random(seed, GRID_SIZE, RANDOM_AGENTS, RANDOM_OBSTACLES)
            }
            None => Scene::load_csv(Path::new(source)),
        },
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 2 {
        bail!("usage: awaken [greedy-static|greedy-dynamic|clustering|all] [SCENE.csv|random:SEED]");
    }
    let strategies = parse_strategies(args.first().map(String::as_str))?;
    let scene = load_scene(args.get(1).map(String::as_str))?;

    println!("=== awaken — rust_awaken ===");
    println!(
        "Grid: {GRID_SIZE}×{GRID_SIZE}  |  Agents: {}  |  Obstacles: {}",
        scene.agents.len(),
        scene.obstacles.len()
    );
    println!();
    if scene.agents.is_empty() {
        bail!("scene has no agents");
    }

    println!(
        "{:<16} {:>8} {:>10} {:>9} {:>8} {:>10}",
        "Strategy", "Ticks", "Complete", "Searches", "Switches", "Time (ms)"
    );
    println!("{}", "-".repeat(66));

    for kind in strategies {
        let mut sim = scene.builder(SimConfig::new(GRID_SIZE, kind)).build()?;
        sim.start_run(AgentId(0))?;

        let mut stats = RunStats::default();
        let t0 = Instant::now();
        let report = sim.run_until_complete(MAX_TICKS, &mut stats)?;
        let elapsed = t0.elapsed();

        info!(
            strategy = %kind,
            ticks = report.tick.0,
            woken = stats.woken,
            last_wake = %stats.last_wake,
            "run finished"
        );
        println!(
            "{:<16} {:>8} {:>10} {:>9} {:>8} {:>10.1}",
            kind.as_str(),
            report.tick.0,
            if report.complete { "yes" } else { "no" },
            stats.searches,
            stats.switches,
            elapsed.as_secs_f64() * 1e3,
        );
        if !report.complete {
            let dormant = sim.agents().filter(|a| !a.active).count();
            println!("  {dormant} agent(s) still dormant after {MAX_TICKS} ticks (unreachable?)");
        }
    }

    Ok(())
}
