//! Run configuration and assignment-policy selection.

use std::fmt;
use std::str::FromStr;

use crate::{AwError, AwResult};

// ── StrategyKind ──────────────────────────────────────────────────────────────

/// Which assignment policy drives target selection.
///
/// Chosen by the external driver; the core only ever sees this value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StrategyKind {
    /// Nearest-by-path target, committed once and never reconsidered.
    #[default]
    GreedyStatic,
    /// Nearest-by-path target, re-evaluated every tick.
    GreedyDynamic,
    /// Work through precomputed spatial clusters of dormant agents.
    Clustering,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::GreedyStatic,
        StrategyKind::GreedyDynamic,
        StrategyKind::Clustering,
    ];

    /// Stable label, used for CLI arguments and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::GreedyStatic  => "greedy-static",
            StrategyKind::GreedyDynamic => "greedy-dynamic",
            StrategyKind::Clustering    => "clustering",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = AwError;

    /// Accepts the kebab-case labels and the camelCase names used by UI
    /// selectors (`greedyStatic`, `greedyDynamic`, `clustering`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "greedy-static" | "greedyStatic"   => Ok(StrategyKind::GreedyStatic),
            "greedy-dynamic" | "greedyDynamic" => Ok(StrategyKind::GreedyDynamic),
            "clustering"                       => Ok(StrategyKind::Clustering),
            other => Err(AwError::Config(format!(
                "unknown strategy {other:?}: expected greedy-static, greedy-dynamic, or clustering"
            ))),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built by the driver (or deserialized with the `serde` feature)
/// and handed to `aw_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Side length of the square occupancy grid, in cells.  Default: 40.
    pub grid_size: u32,

    /// Active assignment policy.
    pub strategy: StrategyKind,

    /// Fraction of the remaining distance to the current waypoint covered
    /// each tick.  Must lie in `(0, 1]`.  Default: 0.4.
    pub approach_factor: f32,

    /// An agent closer than this to its waypoint moves on to the next one.
    /// Default: 0.1 world units.
    pub arrival_epsilon: f32,

    /// Clustering strategy only: agents closer than this to a cluster seed
    /// join its cluster.  Default: 10 world units.
    pub cluster_threshold: f32,
}

impl SimConfig {
    pub const DEFAULT_GRID_SIZE: u32 = 40;

    /// Largest side length whose `size²` cell count fits in an `i32`.
    pub const MAX_GRID_SIZE: u32 = 46_340;

    /// Default configuration with the given grid size and policy.
    pub fn new(grid_size: u32, strategy: StrategyKind) -> Self {
        Self { grid_size, strategy, ..Self::default() }
    }

    /// Check every field is usable.
    pub fn validate(&self) -> AwResult<()> {
        if self.grid_size == 0 {
            return Err(AwError::Config("grid_size must be at least 1".into()));
        }
        if self.grid_size > Self::MAX_GRID_SIZE {
            return Err(AwError::Config(format!(
                "grid_size {} exceeds the maximum of {}",
                self.grid_size,
                Self::MAX_GRID_SIZE
            )));
        }
        if !(self.approach_factor > 0.0 && self.approach_factor <= 1.0) {
            return Err(AwError::Config(format!(
                "approach_factor {} must lie in (0, 1]",
                self.approach_factor
            )));
        }
        if !(self.arrival_epsilon > 0.0) {
            return Err(AwError::Config(format!(
                "arrival_epsilon {} must be positive",
                self.arrival_epsilon
            )));
        }
        if !(self.cluster_threshold > 0.0) {
            return Err(AwError::Config(format!(
                "cluster_threshold {} must be positive",
                self.cluster_threshold
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size:         Self::DEFAULT_GRID_SIZE,
            strategy:          StrategyKind::default(),
            approach_factor:   0.4,
            arrival_epsilon:   0.1,
            cluster_threshold: 10.0,
        }
    }
}
