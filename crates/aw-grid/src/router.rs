//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! The assignment strategies call routing via the [`PathFinder`] trait, so a
//! driver can swap in a different search (or a counting wrapper in tests)
//! without touching the strategies.  The default [`AStarPathFinder`] runs an
//! 8-connected A* over the [`OccupancyGrid`].
//!
//! # Path length
//!
//! Two lengths are reported.  [`GridPath::len`] is the number of cells
//! including both endpoints; the assignment strategies compare paths by this
//! value.  [`GridPath::cost`] is the summed move cost (1 per orthogonal step,
//! √2 per diagonal step) that the search minimises.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f32::consts::SQRT_2;

use aw_core::{GridCell, WorldPos};

use crate::OccupancyGrid;

// ── GridPath ──────────────────────────────────────────────────────────────────

/// The result of a successful search: cells from start to goal, inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPath {
    /// Cells to visit in order.  Never empty; `cells[0]` is the start and
    /// the last element is the goal.
    pub cells: Vec<GridCell>,
    /// Summed move cost along `cells`.
    pub cost: f32,
}

impl GridPath {
    /// Number of cells, endpoints included.  A path from a cell to itself
    /// has length 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a path produced by a search.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` if start and goal are the same cell.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }

    /// Cell-centre waypoints in world space.
    pub fn to_world(&self, grid: &OccupancyGrid) -> Vec<WorldPos> {
        self.cells.iter().map(|&c| grid.to_world(c)).collect()
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable grid search.
pub trait PathFinder {
    /// Find a path from `start` to `goal` over `grid`.
    ///
    /// Returns `None` when the goal is unreachable.  An unreachable goal is a
    /// normal outcome, not an error; callers skip the candidate.
    fn find_path(
        &self,
        grid:  &OccupancyGrid,
        start: GridCell,
        goal:  GridCell,
    ) -> Option<GridPath>;
}

impl<P: PathFinder + ?Sized> PathFinder for &P {
    fn find_path(&self, grid: &OccupancyGrid, start: GridCell, goal: GridCell) -> Option<GridPath> {
        (**self).find_path(grid, start, goal)
    }
}

// ── AStarPathFinder ───────────────────────────────────────────────────────────

/// 8-connected A* with a Euclidean heuristic.
///
/// The heuristic is admissible and consistent for these move costs, so the
/// first time the goal leaves the frontier its path is cost-optimal.
///
/// # Frontier ordering
///
/// The frontier is a binary min-heap keyed on `(f, sequence)`.  Each cell gets
/// a sequence number the first time it enters the frontier and keeps it when
/// its entry is later improved, so among equal `f` values the cell that was
/// opened first is expanded first.
///
/// # Blocked and out-of-bounds cells
///
/// Neither is ever entered.  The start cell itself is not checked, so a
/// search may begin on a blocked or off-grid cell (an agent standing there)
/// and step into the grid from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathFinder;

impl PathFinder for AStarPathFinder {
    fn find_path(&self, grid: &OccupancyGrid, start: GridCell, goal: GridCell) -> Option<GridPath> {
        self.search(grid, start, goal).path
    }
}

/// Counters reported by [`AStarPathFinder::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells popped from the frontier and expanded (size of the closed set).
    pub expanded: usize,
    /// Distinct cells ever placed on the frontier.
    pub opened: usize,
}

/// Path plus search counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub path:  Option<GridPath>,
    pub stats: SearchStats,
}

/// Neighbour offsets in expansion order: orthogonal first, then diagonal.
const NEIGHBOURS: [(i32, i32); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (-1, -1), (1, -1), (-1, 1),
];

/// Marks "no parent" / "never opened".
const NONE: u32 = u32::MAX;

/// Frontier entry.  Ordered so that `BinaryHeap` (a max-heap) pops the
/// lowest `f`, then the lowest sequence number.
#[derive(Copy, Clone, Debug)]
struct OpenEntry {
    f:    f32,
    seq:  u32,
    node: u32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl AStarPathFinder {
    /// Run the search and report expansion counters alongside the path.
    pub fn search(&self, grid: &OccupancyGrid, start: GridCell, goal: GridCell) -> SearchOutcome {
        let mut stats = SearchStats::default();

        // Node ids are flat cell indices.  An off-grid start gets the extra
        // slot at `cell_count` so it can carry a parent link like any other.
        let n = grid.cell_count();
        let start_node = grid.index_of(start).unwrap_or(n);
        let node_cell = |node: usize| if node == n { start } else { grid.cell_at(node) };

        let mut g      = vec![f32::INFINITY; n + 1];
        let mut parent = vec![NONE; n + 1];
        let mut seq    = vec![NONE; n + 1];
        let mut closed = vec![false; n + 1];
        let mut next_seq: u32 = 0;

        let mut open = BinaryHeap::new();
        g[start_node] = 0.0;
        seq[start_node] = next_seq;
        next_seq += 1;
        stats.opened += 1;
        open.push(OpenEntry { f: start.euclidean(goal), seq: 0, node: start_node as u32 });

        while let Some(entry) = open.pop() {
            let node = entry.node as usize;
            // An improved cell leaves its older, worse entry behind.
            if closed[node] {
                continue;
            }
            closed[node] = true;
            stats.expanded += 1;

            let cell = node_cell(node);
            if cell == goal {
                let path = reconstruct(&parent, node, g[node], node_cell);
                return SearchOutcome { path: Some(path), stats };
            }

            for (dx, dy) in NEIGHBOURS {
                let next = cell.offset(dx, dy);
                let Some(ni) = grid.index_of(next) else { continue };
                if grid.is_blocked_index(ni) || closed[ni] {
                    continue;
                }

                let step = if dx != 0 && dy != 0 { SQRT_2 } else { 1.0 };
                let tentative = g[node] + step;

                if seq[ni] == NONE {
                    seq[ni] = next_seq;
                    next_seq += 1;
                    stats.opened += 1;
                } else if tentative >= g[ni] {
                    continue;
                }

                g[ni] = tentative;
                parent[ni] = node as u32;
                open.push(OpenEntry {
                    f:    tentative + next.euclidean(goal),
                    seq:  seq[ni],
                    node: ni as u32,
                });
            }
        }

        SearchOutcome { path: None, stats }
    }
}

fn reconstruct(
    parent:    &[u32],
    goal_node: usize,
    cost:      f32,
    node_cell: impl Fn(usize) -> GridCell,
) -> GridPath {
    let mut cells = Vec::new();
    let mut cur = goal_node as u32;
    while cur != NONE {
        cells.push(node_cell(cur as usize));
        cur = parent[cur as usize];
    }
    cells.reverse();
    GridPath { cells, cost }
}
