//! Unit tests for aw-grid.
//!
//! All tests build small hand-crafted grids so expected paths can be worked
//! out on paper.

#[cfg(test)]
mod helpers {
    use aw_core::GridCell;
    use crate::OccupancyGrid;

    /// Block every cell in the inclusive rectangle `[x0, x1] × [y0, y1]`.
    pub fn block_rect(grid: &mut OccupancyGrid, x0: i32, y0: i32, x1: i32, y1: i32) {
        for x in x0..=x1 {
            for y in y0..=y1 {
                grid.mark_blocked(GridCell::new(x, y)).unwrap();
            }
        }
    }

    /// Block the one-cell ring surrounding `centre`.
    pub fn enclose(grid: &mut OccupancyGrid, centre: GridCell) {
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx != 0 || dy != 0 {
                    let _ = grid.mark_blocked(centre.offset(dx, dy));
                }
            }
        }
    }
}

// ── Grid & coordinates ────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use aw_core::{AwError, GridCell, WorldPos};
    use crate::OccupancyGrid;

    #[test]
    fn new_grid_is_free() {
        let grid = OccupancyGrid::new(8);
        assert_eq!(grid.size(), 8);
        assert_eq!(grid.cell_count(), 64);
        assert_eq!(grid.blocked_count(), 0);
        assert!(!grid.is_blocked(GridCell::new(3, 3)));
    }

    #[test]
    fn mark_and_query() {
        let mut grid = OccupancyGrid::new(4);
        grid.mark_blocked(GridCell::new(1, 2)).unwrap();
        assert!(grid.is_blocked(GridCell::new(1, 2)));
        assert!(!grid.is_blocked(GridCell::new(2, 1)));
        assert_eq!(grid.blocked_count(), 1);
        // Marking twice is harmless.
        grid.mark_blocked(GridCell::new(1, 2)).unwrap();
        assert_eq!(grid.blocked_count(), 1);
    }

    #[test]
    fn out_of_bounds_is_blocked_and_unmarkable() {
        let mut grid = OccupancyGrid::new(4);
        let outside = GridCell::new(4, 0);
        assert!(!grid.in_bounds(outside));
        assert!(grid.is_blocked(outside));
        assert!(grid.is_blocked(GridCell::new(-1, 2)));
        let err = grid.mark_blocked(outside).unwrap_err();
        assert!(matches!(err, AwError::OutOfBounds(c) if c == outside));
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn clear_frees_everything() {
        let mut grid = OccupancyGrid::new(4);
        super::helpers::block_rect(&mut grid, 0, 0, 3, 3);
        assert_eq!(grid.blocked_count(), 16);
        grid.clear();
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn index_roundtrip() {
        let grid = OccupancyGrid::new(5);
        for i in 0..grid.cell_count() {
            assert_eq!(grid.index_of(grid.cell_at(i)), Some(i));
        }
        assert_eq!(grid.index_of(GridCell::new(5, 0)), None);
    }

    #[test]
    fn world_grid_conversion() {
        let grid = OccupancyGrid::new(40);
        // World origin sits on the corner between cells 19 and 20.
        assert_eq!(grid.to_grid(WorldPos::new(0.0, 0.0)), GridCell::new(20, 20));
        assert_eq!(grid.to_grid(WorldPos::new(-0.01, 0.49)), GridCell::new(19, 20));
        assert_eq!(grid.to_world(GridCell::new(0, 39)), WorldPos::new(-19.5, 19.5));
        // Beyond the edge converts to an out-of-bounds cell.
        assert_eq!(grid.to_grid(WorldPos::new(-25.0, 0.0)).x, -5);
    }

    #[test]
    fn conversion_inverse_on_cell_centres() {
        for size in [1, 2, 7, 40] {
            let grid = OccupancyGrid::new(size);
            for i in 0..grid.cell_count() {
                let cell = grid.cell_at(i);
                assert_eq!(grid.to_grid(grid.to_world(cell)), cell, "size {size} cell {cell}");
            }
        }
    }

    #[test]
    fn half_rounds_up() {
        let grid = OccupancyGrid::new(2);
        // c + size/2 - 0.5 = 0.5 exactly → rounds up to cell 1.
        assert_eq!(grid.to_grid(WorldPos::new(0.0, 0.0)), GridCell::new(1, 1));
        // -0.5 rounds up to 0, not away from zero to -1.
        assert_eq!(grid.to_grid(WorldPos::new(-1.0, -1.0)), GridCell::new(0, 0));
    }
}

// ── A* routing ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use std::f32::consts::SQRT_2;

    use aw_core::GridCell;
    use crate::{AStarPathFinder, OccupancyGrid, PathFinder};

    fn c(x: i32, y: i32) -> GridCell {
        GridCell::new(x, y)
    }

    #[test]
    fn trivial_same_cell() {
        let grid = OccupancyGrid::new(5);
        let path = AStarPathFinder.find_path(&grid, c(2, 2), c(2, 2)).unwrap();
        assert!(path.is_trivial());
        assert_eq!(path.len(), 1);
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn straight_line() {
        let grid = OccupancyGrid::new(5);
        let path = AStarPathFinder.find_path(&grid, c(0, 0), c(2, 0)).unwrap();
        assert_eq!(path.cells, vec![c(0, 0), c(1, 0), c(2, 0)]);
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn diagonal_preferred() {
        let grid = OccupancyGrid::new(5);
        let path = AStarPathFinder.find_path(&grid, c(0, 0), c(3, 3)).unwrap();
        assert_eq!(path.len(), 4);
        assert!((path.cost - 3.0 * SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn wall_forces_detour() {
        let mut grid = OccupancyGrid::new(10);
        let open = AStarPathFinder.find_path(&grid, c(2, 5), c(6, 5)).unwrap();
        assert_eq!(open.len(), 5);

        // Vertical wall x = 4, y ∈ [3, 7]: must pass at y = 2 or y = 8.
        super::helpers::block_rect(&mut grid, 4, 3, 4, 7);
        let detour = AStarPathFinder.find_path(&grid, c(2, 5), c(6, 5)).unwrap();
        assert_eq!(detour.len(), open.len() + 2);
        assert!(detour.cells.iter().all(|&cell| !grid.is_blocked(cell)));
        assert!(detour.cost > open.cost);
    }

    #[test]
    fn single_obstacle_routes_diagonally() {
        let mut grid = OccupancyGrid::new(5);
        grid.mark_blocked(c(1, 1)).unwrap();
        let path = AStarPathFinder.find_path(&grid, c(0, 1), c(2, 1)).unwrap();
        // Same cell count as the straight route, but via a diagonal pair.
        assert_eq!(path.len(), 3);
        assert!((path.cost - 2.0 * SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn equal_f_first_opened_wins() {
        let mut grid = OccupancyGrid::new(5);
        grid.mark_blocked(c(1, 1)).unwrap();
        // (1, 2) and (1, 0) are symmetric detours; (1, 2) is opened first.
        let path = AStarPathFinder.find_path(&grid, c(0, 1), c(2, 1)).unwrap();
        assert_eq!(path.cells, vec![c(0, 1), c(1, 2), c(2, 1)]);
    }

    #[test]
    fn enclosed_goal_unreachable() {
        let mut grid = OccupancyGrid::new(9);
        super::helpers::enclose(&mut grid, c(4, 4));
        assert!(AStarPathFinder.find_path(&grid, c(0, 0), c(4, 4)).is_none());
        // And the other way round: nothing gets out.
        assert!(AStarPathFinder.find_path(&grid, c(4, 4), c(0, 0)).is_none());
    }

    #[test]
    fn blocked_goal_unreachable() {
        let mut grid = OccupancyGrid::new(5);
        grid.mark_blocked(c(3, 3)).unwrap();
        assert!(AStarPathFinder.find_path(&grid, c(0, 0), c(3, 3)).is_none());
    }

    #[test]
    fn out_of_bounds_goal_unreachable() {
        let grid = OccupancyGrid::new(5);
        assert!(AStarPathFinder.find_path(&grid, c(0, 0), c(5, 5)).is_none());
    }

    #[test]
    fn off_grid_start_steps_in() {
        let grid = OccupancyGrid::new(5);
        let path = AStarPathFinder.find_path(&grid, c(-1, 0), c(2, 0)).unwrap();
        assert_eq!(path.cells.first(), Some(&c(-1, 0)));
        assert_eq!(path.cells.last(), Some(&c(2, 0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn blocked_start_can_leave() {
        let mut grid = OccupancyGrid::new(5);
        grid.mark_blocked(c(0, 0)).unwrap();
        assert!(AStarPathFinder.find_path(&grid, c(0, 0), c(1, 0)).is_some());
    }

    #[test]
    fn unreachable_search_closes_whole_component() {
        let mut grid = OccupancyGrid::new(6);
        // Column x = 3 fully blocked splits the grid into 3×6 and 2×6 halves.
        super::helpers::block_rect(&mut grid, 3, 0, 3, 5);
        let outcome = AStarPathFinder.search(&grid, c(0, 0), c(5, 5));
        assert!(outcome.path.is_none());
        assert_eq!(outcome.stats.expanded, 18);
        assert_eq!(outcome.stats.opened, 18);
    }

    #[test]
    fn to_world_waypoints() {
        let grid = OccupancyGrid::new(4);
        let path = AStarPathFinder.find_path(&grid, c(0, 0), c(1, 0)).unwrap();
        let pts = path.to_world(&grid);
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0], grid.to_world(c(0, 0)));
        assert_eq!(pts[1], grid.to_world(c(1, 0)));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use aw_core::GridCell;
    use proptest::prelude::*;

    use crate::{AStarPathFinder, GridPath, OccupancyGrid};

    const SIZE: i32 = 12;

    fn cell() -> impl Strategy<Value = GridCell> {
        (0..SIZE, 0..SIZE).prop_map(|(x, y)| GridCell::new(x, y))
    }

    fn check_well_formed(grid: &OccupancyGrid, path: &GridPath, start: GridCell, goal: GridCell) {
        assert_eq!(path.cells.first(), Some(&start));
        assert_eq!(path.cells.last(), Some(&goal));
        for pair in path.cells.windows(2) {
            assert_eq!(pair[0].chebyshev(pair[1]), 1, "non-adjacent step {pair:?}");
        }
        for &cell in &path.cells[1..] {
            assert!(!grid.is_blocked(cell), "path enters blocked cell {cell}");
        }
    }

    proptest! {
        #[test]
        fn empty_grid_paths_are_optimal(start in cell(), goal in cell()) {
            let grid = OccupancyGrid::new(SIZE as u32);
            let outcome = AStarPathFinder.search(&grid, start, goal);
            let path = outcome.path.expect("empty grid is fully connected");
            check_well_formed(&grid, &path, start, goal);
            prop_assert_eq!(path.len() as u32, start.chebyshev(goal) + 1);
            prop_assert!((path.cost - start.octile(goal)).abs() < 1e-3);
        }

        #[test]
        fn enclosed_goal_never_found(start in cell(), gx in 2..SIZE - 2, gy in 2..SIZE - 2) {
            let goal = GridCell::new(gx, gy);
            prop_assume!(start.chebyshev(goal) > 1);
            let mut grid = OccupancyGrid::new(SIZE as u32);
            crate::tests::helpers::enclose(&mut grid, goal);
            prop_assume!(!grid.is_blocked(start));
            prop_assert!(AStarPathFinder.search(&grid, start, goal).path.is_none());
        }

        #[test]
        fn random_obstacles_never_expand_twice(
            start in cell(),
            goal in cell(),
            blocks in proptest::collection::vec(cell(), 0..60),
        ) {
            let mut grid = OccupancyGrid::new(SIZE as u32);
            for b in blocks {
                grid.mark_blocked(b).unwrap();
            }
            let outcome = AStarPathFinder.search(&grid, start, goal);
            prop_assert!(outcome.stats.expanded <= grid.cell_count());
            prop_assert!(outcome.stats.expanded <= outcome.stats.opened);
            if let Some(path) = outcome.path {
                check_well_formed(&grid, &path, start, goal);
                prop_assert!(path.cost + 1e-3 >= start.octile(goal));
            }
        }
    }
}
