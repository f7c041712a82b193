use crate::entity::Position;
use crate::grid::{Cell, Grid};

/// Region capture: runs when the player closes a trail onto Land.
///
/// The trail itself always becomes Land. Every Sea cell still reachable from
/// an enemy through Sea (4-connected) stays Sea; everything the enemies are
/// cut off from is reclassified to Land. Returns the number of newly
/// captured cells, excluding the trail.
///
/// The fill uses an explicit stack: grids can be larger than the default
/// call stack tolerates for a recursive 4-connected fill.
pub(crate) fn capture_region(grid: &mut Grid, enemy_cells: &[Position]) -> usize {
    grid.trail_to_land();

    let cols = grid.cols();
    let rows = grid.rows();
    let idx = |x: i32, y: i32| (y * cols + x) as usize;

    // true = Sea not yet proven enemy-reachable
    let mut open = vec![false; (cols * rows) as usize];
    for y in 0..rows {
        for x in 0..cols {
            open[idx(x, y)] = grid.get(x, y) == Cell::Sea;
        }
    }

    let mut stack: Vec<(i32, i32)> = Vec::new();
    for seed in enemy_cells {
        stack.push((seed.x, seed.y));
        while let Some((x, y)) = stack.pop() {
            if x < 0 || y < 0 || x >= cols || y >= rows {
                continue;
            }
            if !open[idx(x, y)] {
                continue;
            }
            open[idx(x, y)] = false;
            stack.push((x + 1, y));
            stack.push((x - 1, y));
            stack.push((x, y + 1));
            stack.push((x, y - 1));
        }
    }

    let mut captured = 0;
    for y in 0..rows {
        for x in 0..cols {
            if grid.get(x, y) == Cell::Sea && open[idx(x, y)] {
                grid.set(x, y, Cell::Land);
                captured += 1;
            }
        }
    }
    captured
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Every Sea cell must be 4-connected to some enemy cell through Sea.
    fn sea_is_enemy_reachable(grid: &Grid, enemies: &[Position]) -> bool {
        let cols = grid.cols();
        let rows = grid.rows();
        let idx = |x: i32, y: i32| (y * cols + x) as usize;
        let mut reached = vec![false; (cols * rows) as usize];
        let mut stack: Vec<(i32, i32)> = enemies
            .iter()
            .filter(|p| grid.get(p.x, p.y) == Cell::Sea)
            .map(|p| (p.x, p.y))
            .collect();
        while let Some((x, y)) = stack.pop() {
            if !grid.in_bounds(x, y) || reached[idx(x, y)] || grid.get(x, y) != Cell::Sea {
                continue;
            }
            reached[idx(x, y)] = true;
            stack.push((x + 1, y));
            stack.push((x - 1, y));
            stack.push((x, y + 1));
            stack.push((x, y - 1));
        }

        for y in 0..rows {
            for x in 0..cols {
                if grid.get(x, y) == Cell::Sea && !reached[idx(x, y)] {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_no_trail_no_enclosure_is_noop() {
        let mut grid = Grid::new(10, 10, 2).unwrap();
        let before = grid.clone();
        let captured = capture_region(&mut grid, &[Position::new(5, 5)]);
        assert_eq!(captured, 0);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(grid.get(x, y), before.get(x, y));
            }
        }
    }

    #[test]
    fn test_trail_always_becomes_land() {
        let mut grid = Grid::new(10, 10, 2).unwrap();
        grid.set(3, 3, Cell::Trail);
        grid.set(4, 3, Cell::Trail);
        // Enemy right next to the trail: nothing is enclosed
        let captured = capture_region(&mut grid, &[Position::new(5, 5)]);
        assert_eq!(captured, 0);
        assert_eq!(grid.get(3, 3), Cell::Land);
        assert_eq!(grid.get(4, 3), Cell::Land);
    }

    #[test]
    fn test_enemy_side_stays_sea_far_side_captured() {
        // Vertical trail wall splits the interior of a 12x10 grid in two
        let mut grid = Grid::new(12, 10, 2).unwrap();
        for y in 2..8 {
            grid.set(6, y, Cell::Trail);
        }
        let enemy = Position::new(3, 5);
        let captured = capture_region(&mut grid, &[enemy]);

        // Right half (x in 7..10, y in 2..8) was cut off: 18 cells
        assert_eq!(captured, 18);
        assert_eq!(grid.get(8, 5), Cell::Land);
        // Enemy's half untouched
        assert_eq!(grid.get(3, 5), Cell::Sea);
        assert_eq!(grid.get(4, 4), Cell::Sea);
        // The wall itself is Land now
        assert_eq!(grid.get(6, 5), Cell::Land);
        assert!(sea_is_enemy_reachable(&grid, &[enemy]));
    }

    #[test]
    fn test_no_enemies_captures_all_sea() {
        let mut grid = Grid::new(8, 8, 2).unwrap();
        let captured = capture_region(&mut grid, &[]);
        assert_eq!(captured, 16);
        assert_eq!(grid.percent_land(), 100);
    }

    #[test]
    fn test_land_enemy_seed_is_inert() {
        // A seed sitting on Land marks nothing
        let mut grid = Grid::new(10, 10, 2).unwrap();
        for y in 2..8 {
            grid.set(5, y, Cell::Trail);
        }
        let sea_enemy = Position::new(3, 5);
        let land_seed = Position::new(0, 0);
        capture_region(&mut grid, &[sea_enemy, land_seed]);
        // Far side captured despite the border seed
        assert_eq!(grid.get(6, 5), Cell::Land);
        assert_eq!(grid.get(3, 5), Cell::Sea);
    }

    proptest! {
        /// Enclosure invariant: after capture, all remaining Sea is
        /// 4-connected-reachable from some enemy through Sea-only cells.
        #[test]
        fn prop_remaining_sea_is_enemy_reachable(
            walls in prop::collection::hash_set((2i32..14, 2i32..14), 0..60),
            enemy_seeds in prop::collection::vec((2i32..14, 2i32..14), 1..4),
        ) {
            let mut grid = Grid::new(16, 16, 2).unwrap();
            let enemies: Vec<Position> = enemy_seeds
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect();
            for &(x, y) in &walls {
                // Keep enemy cells Sea so each enemy has a live region
                if !enemies.iter().any(|p| p.x == x && p.y == y) {
                    grid.set(x, y, Cell::Land);
                }
            }

            capture_region(&mut grid, &enemies);

            prop_assert!(sea_is_enemy_reachable(&grid, &enemies));
        }

        /// Idempotence: a second capture with the same enemies changes
        /// nothing further.
        #[test]
        fn prop_capture_is_idempotent(
            walls in prop::collection::hash_set((2i32..14, 2i32..14), 0..60),
            enemy_seeds in prop::collection::vec((2i32..14, 2i32..14), 1..4),
        ) {
            let mut grid = Grid::new(16, 16, 2).unwrap();
            let enemies: Vec<Position> = enemy_seeds
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect();
            for &(x, y) in &walls {
                if !enemies.iter().any(|p| p.x == x && p.y == y) {
                    grid.set(x, y, Cell::Land);
                }
            }

            capture_region(&mut grid, &enemies);
            let after_first = grid.clone();
            let captured_again = capture_region(&mut grid, &enemies);

            prop_assert_eq!(captured_again, 0);
            for y in 0..16 {
                for x in 0..16 {
                    prop_assert_eq!(grid.get(x, y), after_first.get(x, y));
                }
            }
        }
    }
}
