use crate::simulation::Grid;

/// Neighbor offsets, excluding the cell itself
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Count live neighbors of `(x, y)` in `source`.
///
/// The grid does not wrap: offsets that fall outside it count as dead, so a
/// corner has at most 3 neighbors and an edge cell at most 5.
pub fn count_live_neighbors(source: &Grid, x: i32, y: i32) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| source.get(x.wrapping_add(dx), y.wrapping_add(dy)))
        .count() as u8
}

/// B3/S23 transition for a single cell
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Compute the generation after `source` into a fresh grid
pub fn next_generation(source: &Grid) -> Grid {
    let mut next = Grid::new(source.width(), source.height());

    for x in 0..source.width() as i32 {
        for y in 0..source.height() as i32 {
            let live_neighbors = count_live_neighbors(source, x, y);
            next.set(x, y, next_state(source.get(x, y), live_neighbors));
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(width: u32, height: u32) -> Grid {
        let mut grid = Grid::new(width, height);
        grid.fill(true);
        grid
    }

    #[test]
    fn test_corner_has_three_neighbors() {
        let grid = full(5, 5);
        assert_eq!(count_live_neighbors(&grid, 0, 0), 3);
        assert_eq!(count_live_neighbors(&grid, 4, 0), 3);
        assert_eq!(count_live_neighbors(&grid, 0, 4), 3);
        assert_eq!(count_live_neighbors(&grid, 4, 4), 3);
    }

    #[test]
    fn test_edge_has_five_neighbors() {
        let grid = full(5, 5);
        assert_eq!(count_live_neighbors(&grid, 2, 0), 5);
        assert_eq!(count_live_neighbors(&grid, 0, 2), 5);
        assert_eq!(count_live_neighbors(&grid, 4, 2), 5);
        assert_eq!(count_live_neighbors(&grid, 2, 4), 5);
    }

    #[test]
    fn test_interior_has_eight_neighbors() {
        let grid = full(5, 5);
        assert_eq!(count_live_neighbors(&grid, 2, 2), 8);
    }

    #[test]
    fn test_cell_does_not_count_itself() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, true);
        assert_eq!(count_live_neighbors(&grid, 1, 1), 0);
        assert_eq!(count_live_neighbors(&grid, 0, 0), 1);
    }

    #[test]
    fn test_no_wraparound() {
        let mut grid = Grid::new(5, 5);
        grid.set(4, 4, true);
        assert_eq!(count_live_neighbors(&grid, 0, 0), 0);
        grid.set(0, 2, true);
        assert_eq!(count_live_neighbors(&grid, 4, 2), 0);
    }

    #[test]
    fn test_birth_rule() {
        assert!(next_state(false, 3));
        for n in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert!(!next_state(false, n), "dead cell with {} neighbors was born", n);
        }
    }

    #[test]
    fn test_survival_rule() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert!(!next_state(true, n), "live cell with {} neighbors survived", n);
        }
    }

    #[test]
    fn test_dead_cell_with_three_neighbors_is_born() {
        let mut grid = Grid::new(5, 5);
        grid.set(1, 1, true);
        grid.set(2, 1, true);
        grid.set(3, 1, true);
        let next = next_generation(&grid);
        assert!(next.get(2, 2));
        assert!(next.get(2, 0));
    }

    #[test]
    fn test_dead_cell_with_two_or_four_neighbors_stays_dead() {
        let mut grid = Grid::new(5, 5);
        grid.set(1, 1, true);
        grid.set(3, 1, true);
        assert!(!next_generation(&grid).get(2, 2));

        grid.set(1, 3, true);
        grid.set(3, 3, true);
        assert_eq!(count_live_neighbors(&grid, 2, 2), 4);
        assert!(!next_generation(&grid).get(2, 2));
    }

    #[test]
    fn test_live_cell_with_too_many_neighbors_dies() {
        let grid = full(3, 3);
        let next = next_generation(&grid);
        // Corners have 3 neighbors, edges 5, the center 8
        assert!(next.get(0, 0));
        assert!(!next.get(1, 0));
        assert!(!next.get(1, 1));
    }

    #[test]
    fn test_block_is_still_life() {
        let mut grid = Grid::new(4, 4);
        for (x, y) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            grid.set(x, y, true);
        }
        assert_eq!(next_generation(&grid), grid);
    }

    #[test]
    fn test_next_generation_does_not_mutate_source() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 1, true);
        grid.set(2, 2, true);
        grid.set(2, 3, true);
        let before = grid.clone();
        let _ = next_generation(&grid);
        assert_eq!(grid, before);
    }
}
