/// Pursuit pathfinding: breadth-first search over 4-connected cells.
///
/// Recomputed from scratch on every warden advance: the grid mutates
/// between ticks and a W×H search is cheap at these sizes, so nothing is
/// cached across calls.

use std::collections::VecDeque;

use crate::domain::geom::Position;
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;

/// Fixed expansion order. Keeps tie-breaking, and therefore every computed
/// path, deterministic for a given grid.
const DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Shortest 4-connected path from `start` to `goal`.
///
/// Returns the cells from the first step after `start` up to and including
/// `goal`; `Some(vec![])` when start and goal coincide; `None` when no
/// route exists. Only Wall blocks traversal; playable space is ringed by
/// walls, so the void beyond them is never reached in practice.
pub fn shortest_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    if !grid.in_bounds(start.x, start.y) || !grid.in_bounds(goal.x, goal.y) {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    let w = grid.width() as usize;
    let h = grid.height() as usize;
    let idx = |p: Position| (p.x as usize) * h + (p.y as usize);

    let mut visited = vec![false; w * h];
    let mut prev: Vec<Option<Position>> = vec![None; w * h];
    let mut queue = VecDeque::with_capacity(256);

    visited[idx(start)] = true;
    queue.push_back(start);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        if current == goal {
            found = true;
            break;
        }

        for &(dx, dy) in &DIRS {
            let next = current.offset(dx, dy);
            if !grid.in_bounds(next.x, next.y) {
                continue;
            }
            if visited[idx(next)] {
                continue;
            }
            if grid.get_pos(next) == Tile::Wall {
                continue;
            }
            visited[idx(next)] = true;
            prev[idx(next)] = Some(current);
            queue.push_back(next);
        }
    }

    if !found {
        return None;
    }

    // Walk parents goal → start, then flip to walking order.
    let mut path = Vec::new();
    let mut step = goal;
    while step != start {
        path.push(step);
        match prev[idx(step)] {
            Some(p) => step = p,
            None => break,
        }
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a grid from a row diagram. Row 0 is y=0.
    /// Legend: '#'=Wall  '.'=Floor  ' '=Void
    fn grid_from(rows: &[&str]) -> Grid {
        let mut g = Grid::new(rows[0].len() as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let t = match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Floor,
                    _ => Tile::Void,
                };
                g.set(x as i32, y as i32, t);
            }
        }
        g
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    // ── Reachability ──

    #[test]
    fn straight_corridor() {
        let g = grid_from(&[
            "#####",
            "#...#",
            "#####",
        ]);
        let path = shortest_path(&g, p(1, 1), p(3, 1)).unwrap();
        assert_eq!(path, vec![p(2, 1), p(3, 1)]);
    }

    #[test]
    fn path_length_matches_true_shortest_distance() {
        // U-shaped detour: straight-line distance 2, walking distance 6.
        let g = grid_from(&[
            "#####",
            "#.#.#",
            "#.#.#",
            "#...#",
            "#####",
        ]);
        let path = shortest_path(&g, p(1, 1), p(3, 1)).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(*path.last().unwrap(), p(3, 1));
    }

    #[test]
    fn no_path_across_wall() {
        let g = grid_from(&[
            "#####",
            "#.#.#",
            "#####",
        ]);
        assert!(shortest_path(&g, p(1, 1), p(3, 1)).is_none());
    }

    #[test]
    fn start_equals_goal_yields_empty_path() {
        let g = grid_from(&["..."]);
        assert_eq!(shortest_path(&g, p(1, 0), p(1, 0)), Some(vec![]));
    }

    #[test]
    fn out_of_bounds_endpoints_have_no_path() {
        let g = grid_from(&["..."]);
        assert!(shortest_path(&g, p(-1, 0), p(1, 0)).is_none());
        assert!(shortest_path(&g, p(0, 0), p(5, 0)).is_none());
    }

    // ── Determinism and adjacency ──

    #[test]
    fn adjacent_goal_is_a_single_step() {
        let g = grid_from(&["...."]);
        let path = shortest_path(&g, p(1, 0), p(2, 0)).unwrap();
        assert_eq!(path, vec![p(2, 0)]);
    }

    #[test]
    fn open_field_path_is_deterministic() {
        let g = grid_from(&[
            ".....",
            ".....",
            ".....",
            ".....",
        ]);
        let a = shortest_path(&g, p(0, 0), p(3, 2)).unwrap();
        let b = shortest_path(&g, p(0, 0), p(3, 2)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5); // manhattan distance, BFS is optimal
    }

    #[test]
    fn void_does_not_block_traversal() {
        // Only Wall blocks; a void gap is crossable in principle.
        let g = grid_from(&[". ."]);
        let path = shortest_path(&g, p(0, 0), p(2, 0)).unwrap();
        assert_eq!(path.len(), 2);
    }
}
