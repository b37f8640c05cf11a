//! A* search over an `OccupancyGrid`: octile heuristic, 8-connected,
//! diagonal corner-cutting forbidden, nearest-free-cell BFS fallback for
//! occupied endpoints.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::grid::OccupancyGrid;

const SQRT2: f32 = std::f32::consts::SQRT_2;
const DIRECTIONS: [(isize, isize); 8] =
    [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Octile distance: admissible and consistent for unit/root-2 step costs.
fn octile(r1: usize, c1: usize, r2: usize, c2: usize) -> f32 {
    let dr = (r1 as f32 - r2 as f32).abs();
    let dc = (c1 as f32 - c2 as f32).abs();
    dr.max(dc) + (SQRT2 - 1.0) * dr.min(dc)
}

/// BFS outward from `(row, col)` for the nearest unoccupied cell, bounded
/// to `max_radius` hops. `None` if none is found within range.
pub fn nearest_free(grid: &OccupancyGrid, row: usize, col: usize, max_radius: u32) -> Option<(usize, usize)> {
    let mut visited = vec![false; grid.rows * grid.cols];
    visited[row * grid.cols + col] = true;
    let mut queue = VecDeque::new();
    queue.push_back((row, col, 0u32));

    while let Some((r, c, dist)) = queue.pop_front() {
        if dist > max_radius {
            return None;
        }
        if !grid.is_occupied_cell(r, c) {
            return Some((r, c));
        }
        for (dr, dc) in DIRECTIONS {
            let nr = r as isize + dr;
            let nc = c as isize + dc;
            if grid.in_bounds(nr, nc) {
                let (nr, nc) = (nr as usize, nc as usize);
                let idx = nr * grid.cols + nc;
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back((nr, nc, dist + 1));
                }
            }
        }
    }
    None
}

/// Priority queue entry: ties broken by insertion order, oldest first, so
/// search order is deterministic for identical inputs.
struct OpenEntry {
    f_cost: f32,
    counter: u64,
    row: usize,
    col: usize,
    g_cost: f32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.counter == other.counter
    }
}
impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the smallest f_cost first;
        // on a tie, the earliest-inserted entry wins.
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}
impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run A* from `start` to `goal` (grid cells). Substitutes the nearest free
/// cell (within 20 cells) for an occupied endpoint; returns `None` if no
/// such substitute exists or no path connects the two.
pub fn find_path_cells(
    grid: &OccupancyGrid,
    start: (usize, usize),
    goal: (usize, usize),
) -> Option<Vec<(usize, usize)>> {
    let start = if grid.is_occupied_cell(start.0, start.1) {
        nearest_free(grid, start.0, start.1, 20)?
    } else {
        start
    };
    let goal = if grid.is_occupied_cell(goal.0, goal.1) {
        nearest_free(grid, goal.0, goal.1, 20)?
    } else {
        goal
    };

    let n = grid.rows * grid.cols;
    let mut g_cost = vec![f32::INFINITY; n];
    let mut came_from = vec![None::<(usize, usize)>; n];
    let idx = |r: usize, c: usize| r * grid.cols + c;

    g_cost[idx(start.0, start.1)] = 0.0;
    let mut open = BinaryHeap::new();
    let mut counter = 0u64;
    open.push(OpenEntry { f_cost: 0.0, counter, row: start.0, col: start.1, g_cost: 0.0 });

    while let Some(OpenEntry { row, col, g_cost: popped_g, .. }) = open.pop() {
        if popped_g > g_cost[idx(row, col)] {
            continue;
        }
        if (row, col) == goal {
            let mut path = vec![(row, col)];
            let mut cur = (row, col);
            while let Some(prev) = came_from[idx(cur.0, cur.1)] {
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            return Some(path);
        }

        let current_g = g_cost[idx(row, col)];

        for (dr, dc) in DIRECTIONS {
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if !grid.in_bounds(nr, nc) {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if grid.is_occupied_cell(nr, nc) {
                continue;
            }

            let diagonal = dr != 0 && dc != 0;
            if diagonal {
                let corner_a = (row as isize + dr, col as isize);
                let corner_b = (row as isize, col as isize + dc);
                if grid.in_bounds(corner_a.0, corner_a.1)
                    && grid.in_bounds(corner_b.0, corner_b.1)
                    && grid.is_occupied_cell(corner_a.0 as usize, corner_a.1 as usize)
                    && grid.is_occupied_cell(corner_b.0 as usize, corner_b.1 as usize)
                {
                    continue;
                }
            }

            let move_cost = if diagonal { SQRT2 } else { 1.0 };
            let new_g = current_g + move_cost;
            if new_g < g_cost[idx(nr, nc)] {
                g_cost[idx(nr, nc)] = new_g;
                came_from[idx(nr, nc)] = Some((row, col));
                counter += 1;
                let f = new_g + octile(nr, nc, goal.0, goal.1);
                open.push(OpenEntry { f_cost: f, counter, row: nr, col: nc, g_cost: new_g });
            }
        }
    }

    None
}
