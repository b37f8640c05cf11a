//! Bresenham line-of-sight check and greedy shortcut path smoothing.

use crate::grid::OccupancyGrid;

/// `true` if every cell on the Bresenham line between the two cells (both
/// endpoints included) is free.
pub fn line_of_sight(grid: &OccupancyGrid, r1: usize, c1: usize, r2: usize, c2: usize) -> bool {
    let (mut r, mut c) = (r1 as isize, c1 as isize);
    let (r2, c2) = (r2 as isize, c2 as isize);
    let dr = (r2 - r1 as isize).abs();
    let dc = (c2 - c1 as isize).abs();
    let sr = if r2 > r1 as isize { 1 } else { -1 };
    let sc = if c2 > c1 as isize { 1 } else { -1 };
    let mut err = dr - dc;

    loop {
        if grid.is_occupied_cell(r as usize, c as usize) {
            return false;
        }
        if r == r2 && c == c2 {
            return true;
        }
        let e2 = 2 * err;
        if e2 > -dc {
            err -= dc;
            r += sr;
        }
        if e2 < dr {
            err += dr;
            c += sc;
        }
    }
}

/// Greedy shortcut smoothing: starting at index 0, retain the farthest
/// index reachable by line-of-sight, scanning from the tail backward;
/// repeat from that index. Never lengthens the path in Euclidean terms.
pub fn smooth_path(grid: &OccupancyGrid, path: &[(usize, usize)]) -> Vec<(usize, usize)> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut smoothed = vec![path[0]];
    let mut current = 0usize;

    while current < path.len() - 1 {
        let mut best = current + 1;
        for look_ahead in (current + 2..path.len()).rev() {
            let (cr, cc) = path[current];
            let (lr, lc) = path[look_ahead];
            if line_of_sight(grid, cr, cc, lr, lc) {
                best = look_ahead;
                break;
            }
        }
        smoothed.push(path[best]);
        current = best;
    }

    smoothed
}
