//! `PathPlanner` trait and the default grid A* implementation.
//!
//! # Pluggability
//!
//! The autopilot calls path planning through this trait so the factory's
//! grid-search planner can be swapped for a different strategy (a
//! precomputed road-graph, a different inflation model) without touching
//! `bci-autopilot`.

use crate::astar::find_path_cells;
use crate::grid::{MapBounds, Obstacle, OccupancyGrid};
use crate::smoothing::smooth_path;

/// Pluggable path planning.
pub trait PathPlanner: Send + Sync {
    /// Compute a collision-free path from `start` to `goal`, both in world
    /// coordinates. Returns an empty vector if no path can be found; the
    /// caller falls back to a direct single-waypoint plan at `goal`.
    fn find_path(&self, start: (f32, f32), goal: (f32, f32)) -> Vec<(f32, f32)>;
}

/// A* on a static inflated occupancy grid with greedy line-of-sight
/// smoothing. Constructed once and shared read-only.
pub struct GridAStarPlanner {
    grid: OccupancyGrid,
}

impl GridAStarPlanner {
    pub fn new(resolution: f32, robot_radius: f32, bounds: MapBounds, obstacles: &[Obstacle]) -> Self {
        Self { grid: OccupancyGrid::build(bounds, resolution, robot_radius, obstacles) }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }
}

impl PathPlanner for GridAStarPlanner {
    fn find_path(&self, start: (f32, f32), goal: (f32, f32)) -> Vec<(f32, f32)> {
        let start_rc = self.grid.world_to_cell(start.0, start.1);
        let goal_rc = self.grid.world_to_cell(goal.0, goal.1);

        if start_rc == goal_rc {
            return vec![goal];
        }

        let Some(grid_path) = find_path_cells(&self.grid, start_rc, goal_rc) else {
            return vec![];
        };

        let smoothed = smooth_path(&self.grid, &grid_path);
        let mut world_path: Vec<(f32, f32)> =
            smoothed.iter().map(|&(r, c)| self.grid.cell_to_world(r, c)).collect();

        if !self.grid.is_occupied(start.0, start.1) {
            if let Some(first) = world_path.first_mut() {
                *first = start;
            }
        }
        if !self.grid.is_occupied(goal.0, goal.1) {
            if let Some(last) = world_path.last_mut() {
                *last = goal;
            }
        }

        world_path
    }
}
