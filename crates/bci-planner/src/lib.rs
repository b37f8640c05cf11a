//! Grid-based A* path planning and the factory waypoint/alias table.

pub mod astar;
pub mod error;
pub mod grid;
pub mod planner;
pub mod scene;
pub mod smoothing;
pub mod waypoint;

pub use error::{PlannerError, PlannerResult};
pub use grid::{MapBounds, Obstacle, OccupancyGrid};
pub use planner::{GridAStarPlanner, PathPlanner};
pub use scene::{factory_obstacles, factory_waypoint_table, FACTORY_BOUNDS};
pub use waypoint::{Waypoint, WaypointTable};

#[cfg(test)]
mod tests;
