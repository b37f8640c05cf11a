//! Waypoint navigation and pose integration for the BCI control core.

pub mod autopilot;
pub mod error;
pub mod sim_bridge;
pub mod store;

pub use autopilot::{resolve_target, Autopilot, NavStatus};
pub use error::{AutopilotError, AutopilotResult};
pub use sim_bridge::{DeadReckoningBackend, RobotPose, SimBackend, FALL_PELVIS_Z_THRESHOLD, STANDING_PELVIS_Z};
pub use store::AutopilotStore;

#[cfg(test)]
mod tests;
