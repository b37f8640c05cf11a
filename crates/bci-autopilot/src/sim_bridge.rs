//! Pose integration backend for robots with no live physics connection.
//!
//! # Pluggability
//!
//! `execute` is called through [`SimBackend`] so the loop's dead-reckoning
//! default can be swapped for a real robot/physics backend without touching
//! `bci-loop`, the same way [`bci_planner::PathPlanner`] is pluggable.

use bci_core::RobotAction;
use bci_planner::MapBounds;

/// Pelvis height of a robot standing upright.
pub const STANDING_PELVIS_Z: f32 = 0.9;
/// Pelvis height below which the robot is considered to have fallen.
pub const FALL_PELVIS_Z_THRESHOLD: f32 = 0.3;

/// A robot's physical pose plus the fields `execute` is authoritative over.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotPose {
    pub x: f32,
    pub y: f32,
    pub yaw: f32,
    pub pelvis_z: f32,
    pub holding_item: bool,
}

impl RobotPose {
    pub fn standing(x: f32, y: f32, yaw: f32) -> Self {
        Self { x, y, yaw, pelvis_z: STANDING_PELVIS_Z, holding_item: false }
    }
}

/// Adapter contract for turning one tick's action into the next pose.
pub trait SimBackend: Send + Sync {
    fn start(&mut self) {}
    fn stop(&mut self) {}
    fn reset(&mut self) {}

    /// Execute `action` against `pose`, returning the authoritative
    /// post-action pose. `holding_item` on the result is authoritative —
    /// callers must not derive it independently.
    fn execute(&self, action: RobotAction, pose: RobotPose) -> RobotPose;
}

/// Default backend: fixed per-tick linear/angular deltas clamped to the map
/// bounds, with pelvis-z fall recovery.
pub struct DeadReckoningBackend {
    pub linear_delta: f32,
    pub angular_delta: f32,
    pub bounds: MapBounds,
}

impl DeadReckoningBackend {
    pub fn new(linear_delta: f32, angular_delta: f32, bounds: MapBounds) -> Self {
        Self { linear_delta, angular_delta, bounds }
    }

    fn clamp_to_bounds(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(self.bounds.min_x, self.bounds.max_x), y.clamp(self.bounds.min_y, self.bounds.max_y))
    }
}

impl SimBackend for DeadReckoningBackend {
    fn execute(&self, action: RobotAction, mut pose: RobotPose) -> RobotPose {
        match action {
            RobotAction::RotateLeft => pose.yaw += self.angular_delta,
            RobotAction::RotateRight => pose.yaw -= self.angular_delta,
            RobotAction::MoveForward => {
                pose.x += pose.yaw.cos() * self.linear_delta;
                pose.y += pose.yaw.sin() * self.linear_delta;
            }
            RobotAction::MoveBackward => {
                pose.x -= pose.yaw.cos() * self.linear_delta;
                pose.y -= pose.yaw.sin() * self.linear_delta;
            }
            RobotAction::Grab => pose.holding_item = true,
            RobotAction::Release => pose.holding_item = false,
            // No physics backend to actually fall over; a backflip dips the
            // pelvis below the recovery threshold so the same tick's
            // recovery check below restores the standing keyframe.
            RobotAction::Backflip => pose.pelvis_z = FALL_PELVIS_Z_THRESHOLD - 0.01,
            RobotAction::Idle | RobotAction::Hold | RobotAction::Stop | RobotAction::EmergencyStop => {}
        }

        let (x, y) = self.clamp_to_bounds(pose.x, pose.y);
        pose.x = x;
        pose.y = y;

        if pose.pelvis_z < FALL_PELVIS_Z_THRESHOLD {
            pose.pelvis_z = STANDING_PELVIS_Z;
        }

        pose
    }
}
