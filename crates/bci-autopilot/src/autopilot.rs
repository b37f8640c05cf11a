//! Turn-then-walk waypoint navigation for one robot.

use std::f32::consts::PI;

use bci_core::RobotAction;
use bci_planner::{PathPlanner, WaypointTable};

/// A navigation snapshot suitable for the `nav_update` broadcast message.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavStatus {
    pub active: bool,
    pub target_name: String,
    pub target_x: f32,
    pub target_y: f32,
    pub distance: f32,
    pub arrived: bool,
    pub waypoints_total: usize,
    pub waypoints_remaining: usize,
}

/// Steers one robot toward a named landmark by planning a path once at
/// construction, then turning to face and walking toward each intermediate
/// waypoint in turn.
pub struct Autopilot {
    target_name: String,
    target_x: f32,
    target_y: f32,
    active: bool,
    arrived: bool,
    distance: f32,
    waypoints: Vec<(f32, f32)>,
    wp_index: usize,
}

impl Autopilot {
    /// Plan a path from `start_xy` to `target_xy` via `planner`. An empty
    /// plan falls back to a single direct waypoint at the target.
    pub fn new(
        planner: &dyn PathPlanner,
        target_name: impl Into<String>,
        target_xy: (f32, f32),
        start_xy: (f32, f32),
    ) -> Self {
        let mut waypoints = planner.find_path(start_xy, target_xy);
        if waypoints.is_empty() {
            waypoints.push(target_xy);
        }
        Self {
            target_name: target_name.into(),
            target_x: target_xy.0,
            target_y: target_xy.1,
            active: true,
            arrived: false,
            distance: f32::INFINITY,
            waypoints,
            wp_index: 0,
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn arrived(&self) -> bool {
        self.arrived
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn status(&self) -> NavStatus {
        NavStatus {
            active: self.active,
            target_name: self.target_name.clone(),
            target_x: self.target_x,
            target_y: self.target_y,
            distance: self.distance,
            arrived: self.arrived,
            waypoints_total: self.waypoints.len(),
            waypoints_remaining: self.waypoints.len().saturating_sub(self.wp_index),
        }
    }

    /// Compute the action for this tick given the robot's current pose.
    pub fn update(&mut self, robot_xy: (f32, f32), robot_yaw: f32, arrival_dist: f32, align_threshold: f32) -> RobotAction {
        if !self.active {
            return RobotAction::Idle;
        }

        let (rx, ry) = robot_xy;

        if self.wp_index >= self.waypoints.len() {
            self.active = false;
            self.arrived = true;
            return RobotAction::Stop;
        }

        let fdx = self.target_x - rx;
        let fdy = self.target_y - ry;
        self.distance = (fdx * fdx + fdy * fdy).sqrt();

        let (mut wx, mut wy) = self.waypoints[self.wp_index];
        let mut dx = wx - rx;
        let mut dy = wy - ry;
        let wp_dist = (dx * dx + dy * dy).sqrt();

        if wp_dist < arrival_dist {
            self.wp_index += 1;
            if self.wp_index >= self.waypoints.len() {
                self.active = false;
                self.arrived = true;
                return RobotAction::Stop;
            }
            (wx, wy) = self.waypoints[self.wp_index];
            dx = wx - rx;
            dy = wy - ry;
        }

        let desired_yaw = dy.atan2(dx);
        let mut angle_diff = desired_yaw - robot_yaw;
        while angle_diff > PI {
            angle_diff -= 2.0 * PI;
        }
        while angle_diff < -PI {
            angle_diff += 2.0 * PI;
        }

        if angle_diff.abs() > align_threshold {
            if angle_diff > 0.0 { RobotAction::RotateLeft } else { RobotAction::RotateRight }
        } else {
            RobotAction::MoveForward
        }
    }
}

/// Resolve a spoken landmark name to its canonical name and world coordinates.
pub fn resolve_target(table: &WaypointTable, spoken: &str) -> Option<(String, (f32, f32))> {
    table.resolve(spoken)
}
