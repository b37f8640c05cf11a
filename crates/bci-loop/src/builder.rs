//! Fluent construction of a [`SupervisoryLoop`]: every collaborator has a
//! sensible factory default, so a caller only overrides what it actually
//! wants to change.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bci_autopilot::{DeadReckoningBackend, SimBackend};
use bci_core::ControlConfig;
use bci_planner::{factory_obstacles, factory_waypoint_table, GridAStarPlanner, PathPlanner, WaypointTable, FACTORY_BOUNDS};
use bci_robot::RobotManager;

use crate::brain_source::{BrainSource, NoBrainSource};
use crate::supervisory::SupervisoryLoop;

pub struct SupervisoryLoopBuilder {
    config: ControlConfig,
    planner: Option<Arc<dyn PathPlanner>>,
    waypoints: Option<WaypointTable>,
    robots: Option<RobotManager>,
    sim: Option<Box<dyn SimBackend>>,
    brain_source: Option<Box<dyn BrainSource>>,
    start_unix_secs: Option<i64>,
}

impl Default for SupervisoryLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SupervisoryLoopBuilder {
    pub fn new() -> Self {
        Self {
            config: ControlConfig::default(),
            planner: None,
            waypoints: None,
            robots: None,
            sim: None,
            brain_source: None,
            start_unix_secs: None,
        }
    }

    pub fn config(mut self, config: ControlConfig) -> Self {
        self.config = config;
        self
    }

    pub fn planner(mut self, planner: Arc<dyn PathPlanner>) -> Self {
        self.planner = Some(planner);
        self
    }

    pub fn waypoints(mut self, waypoints: WaypointTable) -> Self {
        self.waypoints = Some(waypoints);
        self
    }

    pub fn robots(mut self, robots: RobotManager) -> Self {
        self.robots = Some(robots);
        self
    }

    pub fn sim(mut self, sim: Box<dyn SimBackend>) -> Self {
        self.sim = Some(sim);
        self
    }

    pub fn brain_source(mut self, brain_source: Box<dyn BrainSource>) -> Self {
        self.brain_source = Some(brain_source);
        self
    }

    pub fn start_unix_secs(mut self, start_unix_secs: i64) -> Self {
        self.start_unix_secs = Some(start_unix_secs);
        self
    }

    pub fn build(self) -> SupervisoryLoop {
        let waypoints = self.waypoints.unwrap_or_else(factory_waypoint_table);
        let planner = self.planner.unwrap_or_else(|| {
            Arc::new(GridAStarPlanner::new(
                self.config.planner_resolution,
                self.config.robot_radius,
                FACTORY_BOUNDS,
                &factory_obstacles(),
            ))
        });
        let robots = self.robots.unwrap_or_default();
        let sim: Box<dyn SimBackend> = self.sim.unwrap_or_else(|| {
            Box::new(DeadReckoningBackend::new(
                self.config.dead_reckoning_linear_delta,
                self.config.dead_reckoning_angular_delta,
                FACTORY_BOUNDS,
            ))
        });
        let brain_source: Box<dyn BrainSource> = self.brain_source.unwrap_or_else(|| Box::new(NoBrainSource));
        let start_unix_secs = self.start_unix_secs.unwrap_or_else(|| {
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0)
        });

        SupervisoryLoop::new(self.config, planner, waypoints, robots, sim, brain_source, start_unix_secs)
    }
}
