#[cfg(test)]
mod navigation {
    use bci_core::RobotAction;
    use bci_planner::{GridAStarPlanner, MapBounds};

    use crate::autopilot::Autopilot;
    use crate::sim_bridge::{DeadReckoningBackend, RobotPose, SimBackend};

    fn bounds() -> MapBounds {
        MapBounds { min_x: -10.0, max_x: 10.0, min_y: -10.0, max_y: 10.0 }
    }

    #[test]
    fn misaligned_heading_rotates_before_walking() {
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds(), &[]);
        let mut autopilot = Autopilot::new(&planner, "Table", (5.0, 0.0), (0.0, 0.0));
        // Facing straight up; the target is due east, so the loop should turn first.
        let action = autopilot.update((0.0, 0.0), std::f32::consts::FRAC_PI_2, 0.5, 0.3);
        assert_eq!(action, RobotAction::RotateRight);
    }

    #[test]
    fn aligned_heading_walks_forward() {
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds(), &[]);
        let mut autopilot = Autopilot::new(&planner, "Table", (5.0, 0.0), (0.0, 0.0));
        let action = autopilot.update((0.0, 0.0), 0.0, 0.5, 0.3);
        assert_eq!(action, RobotAction::MoveForward);
    }

    #[test]
    fn arrival_within_threshold_stops_and_marks_arrived() {
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds(), &[]);
        let mut autopilot = Autopilot::new(&planner, "Table", (0.1, 0.0), (0.0, 0.0));
        let action = autopilot.update((0.0, 0.0), 0.0, 0.5, 0.3);
        assert_eq!(action, RobotAction::Stop);
        assert!(autopilot.arrived());
        assert!(!autopilot.active());
    }

    #[test]
    fn cancel_returns_idle() {
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds(), &[]);
        let mut autopilot = Autopilot::new(&planner, "Table", (5.0, 0.0), (0.0, 0.0));
        autopilot.cancel();
        assert_eq!(autopilot.update((0.0, 0.0), 0.0, 0.5, 0.3), RobotAction::Idle);
    }

    /// Testable property: distance to the final target never increases while
    /// the autopilot remains active and driving a robot that actually obeys
    /// its own commands.
    #[test]
    fn distance_to_target_is_non_increasing_until_arrival() {
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds(), &[]);
        let mut autopilot = Autopilot::new(&planner, "Table", (5.0, 0.0), (0.0, 0.0));
        let backend = DeadReckoningBackend::new(0.06, 0.2, bounds());

        let mut pose = RobotPose::standing(0.0, 0.0, 0.0);
        let mut last_distance = f32::INFINITY;

        for _ in 0..500 {
            let action = autopilot.update((pose.x, pose.y), pose.yaw, 0.5, 0.3);
            if !autopilot.active() {
                break;
            }
            let distance_before = autopilot.status().distance;
            assert!(distance_before <= last_distance + 1e-4);
            last_distance = distance_before;
            pose = backend.execute(action, pose);
        }

        assert!(autopilot.arrived());
    }
}

#[cfg(test)]
mod store {
    use bci_core::RobotId;
    use bci_planner::{GridAStarPlanner, MapBounds};

    use crate::autopilot::Autopilot;
    use crate::store::AutopilotStore;

    #[test]
    fn cancel_all_deactivates_every_slot() {
        let bounds = MapBounds { min_x: -10.0, max_x: 10.0, min_y: -10.0, max_y: 10.0 };
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds, &[]);
        let mut store = AutopilotStore::new(2);
        store.set(RobotId(0), Autopilot::new(&planner, "Table", (5.0, 0.0), (0.0, 0.0)));
        store.set(RobotId(1), Autopilot::new(&planner, "Table", (5.0, 0.0), (0.0, 0.0)));

        assert!(store.any_active());
        store.cancel_all();
        assert!(!store.any_active());
    }

    #[test]
    fn reset_clears_every_slot() {
        let bounds = MapBounds { min_x: -10.0, max_x: 10.0, min_y: -10.0, max_y: 10.0 };
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds, &[]);
        let mut store = AutopilotStore::new(1);
        store.set(RobotId(0), Autopilot::new(&planner, "Table", (5.0, 0.0), (0.0, 0.0)));
        store.reset();
        assert!(store.get(RobotId(0)).is_none());
    }
}

#[cfg(test)]
mod sim_backend {
    use bci_core::RobotAction;
    use bci_planner::MapBounds;

    use crate::sim_bridge::{DeadReckoningBackend, RobotPose, SimBackend, FALL_PELVIS_Z_THRESHOLD, STANDING_PELVIS_Z};

    fn backend() -> DeadReckoningBackend {
        DeadReckoningBackend::new(0.06, 0.06, MapBounds { min_x: -1.0, max_x: 1.0, min_y: -1.0, max_y: 1.0 })
    }

    #[test]
    fn move_forward_integrates_along_current_heading() {
        let pose = RobotPose::standing(0.0, 0.0, 0.0);
        let next = backend().execute(RobotAction::MoveForward, pose);
        assert!((next.x - 0.06).abs() < 1e-5);
        assert!(next.y.abs() < 1e-5);
    }

    #[test]
    fn position_clamps_to_map_bounds() {
        let pose = RobotPose::standing(0.99, 0.0, 0.0);
        let next = backend().execute(RobotAction::MoveForward, pose);
        assert_eq!(next.x, 1.0);
    }

    #[test]
    fn grab_and_release_set_authoritative_holding_flag() {
        let pose = RobotPose::standing(0.0, 0.0, 0.0);
        let holding = backend().execute(RobotAction::Grab, pose);
        assert!(holding.holding_item);
        let released = backend().execute(RobotAction::Release, holding);
        assert!(!released.holding_item);
    }

    #[test]
    fn backflip_recovers_to_standing_pelvis_same_tick() {
        let pose = RobotPose::standing(0.0, 0.0, 0.0);
        let next = backend().execute(RobotAction::Backflip, pose);
        assert!(next.pelvis_z >= FALL_PELVIS_Z_THRESHOLD);
        assert_eq!(next.pelvis_z, STANDING_PELVIS_Z);
    }
}
