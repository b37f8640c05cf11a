#[cfg(test)]
mod gear_cycle {
    use bci_core::{BrainClass, Gear, GestureEvent, GestureKind};

    use crate::gear_state::GearStateMachine;

    /// Scenario A: four TongueTap QUICK_CLENCHes cycle NEUTRAL -> FORWARD ->
    /// REVERSE -> ORCHESTRATE -> NEUTRAL.
    #[test]
    fn four_tongue_taps_complete_the_ring() {
        let mut sm = GearStateMachine::new();
        assert_eq!(sm.gear, Gear::Neutral);

        let tap = GestureEvent::new(GestureKind::QuickClench, BrainClass::TongueTap, 0.3);
        sm.apply_gesture(tap, 0);
        assert_eq!(sm.gear, Gear::Forward);
        sm.apply_gesture(tap, 0);
        assert_eq!(sm.gear, Gear::Reverse);
        sm.apply_gesture(tap, 0);
        assert_eq!(sm.gear, Gear::Orchestrate);
        sm.apply_gesture(tap, 0);
        assert_eq!(sm.gear, Gear::Neutral);
    }
}

#[cfg(test)]
mod toggle {
    use bci_core::{BrainClass, Gear, GestureEvent, GestureKind, RobotAction};

    use crate::gear_state::GearStateMachine;

    /// Scenario B: toggle walk then cancel.
    #[test]
    fn quick_clench_sets_then_clears_the_toggle() {
        let mut sm = GearStateMachine::new();
        sm.gear = Gear::Forward;

        let clench = GestureEvent::new(GestureKind::QuickClench, BrainClass::BothFists, 0.4);
        let first = sm.apply_gesture(clench, 0);
        assert_eq!(first.action, RobotAction::MoveForward);
        assert!(first.toggle_changed);
        assert_eq!(sm.toggled_action, Some(RobotAction::MoveForward));

        let second = sm.apply_gesture(clench, 0);
        assert_eq!(second.action, RobotAction::Idle);
        assert!(second.toggle_changed);
        assert_eq!(sm.toggled_action, None);
    }

    #[test]
    fn holding_item_flips_neutral_grab_release() {
        let mut sm = GearStateMachine::new();
        assert_eq!(sm.gear, Gear::Neutral);
        let clench = GestureEvent::new(GestureKind::QuickClench, BrainClass::BothFists, 0.2);
        let out = sm.apply_gesture(clench, 0);
        assert_eq!(out.action, RobotAction::Grab);

        sm.holding_item = true;
        sm.toggled_action = None;
        sm.toggled_class = None;
        let out2 = sm.apply_gesture(clench, 0);
        assert_eq!(out2.action, RobotAction::Release);
    }

    #[test]
    fn non_quick_clench_does_not_touch_the_toggle() {
        let mut sm = GearStateMachine::new();
        sm.gear = Gear::Forward;
        let medium = GestureEvent::new(GestureKind::HoldMedium, BrainClass::BothFists, 2.0);
        let out = sm.apply_gesture(medium, 0);
        assert_eq!(out.action, RobotAction::MoveForward);
        assert!(!out.toggle_changed);
        assert_eq!(sm.toggled_action, None);
    }
}

#[cfg(test)]
mod orchestration_dispatch {
    use bci_core::{BrainClass, Gear, GestureEvent, GestureKind};

    use crate::gear_state::GearStateMachine;
    use crate::orchestration::{OrchestrationAction, OrchestrationPhase};

    #[test]
    fn cycle_confirm_confirm_dispatches_a_task() {
        let mut sm = GearStateMachine::new();
        sm.gear = Gear::Orchestrate;

        let cycle_right = GestureEvent::new(GestureKind::QuickClench, BrainClass::RightFist, 0.2);
        sm.apply_gesture(cycle_right, 10);
        assert_eq!(sm.orchestration.current_action(), OrchestrationAction::CarryTo);

        let confirm = GestureEvent::new(GestureKind::HoldMedium, BrainClass::BothFists, 2.0);
        let out = sm.apply_gesture(confirm, 10);
        assert!(out.orchestration_task.is_none());
        assert_eq!(sm.orchestration.phase, OrchestrationPhase::SelectingLandmark);

        sm.apply_gesture(cycle_right, 10);
        sm.apply_gesture(cycle_right, 10);
        let dispatch = sm.apply_gesture(confirm, 10);
        let task = dispatch.orchestration_task.expect("second confirm dispatches");
        assert_eq!(task.action, OrchestrationAction::CarryTo);
        assert_eq!(task.landmark_index, 2);
        assert_eq!(sm.orchestration.phase, OrchestrationPhase::SelectingAction);
    }

    #[test]
    fn double_clench_with_no_selection_cancels() {
        let mut sm = GearStateMachine::new();
        sm.gear = Gear::Orchestrate;
        let double = GestureEvent::new(GestureKind::DoubleClench, BrainClass::BothFists, 0.5);
        let out = sm.apply_gesture(double, 10);
        assert!(out.orchestration_event.is_some());
    }
}

#[cfg(test)]
mod manager {
    use bci_core::RobotId;

    use crate::manager::{DispatchPlan, RobotManager, SelectDirection};
    use crate::orchestration::{OrchestrationAction, OrchestrationTask};

    #[test]
    fn default_roster_has_three_robots_selected_at_zero() {
        let mgr = RobotManager::new();
        assert_eq!(mgr.store.count, 3);
        assert_eq!(mgr.selected_robot(), RobotId(0));
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut mgr = RobotManager::new();
        mgr.select_by_direction(SelectDirection::Left);
        assert_eq!(mgr.selected_robot(), RobotId(2));
        mgr.select_by_direction(SelectDirection::Right);
        mgr.select_by_direction(SelectDirection::Right);
        assert_eq!(mgr.selected_robot(), RobotId(2));
    }

    #[test]
    fn backflip_dispatches_immediately_to_active_set() {
        let mut mgr = RobotManager::new();
        mgr.set_active_robots([RobotId(0), RobotId(1)]);
        let plan = mgr.dispatch_orchestration_task(OrchestrationTask {
            action: OrchestrationAction::Backflip,
            landmark_index: 0,
        });
        match plan {
            DispatchPlan::Immediate { robots, .. } => assert_eq!(robots.len(), 2),
            other => panic!("expected Immediate, got {other:?}"),
        }
    }

    #[test]
    fn logistics_task_with_many_active_robots_is_sequential() {
        let mut mgr = RobotManager::new();
        mgr.set_active_robots([RobotId(0), RobotId(1), RobotId(2)]);
        let plan = mgr.dispatch_orchestration_task(OrchestrationTask {
            action: OrchestrationAction::CarryTo,
            landmark_index: 1,
        });
        assert_eq!(plan, DispatchPlan::Sequential);
        assert!(mgr.sequential_queue_head().is_some());
    }

    #[test]
    fn logistics_task_with_one_active_robot_is_simultaneous() {
        let mut mgr = RobotManager::new();
        mgr.set_active_robots([RobotId(0)]);
        let plan = mgr.dispatch_orchestration_task(OrchestrationTask {
            action: OrchestrationAction::StackTo,
            landmark_index: 1,
        });
        match plan {
            DispatchPlan::Simultaneous { robots } => assert_eq!(robots, vec![RobotId(0)]),
            other => panic!("expected Simultaneous, got {other:?}"),
        }
    }
}
