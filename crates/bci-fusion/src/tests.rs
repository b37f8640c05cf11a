use bci_core::{BrainClass, CommandAction, CommandOrigin, ControlConfig, Gear, ParsedCommand, RobotAction, Tick};
use bci_gesture::GestureThresholds;
use bci_robot::GearStateMachine;

use crate::fusion::{CommandFusion, FusionSource};
use crate::thresholds::FusionThresholds;

fn voice(action: CommandAction) -> ParsedCommand {
    ParsedCommand {
        kind: CommandOrigin::DirectOverride,
        action,
        robot_id: None,
        target: None,
        item: None,
        raw_text: String::new(),
        confidence: 0.9,
        timestamp: 0.0,
    }
}

fn fixture() -> (CommandFusion, GearStateMachine, GestureThresholds, FusionThresholds) {
    let cfg = ControlConfig::default();
    (CommandFusion::new(), GearStateMachine::new(), GestureThresholds::from_config(&cfg), FusionThresholds::from_config(&cfg))
}

#[test]
fn voice_direct_override_wins_over_brain() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    let cmd = voice(CommandAction::Direct(RobotAction::Stop));
    let outcome = fusion.update(Some(&cmd), Some(BrainClass::BothFists), &mut sm, 4, Tick(0), &gth, &fth);
    assert_eq!(outcome.action, RobotAction::Stop);
    assert_eq!(outcome.source, Some(FusionSource::Voice));
}

#[test]
fn voice_hold_window_sustains_after_voice_stops() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    let cmd = voice(CommandAction::Direct(RobotAction::MoveForward));
    fusion.update(Some(&cmd), None, &mut sm, 4, Tick(0), &gth, &fth);

    // One tick later with no new voice command: still inside the hold window.
    let outcome = fusion.update(None, None, &mut sm, 4, Tick(1), &gth, &fth);
    assert_eq!(outcome.action, RobotAction::MoveForward);
    assert_eq!(outcome.source, Some(FusionSource::VoiceHold));
}

#[test]
fn voice_hold_window_expires() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    let cmd = voice(CommandAction::Direct(RobotAction::MoveForward));
    fusion.update(Some(&cmd), None, &mut sm, 4, Tick(0), &gth, &fth);

    let past_hold = Tick(0) + fth.voice_override_hold_ticks + 1;
    let outcome = fusion.update(None, None, &mut sm, 4, past_hold, &gth, &fth);
    assert_eq!(outcome.source, Some(FusionSource::Idle));
}

#[test]
fn completed_brain_gesture_toggles_and_applies_to_gear_state() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    sm.gear = Gear::Forward;

    // Tick 0: begin the clench; tick 1: release (quick clench, well under
    // the threshold) — the completing edge fires on tick 1.
    fusion.update(None, Some(BrainClass::BothFists), &mut sm, 4, Tick(0), &gth, &fth);
    let outcome = fusion.update(None, None, &mut sm, 4, Tick(1), &gth, &fth);

    assert_eq!(outcome.action, RobotAction::MoveForward);
    assert_eq!(outcome.source, Some(FusionSource::BrainGesture));
    assert_eq!(sm.toggled_action, Some(RobotAction::MoveForward));
}

#[test]
fn toggle_sustains_on_ticks_with_no_completed_gesture() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    sm.gear = Gear::Forward;
    fusion.update(None, Some(BrainClass::BothFists), &mut sm, 4, Tick(0), &gth, &fth);
    fusion.update(None, None, &mut sm, 4, Tick(1), &gth, &fth);

    // No gesture in progress and no voice command: the toggle latch holds.
    let outcome = fusion.update(None, None, &mut sm, 4, Tick(2), &gth, &fth);
    assert_eq!(outcome.action, RobotAction::MoveForward);
    assert_eq!(outcome.source, Some(FusionSource::BrainToggle));
}

#[test]
fn idle_when_nothing_is_active() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    let outcome = fusion.update(None, None, &mut sm, 4, Tick(0), &gth, &fth);
    assert_eq!(outcome.action, RobotAction::Idle);
    assert_eq!(outcome.source, Some(FusionSource::Idle));
}

#[test]
fn navigate_falls_through_to_brain_priority() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    sm.gear = Gear::Forward;
    let cmd = voice(CommandAction::Navigate { target_raw: "dock".to_string() });

    fusion.update(Some(&cmd), Some(BrainClass::BothFists), &mut sm, 4, Tick(0), &gth, &fth);
    let outcome = fusion.update(Some(&cmd), None, &mut sm, 4, Tick(1), &gth, &fth);

    assert_eq!(outcome.navigate_target.as_deref(), Some("dock"));
    assert_eq!(outcome.action, RobotAction::MoveForward);
    assert_eq!(outcome.source, Some(FusionSource::BrainGesture));
}

#[test]
fn cancel_nav_short_circuits_with_flag_set() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    let cmd = voice(CommandAction::CancelNav);
    let outcome = fusion.update(Some(&cmd), None, &mut sm, 4, Tick(0), &gth, &fth);

    assert_eq!(outcome.action, RobotAction::Stop);
    assert!(outcome.cancel_nav);
    assert_eq!(outcome.source, Some(FusionSource::CancelNav));
}

#[test]
fn select_sequence_surfaces_direction_without_mutating_gear() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    sm.gear = Gear::Orchestrate;

    // Bracketing BothFists hold, long enough to cross into awaiting-select,
    // then a LeftFist reclench within the reclench window completes the
    // select sequence.
    fusion.update(None, Some(BrainClass::BothFists), &mut sm, 4, Tick(0), &gth, &fth);
    let past_long_hold = gth.long_hold_threshold + 1;
    fusion.update(None, None, &mut sm, 4, Tick(past_long_hold), &gth, &fth);
    fusion.update(None, Some(BrainClass::LeftFist), &mut sm, 4, Tick(past_long_hold + 1), &gth, &fth);
    let outcome = fusion.update(None, Some(BrainClass::BothFists), &mut sm, 4, Tick(past_long_hold + 2), &gth, &fth);

    assert_eq!(outcome.source, Some(FusionSource::BrainGesture));
    assert!(outcome.select_direction.is_some());
    assert_eq!(outcome.action, RobotAction::Idle);
}

#[test]
fn voice_stop_suppresses_toggle_then_toggle_resumes_after_hold_expires() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    sm.gear = Gear::Forward;

    // Tick 0: begin the clench; tick 1: release — toggles ROTATE_LEFT on.
    fusion.update(None, Some(BrainClass::LeftFist), &mut sm, 4, Tick(0), &gth, &fth);
    fusion.update(None, None, &mut sm, 4, Tick(1), &gth, &fth);
    assert_eq!(sm.toggled_action, Some(RobotAction::RotateLeft));

    // A voice "stop" override takes over the actuator immediately...
    let stop = voice(CommandAction::Direct(RobotAction::Stop));
    let outcome = fusion.update(Some(&stop), None, &mut sm, 4, Tick(2), &gth, &fth);
    assert_eq!(outcome.action, RobotAction::Stop);
    assert_eq!(outcome.source, Some(FusionSource::Voice));

    // ...and holds STOP for the voice-hold window with no further voice input.
    let outcome = fusion.update(None, None, &mut sm, 4, Tick(3), &gth, &fth);
    assert_eq!(outcome.action, RobotAction::Stop);
    assert_eq!(outcome.source, Some(FusionSource::VoiceHold));

    // Once the hold window expires with no gesture in progress, the toggle
    // latch was never cleared by the voice override, so it resumes.
    let past_hold = Tick(2) + fth.voice_override_hold_ticks + 1;
    let outcome = fusion.update(None, None, &mut sm, 4, past_hold, &gth, &fth);
    assert_eq!(sm.toggled_action, Some(RobotAction::RotateLeft));
    assert_eq!(outcome.action, RobotAction::RotateLeft);
    assert_eq!(outcome.source, Some(FusionSource::BrainToggle));
}

#[test]
fn shift_gear_voice_command_cycles_gear() {
    let (mut fusion, mut sm, gth, fth) = fixture();
    assert_eq!(sm.gear, Gear::Neutral);
    let cmd = voice(CommandAction::ShiftGear);
    fusion.update(Some(&cmd), None, &mut sm, 4, Tick(0), &gth, &fth);
    assert_eq!(sm.gear, Gear::Forward);
}
