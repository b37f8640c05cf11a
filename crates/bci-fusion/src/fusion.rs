//! Merges brain and voice commands into a single action for one robot,
//! resolving a fixed priority chain every tick.

use bci_core::{BrainClass, CommandAction, GestureEvent, ParsedCommand, RobotAction, SelectDirection, Tick};
use bci_gesture::{GestureRecognizer, GestureThresholds};
use bci_robot::{GearStateMachine, OrchestrationEvent, OrchestrationTask};

use crate::thresholds::FusionThresholds;

/// Which priority tier produced this tick's action.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FusionSource {
    Voice,
    VoiceHold,
    BrainGesture,
    BrainToggle,
    Idle,
    /// A `NAVIGATE` voice command was observed; the loop, not fusion, drives
    /// the robot via the autopilot. `action` is `Idle` this tick.
    Navigate,
    /// A `CANCEL_NAV` voice command was observed; `action` is `Stop` and
    /// `cancel_nav` is set so the loop cancels the selected autopilot.
    CancelNav,
}

#[derive(Clone, Debug, Default)]
pub struct FusionOutcome {
    pub action: RobotAction,
    pub source: Option<FusionSourceTag>,
    pub navigate_target: Option<String>,
    pub cancel_nav: bool,
    pub orchestration_event: Option<OrchestrationEvent>,
    pub orchestration_task: Option<OrchestrationTask>,
    pub select_direction: Option<SelectDirection>,
    /// The gesture that completed this tick, if any — surfaced regardless
    /// of which priority tier won actuation, so callers can react to a
    /// specific gesture (e.g. a cancel-confirm double-clench) even while
    /// voice holds the actuator.
    pub completed_gesture: Option<GestureEvent>,
}

/// Newtype so `FusionOutcome` can derive `Default` (`FusionSource` has no
/// natural default variant worth privileging).
pub type FusionSourceTag = FusionSource;

struct VoiceOutcome {
    action: Option<RobotAction>,
    cancel_nav: bool,
    navigate_target: Option<String>,
}

/// Per-robot fusion state: the gesture recognizer feeding this robot's
/// `GearStateMachine`, plus the voice-hold latch.
pub struct CommandFusion {
    recognizer: GestureRecognizer,
    last_emitted_action: RobotAction,
    voice_override_until: Option<Tick>,
}

impl Default for CommandFusion {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFusion {
    pub fn new() -> Self {
        Self { recognizer: GestureRecognizer::new(), last_emitted_action: RobotAction::Idle, voice_override_until: None }
    }

    pub fn reset(&mut self) {
        self.recognizer.reset();
        self.last_emitted_action = RobotAction::Idle;
        self.voice_override_until = None;
    }

    /// Called every tick. `brain_class` is `None` when gated by low
    /// confidence or the brain channel is disabled — the recognizer is fed
    /// regardless so its internal hold-duration tracking never has gaps.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        voice: Option<&ParsedCommand>,
        brain_class: Option<BrainClass>,
        sm: &mut GearStateMachine,
        waypoint_count: usize,
        now: Tick,
        gesture_th: &GestureThresholds,
        fusion_th: &FusionThresholds,
    ) -> FusionOutcome {
        let gesture_event = self.recognizer.update(brain_class, now, gesture_th);
        let mut outcome = self.resolve(voice, gesture_event, sm, waypoint_count, now, fusion_th);
        outcome.completed_gesture = gesture_event;
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve(
        &mut self,
        voice: Option<&ParsedCommand>,
        gesture_event: Option<GestureEvent>,
        sm: &mut GearStateMachine,
        waypoint_count: usize,
        now: Tick,
        fusion_th: &FusionThresholds,
    ) -> FusionOutcome {
        let gear_outcome = gesture_event.map(|event| (event, sm.apply_gesture(event, waypoint_count)));

        let mut navigate_target = None;

        if let Some(cmd) = voice {
            let vo = self.handle_voice(cmd, sm);
            navigate_target = vo.navigate_target;

            if let Some(action) = vo.action {
                self.voice_override_until = Some(now + fusion_th.voice_override_hold_ticks);
                self.last_emitted_action = action;
                let source = if vo.cancel_nav { FusionSource::CancelNav } else { FusionSource::Voice };
                return FusionOutcome {
                    action,
                    source: Some(source),
                    navigate_target,
                    cancel_nav: vo.cancel_nav,
                    ..Default::default()
                };
            }
        }

        if let Some(until) = self.voice_override_until {
            if now < until {
                return FusionOutcome {
                    action: self.last_emitted_action,
                    source: Some(FusionSource::VoiceHold),
                    navigate_target,
                    ..Default::default()
                };
            }
        }

        if let Some((event, outcome)) = gear_outcome {
            if event.kind == bci_core::GestureKind::SelectSequence {
                return FusionOutcome {
                    action: RobotAction::Idle,
                    source: Some(FusionSource::BrainGesture),
                    navigate_target,
                    select_direction: event.select_direction,
                    ..Default::default()
                };
            }
            self.last_emitted_action = outcome.action;
            return FusionOutcome {
                action: outcome.action,
                source: Some(FusionSource::BrainGesture),
                navigate_target,
                orchestration_event: outcome.orchestration_event,
                orchestration_task: outcome.orchestration_task,
                ..Default::default()
            };
        }

        if let Some(toggled) = sm.toggled_action {
            self.last_emitted_action = toggled;
            return FusionOutcome { action: toggled, source: Some(FusionSource::BrainToggle), navigate_target, ..Default::default() };
        }

        self.last_emitted_action = RobotAction::Idle;
        FusionOutcome { action: RobotAction::Idle, source: Some(FusionSource::Idle), navigate_target, ..Default::default() }
    }

    fn handle_voice(&self, cmd: &ParsedCommand, sm: &mut GearStateMachine) -> VoiceOutcome {
        match &cmd.action {
            CommandAction::Direct(action) => VoiceOutcome { action: Some(*action), cancel_nav: false, navigate_target: None },
            CommandAction::ShiftGear => {
                sm.shift_gear();
                VoiceOutcome { action: Some(RobotAction::Idle), cancel_nav: false, navigate_target: None }
            }
            CommandAction::SetGear(gear) => {
                sm.set_gear(*gear);
                VoiceOutcome { action: Some(RobotAction::Idle), cancel_nav: false, navigate_target: None }
            }
            CommandAction::CancelNav => {
                VoiceOutcome { action: Some(RobotAction::Stop), cancel_nav: true, navigate_target: None }
            }
            CommandAction::Navigate { target_raw } => {
                VoiceOutcome { action: None, cancel_nav: false, navigate_target: Some(target_raw.clone()) }
            }
        }
    }
}
