//! `GearStateMachine` — maps a completed gesture (plus voice-induced gear
//! shifts) to a toggleable robot action, with an orchestration sub-mode for
//! structured task composition.

use bci_core::{BrainClass, Gear, GestureEvent, GestureKind, RobotAction};

use crate::orchestration::{OrchestrationEvent, OrchestrationSubState, OrchestrationTask};

/// Result of applying one gesture (or voice shift) to the state machine.
#[derive(Copy, Clone, Debug, Default)]
pub struct GearOutcome {
    pub action: RobotAction,
    pub toggle_changed: bool,
    pub orchestration_event: Option<OrchestrationEvent>,
    pub orchestration_task: Option<OrchestrationTask>,
}

/// Per-robot gear, toggle, and orchestration state. Exclusively owned by
/// its robot — never shared.
#[derive(Clone, Debug)]
pub struct GearStateMachine {
    pub gear: Gear,
    pub holding_item: bool,
    pub toggled_action: Option<RobotAction>,
    pub toggled_class: Option<BrainClass>,
    pub orchestration: OrchestrationSubState,
}

impl Default for GearStateMachine {
    fn default() -> Self {
        Self {
            gear: Gear::Neutral,
            holding_item: false,
            toggled_action: None,
            toggled_class: None,
            orchestration: OrchestrationSubState::default(),
        }
    }
}

impl GearStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear gesture-derived state: gear returns to neutral, toggle and
    /// orchestration sub-state are both cleared. `holding_item` is left
    /// untouched — it is authoritative state owned by the actuator, not the
    /// gesture layer.
    pub fn reset(&mut self) {
        self.gear = Gear::Neutral;
        self.toggled_action = None;
        self.toggled_class = None;
        self.orchestration.reset();
    }

    /// Voice-driven `SHIFT_GEAR`: cycle exactly as a TongueTap quick-clench
    /// would.
    pub fn shift_gear(&mut self) {
        self.cycle_gear();
    }

    /// Voice-driven `SET_GEAR {gear}`: jump directly to a gear.
    pub fn set_gear(&mut self, gear: Gear) {
        if gear != self.gear {
            self.gear = gear;
            self.orchestration.reset();
        }
    }

    fn cycle_gear(&mut self) {
        self.gear = self.gear.cycled();
        self.orchestration.reset();
    }

    /// Base action a brain class resolves to outside orchestration mode.
    fn base_action(&self, class: BrainClass) -> Option<RobotAction> {
        match class {
            BrainClass::LeftFist => Some(RobotAction::RotateLeft),
            BrainClass::RightFist => Some(RobotAction::RotateRight),
            BrainClass::BothFists => Some(match self.gear {
                Gear::Forward => RobotAction::MoveForward,
                Gear::Reverse => RobotAction::MoveBackward,
                Gear::Neutral => {
                    if self.holding_item {
                        RobotAction::Release
                    } else {
                        RobotAction::Grab
                    }
                }
                Gear::Orchestrate => return None,
            }),
            BrainClass::TongueTap | BrainClass::Relax => None,
            _ => unreachable!("BrainClass is a fixed, fully-enumerated classification domain"),
        }
    }

    /// Apply one completed gesture. `waypoint_count` bounds the
    /// orchestration landmark cycle.
    pub fn apply_gesture(&mut self, event: GestureEvent, waypoint_count: usize) -> GearOutcome {
        // SELECT_SEQUENCE changes robot selection, not gear state; pass
        // through untouched regardless of current gear.
        if event.kind == GestureKind::SelectSequence {
            return GearOutcome::default();
        }

        if event.brain_class == BrainClass::TongueTap {
            if event.kind == GestureKind::QuickClench {
                self.cycle_gear();
            }
            return GearOutcome::default();
        }

        if self.gear == Gear::Orchestrate {
            return self.apply_orchestration_gesture(event, waypoint_count);
        }

        let Some(base) = self.base_action(event.brain_class) else {
            return GearOutcome::default();
        };

        if event.kind != GestureKind::QuickClench {
            // Non-toggling holds/double-clenches still surface as a
            // one-shot brain_gesture action; the toggle latch is untouched.
            return GearOutcome { action: base, ..GearOutcome::default() };
        }

        if self.toggled_action == Some(base) && self.toggled_class == Some(event.brain_class) {
            self.toggled_action = None;
            self.toggled_class = None;
            GearOutcome { action: RobotAction::Idle, toggle_changed: true, ..GearOutcome::default() }
        } else {
            self.toggled_action = Some(base);
            self.toggled_class = Some(event.brain_class);
            GearOutcome { action: base, toggle_changed: true, ..GearOutcome::default() }
        }
    }

    fn apply_orchestration_gesture(&mut self, event: GestureEvent, waypoint_count: usize) -> GearOutcome {
        use BrainClass::*;
        use GestureKind::*;

        match (event.kind, event.brain_class) {
            (QuickClench, RightFist) => {
                self.orchestration.cycle_right(waypoint_count);
                GearOutcome::default()
            }
            (QuickClench, LeftFist) => {
                self.orchestration.cycle_left(waypoint_count);
                GearOutcome::default()
            }
            (HoldMedium, BothFists) => {
                let task = self.orchestration.confirm();
                GearOutcome { orchestration_task: task, ..GearOutcome::default() }
            }
            (DoubleClench, BothFists) => {
                let ev = self.orchestration.step_back();
                GearOutcome { orchestration_event: ev, ..GearOutcome::default() }
            }
            _ => GearOutcome::default(),
        }
    }
}
