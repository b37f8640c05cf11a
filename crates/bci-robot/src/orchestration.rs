//! Orchestration sub-state: composing a `(action, landmark)` task by
//! cycling two indices and confirming with a BothFists hold.

/// The fixed list of tasks selectable in orchestration gear.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrchestrationAction {
    MoveTo,
    CarryTo,
    StackTo,
    SelectRobot,
    Backflip,
}

impl OrchestrationAction {
    pub const ALL: [OrchestrationAction; 5] = [
        OrchestrationAction::MoveTo,
        OrchestrationAction::CarryTo,
        OrchestrationAction::StackTo,
        OrchestrationAction::SelectRobot,
        OrchestrationAction::Backflip,
    ];

    /// `true` for tasks that need sequential per-robot dispatch rather than
    /// firing on the whole active set at once.
    #[inline]
    pub fn is_logistics(self) -> bool {
        matches!(self, OrchestrationAction::CarryTo | OrchestrationAction::StackTo)
    }
}

/// Which half of a `(action, landmark)` selection is currently being cycled.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrchestrationPhase {
    #[default]
    SelectingAction,
    SelectingLandmark,
}

/// Result of feeding a gesture into the orchestration sub-state this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OrchestrationEvent {
    /// DOUBLE_CLENCH with nothing left to step back from.
    Cancel,
}

/// A fully confirmed task dispatched to the robot manager.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct OrchestrationTask {
    pub action: OrchestrationAction,
    pub landmark_index: usize,
}

/// `{phase, action_index, landmark_index}` over the fixed action list and
/// the ordered waypoint list, cycled by QUICK_CLENCH Left/Right and
/// confirmed by HOLD_MEDIUM BothFists.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrchestrationSubState {
    pub phase: OrchestrationPhase,
    pub action_index: usize,
    pub landmark_index: usize,
}

impl OrchestrationSubState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Cycle the index of the current phase by `delta` (+1 for RightFist,
    /// -1 for LeftFist quick-clenches), wrapping within `modulus`.
    fn cycle(index: &mut usize, delta: i32, modulus: usize) {
        let m = modulus as i32;
        let cur = *index as i32;
        *index = (((cur + delta) % m + m) % m) as usize;
    }

    pub fn cycle_right(&mut self, waypoint_count: usize) {
        match self.phase {
            OrchestrationPhase::SelectingAction => {
                Self::cycle(&mut self.action_index, 1, OrchestrationAction::ALL.len())
            }
            OrchestrationPhase::SelectingLandmark => {
                Self::cycle(&mut self.landmark_index, 1, waypoint_count.max(1))
            }
        }
    }

    pub fn cycle_left(&mut self, waypoint_count: usize) {
        match self.phase {
            OrchestrationPhase::SelectingAction => {
                Self::cycle(&mut self.action_index, -1, OrchestrationAction::ALL.len())
            }
            OrchestrationPhase::SelectingLandmark => {
                Self::cycle(&mut self.landmark_index, -1, waypoint_count.max(1))
            }
        }
    }

    pub fn current_action(&self) -> OrchestrationAction {
        OrchestrationAction::ALL[self.action_index]
    }

    /// HOLD_MEDIUM BothFists: advance `SelectingAction` -> `SelectingLandmark`,
    /// or dispatch and reset from `SelectingLandmark`.
    pub fn confirm(&mut self) -> Option<OrchestrationTask> {
        match self.phase {
            OrchestrationPhase::SelectingAction => {
                self.phase = OrchestrationPhase::SelectingLandmark;
                None
            }
            OrchestrationPhase::SelectingLandmark => {
                let task = OrchestrationTask {
                    action: self.current_action(),
                    landmark_index: self.landmark_index,
                };
                self.reset();
                Some(task)
            }
        }
    }

    /// DOUBLE_CLENCH BothFists: step back one phase, or cancel if there is
    /// no active selection to step back from.
    pub fn step_back(&mut self) -> Option<OrchestrationEvent> {
        match self.phase {
            OrchestrationPhase::SelectingLandmark => {
                self.phase = OrchestrationPhase::SelectingAction;
                None
            }
            OrchestrationPhase::SelectingAction => {
                self.reset();
                Some(OrchestrationEvent::Cancel)
            }
        }
    }
}
