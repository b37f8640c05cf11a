//! Robot actuator actions and drivetrain gear.

/// A discrete actuator command a robot can be driving toward this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotAction {
    #[default]
    Idle,
    RotateLeft,
    RotateRight,
    MoveForward,
    MoveBackward,
    Grab,
    Release,
    Hold,
    Stop,
    EmergencyStop,
    Backflip,
}

impl RobotAction {
    /// `true` for actions the toggle protocol may latch and the fusion
    /// sustain rule re-emits every tick absent new input. Fire-once actions
    /// (grab/release/backflip/e-stop) are excluded — they act once and the
    /// state machine returns to idle next tick.
    #[inline]
    pub fn is_sustainable(self) -> bool {
        matches!(
            self,
            RobotAction::RotateLeft
                | RobotAction::RotateRight
                | RobotAction::MoveForward
                | RobotAction::MoveBackward
                | RobotAction::Stop
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RobotAction::Idle => "IDLE",
            RobotAction::RotateLeft => "ROTATE_LEFT",
            RobotAction::RotateRight => "ROTATE_RIGHT",
            RobotAction::MoveForward => "MOVE_FORWARD",
            RobotAction::MoveBackward => "MOVE_BACKWARD",
            RobotAction::Grab => "GRAB",
            RobotAction::Release => "RELEASE",
            RobotAction::Hold => "HOLD",
            RobotAction::Stop => "STOP",
            RobotAction::EmergencyStop => "EMERGENCY_STOP",
            RobotAction::Backflip => "BACKFLIP",
        }
    }
}

impl std::fmt::Display for RobotAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The robot's drivetrain gear — selects how a BothFists clench resolves
/// and whether orchestration mode is active.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gear {
    #[default]
    Neutral,
    Forward,
    Reverse,
    Orchestrate,
}

impl Gear {
    /// Cycle to the next gear in the fixed Neutral -> Forward -> Reverse ->
    /// Orchestrate -> Neutral ring, as driven by a TongueTap quick-clench.
    #[must_use]
    pub fn cycled(self) -> Gear {
        match self {
            Gear::Neutral => Gear::Forward,
            Gear::Forward => Gear::Reverse,
            Gear::Reverse => Gear::Orchestrate,
            Gear::Orchestrate => Gear::Neutral,
        }
    }
}
