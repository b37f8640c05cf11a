//! Commands injected into the loop from outside the tick (operator UI,
//! test harness, or a transport layer out of this crate's scope).

use bci_core::{BrainClass, Gear, RobotAction, RobotId};

/// Manual controls. BCI-mapped entries synthesize the same gesture a real
/// clench would, so manual and brain input share one code path through
/// `GearStateMachine`; everything else executes directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ManualCommand {
    RotateLeftBci,
    RotateRightBci,
    BothFistsBci,
    ShiftGearBci,
    OrchConfirm,
    OrchCancel,
    StopOrRelax,
    Direct(RobotAction),
}

/// External commands consumed by [`crate::supervisory::SupervisoryLoop::handle_inbound`].
#[derive(Clone, Debug)]
pub enum InboundCommand {
    VoiceTranscript { transcript: String, confidence: f32 },
    Manual(ManualCommand),
    Reset,
    FullReset,
    ToggleBrain(bool),
    ToggleVoice(bool),
    ToggleTestMode(bool),
    SetGear(Gear),
    SimulateBrain(Option<BrainClass>),
    StartNav { target: String, robot: Option<RobotId> },
    CancelNav { robot: Option<RobotId> },
}
