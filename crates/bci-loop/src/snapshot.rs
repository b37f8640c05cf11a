//! Per-tick broadcast payloads. `bci-loop` stays transport-agnostic: it
//! hands these back from `tick()`; the embedding layer (out of scope here)
//! turns them into `bci_broadcast::Message`s.

use bci_core::{BrainClass, Gear, RobotAction, RobotId, Tick};
use bci_autopilot::NavStatus;
use bci_robot::{OrchestrationSubState, RobotSnapshot};

/// Which tier produced this tick's actuated action.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ActionSource {
    Voice,
    VoiceHold,
    BrainGesture,
    BrainToggle,
    Idle,
    Autopilot,
}

impl ActionSource {
    /// `true` for sources that belong in the command log (fusion events
    /// only — autopilot and idle ticks are not logged).
    pub fn is_loggable(self) -> bool {
        matches!(self, Self::Voice | Self::BrainGesture | Self::BrainToggle)
    }
}

#[derive(Clone, Debug)]
pub struct ActionQueueStatus {
    pub label: String,
    pub remaining: usize,
    pub total: usize,
    pub step: usize,
}

#[derive(Clone, Debug)]
pub struct LoopSnapshot {
    pub tick: Tick,
    pub selected_robot: RobotId,
    pub gear: Gear,
    pub action: RobotAction,
    pub action_source: ActionSource,
    pub brain_class: Option<BrainClass>,
    pub holding_item: bool,
    pub toggled_action: Option<RobotAction>,
    pub orchestration: OrchestrationSubState,
    pub robots: Vec<RobotSnapshot>,
    pub nav_status: Option<NavStatus>,
    pub action_queue: Option<ActionQueueStatus>,
    pub latency_ms: f32,
}

/// Command-log source.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LogSource {
    Voice,
    Brain,
    System,
}

#[derive(Clone, Debug)]
pub struct CommandLogEntry {
    pub source: LogSource,
    pub action: String,
    pub text: Option<String>,
    pub tick: Tick,
}

/// A request to speak a line of feedback. Synthesis itself is out of
/// scope; the embedding layer decides how (or whether) to render it.
#[derive(Clone, Debug)]
pub struct SpeakRequest {
    pub text: String,
    pub event_type: &'static str,
    pub tick: Tick,
}

/// Everything one call to `SupervisoryLoop::tick` produced.
#[derive(Clone, Debug)]
pub struct TickReport {
    pub snapshot: LoopSnapshot,
    pub command_logs: Vec<CommandLogEntry>,
    pub speak_requests: Vec<SpeakRequest>,
    pub cancel_confirm_prompt: Option<String>,
    pub cancel_confirmed: bool,
    pub cancel_confirm_dismissed: bool,
}
