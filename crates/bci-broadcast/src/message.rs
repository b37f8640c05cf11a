//! Tagged subscriber-protocol messages: one variant per wire message,
//! replacing an untyped dict broadcast.

use bci_autopilot::NavStatus;
use bci_core::{BrainClass, ControlClock, Gear, RobotAction, RobotId};
use bci_loop::{ActionQueueStatus, ActionSource, LogSource, TickReport};
use bci_robot::{OrchestrationSubState, RobotSnapshot};

/// A single outbound message to subscriber transports.
///
/// `#[non_exhaustive]`: new telemetry (e.g. a raw EEG feed once one exists)
/// should be additive for downstream matches.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Message {
    StateUpdate(StateUpdate),
    NavUpdate { robot: RobotId, status: NavStatus },
    EegData { channels: Vec<Vec<f32>>, sample_rate: u32, timestamp: f64 },
    CommandLog { source: LogKind, action: String, text: Option<String>, timestamp: f64 },
    CancelConfirmPrompt { description: String, timestamp: f64 },
    CancelConfirmed { timestamp: f64 },
    CancelConfirmDismiss { timestamp: f64 },
    TtsRequest { text: String, event_type: &'static str, audio_base64: Option<String> },
}

/// `command_log`'s `source` field, a four-way domain.
/// `bci_loop::LogSource` only distinguishes `Voice`/`Brain`/`System` — brain
/// gestures synthesized from the manual-control inbound path have no
/// separate wire category, so `Manual` exists here for forward
/// compatibility but is never produced by the current `TickReport`
/// conversion.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LogKind {
    Voice,
    Manual,
    Brain,
    System,
}

impl From<LogSource> for LogKind {
    fn from(source: LogSource) -> Self {
        match source {
            LogSource::Voice => LogKind::Voice,
            LogSource::Brain => LogKind::Brain,
            LogSource::System => LogKind::System,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StateUpdate {
    pub gear: Gear,
    pub action: RobotAction,
    pub action_source: ActionSource,
    pub brain_class: Option<BrainClass>,
    /// Classifier confidence for `brain_class`. `bci_loop::BrainSource`
    /// classifies to a discrete `BrainClass` with no confidence scalar, so
    /// this is always `None`; gating is already represented by
    /// `brain_class` being `None` on a gated tick.
    pub brain_confidence: Option<f32>,
    pub brain_gated: bool,
    pub holding_item: bool,
    pub robot_state: Option<RobotSnapshot>,
    pub latency_ms: f32,
    pub timestamp: f64,
    pub toggled_action: Option<RobotAction>,
    pub selected_robot: RobotId,
    pub robots: Vec<RobotSnapshot>,
    pub orchestration: OrchestrationSubState,
    pub action_queue: Option<ActionQueueStatus>,
}

/// Translate one tick's [`TickReport`] into the outbound messages it
/// produces, pairing a state broadcast with a command-log entry and a
/// speech request at the same event. `clock` supplies the tick -> Unix-time
/// conversion.
pub fn messages_for_tick(report: &TickReport, clock: &ControlClock) -> Vec<Message> {
    let timestamp = clock.unix_time(report.snapshot.tick);
    let mut out = Vec::with_capacity(1 + report.command_logs.len() + report.speak_requests.len());

    out.push(Message::StateUpdate(state_update(report, timestamp)));

    if let Some(status) = &report.snapshot.nav_status {
        out.push(Message::NavUpdate { robot: report.snapshot.selected_robot, status: status.clone() });
    }

    for entry in &report.command_logs {
        out.push(Message::CommandLog {
            source: entry.source.into(),
            action: entry.action.clone(),
            text: entry.text.clone(),
            timestamp: clock.unix_time(entry.tick),
        });
    }

    if let Some(description) = &report.cancel_confirm_prompt {
        out.push(Message::CancelConfirmPrompt { description: description.clone(), timestamp });
    }
    if report.cancel_confirmed {
        out.push(Message::CancelConfirmed { timestamp });
    }
    if report.cancel_confirm_dismissed {
        out.push(Message::CancelConfirmDismiss { timestamp });
    }

    for speak in &report.speak_requests {
        out.push(Message::TtsRequest {
            text: speak.text.clone(),
            event_type: speak.event_type,
            audio_base64: None,
        });
    }

    out
}

fn state_update(report: &TickReport, timestamp: f64) -> StateUpdate {
    let snapshot = &report.snapshot;
    let robot_state = snapshot.robots.iter().find(|r| r.selected).cloned();
    StateUpdate {
        gear: snapshot.gear,
        action: snapshot.action,
        action_source: snapshot.action_source,
        brain_class: snapshot.brain_class,
        brain_confidence: None,
        brain_gated: snapshot.brain_class.is_none(),
        holding_item: snapshot.holding_item,
        robot_state,
        latency_ms: snapshot.latency_ms,
        timestamp,
        toggled_action: snapshot.toggled_action,
        selected_robot: snapshot.selected_robot,
        robots: snapshot.robots.clone(),
        orchestration: snapshot.orchestration,
        action_queue: snapshot.action_queue.clone(),
    }
}
