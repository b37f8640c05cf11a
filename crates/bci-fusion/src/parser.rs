//! Transcript → `ParsedCommand` / `CommandSequence`.
//!
//! Matching order (first match wins): compound/pickup-deliver/
//! conjunction-split templates (steps 1–3), the landmark-navigation verb
//! table (step 4), then the direct-override and automated templates
//! (steps 5–6).

use once_cell::sync::Lazy;
use regex::Regex;

use bci_core::{CommandAction, CommandOrigin, CommandSequence, Gear, ParsedCommand, RobotAction, RobotId};
use bci_planner::WaypointTable;

static COMPOUND_TRANSPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:take|bring|carry|fetch|move|deliver|transport)\s+(?:the\s+)?(?:box\s+)?(?:from\s+)?(.+?)\s+to\s+(.+)$").unwrap()
});

static PICKUP_DELIVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^pick\s+up\s+(?:the\s+)?(?:box\s+)?(?:at|from|near)\s+(.+?)\s+(?:and\s+)?(?:bring|take|carry|deliver|move)\s+(?:it\s+)?to\s+(.+)$").unwrap()
});

static CONJUNCTION_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:and then|after that|afterwards|and|then)\b").unwrap());

static NAV_VERBS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:walk|go|navigate|move|head|drive|take me|bring me)\s+to\s+(.+)$").unwrap());

static ROBOT_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\br(?:obot\s*)?(\d+)\b").unwrap());
static ZONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bzone\s+([a-z]\d+)\b").unwrap());
static BOX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bbox\s+([a-z]?\d+)\b").unwrap());

/// Keyword -> direct-override action, in priority order (first match wins).
const DIRECT_COMMANDS: &[(&[&str], CommandActionTemplate)] = &[
    (&["emergency stop", "emergency"], CommandActionTemplate::Direct(RobotAction::EmergencyStop)),
    (&["cancel nav", "cancel navigation", "cancel"], CommandActionTemplate::CancelNav),
    (&["stop", "halt", "freeze"], CommandActionTemplate::Direct(RobotAction::Stop)),
    (&["move forward", "go forward", "walk forward", "ahead"], CommandActionTemplate::Direct(RobotAction::MoveForward)),
    (&["move back", "move backward", "go back", "backward", "reverse"], CommandActionTemplate::Direct(RobotAction::MoveBackward)),
    (&["turn left", "rotate left", "go left"], CommandActionTemplate::Direct(RobotAction::RotateLeft)),
    (&["turn right", "rotate right", "go right"], CommandActionTemplate::Direct(RobotAction::RotateRight)),
    (&["grab", "pick up", "grasp"], CommandActionTemplate::Direct(RobotAction::Grab)),
    (&["release", "drop", "let go", "put down"], CommandActionTemplate::Direct(RobotAction::Release)),
    (&["set gear forward", "gear forward"], CommandActionTemplate::SetGear(Gear::Forward)),
    (&["set gear reverse", "gear reverse"], CommandActionTemplate::SetGear(Gear::Reverse)),
    (&["set gear neutral", "gear neutral", "neutral gear"], CommandActionTemplate::SetGear(Gear::Neutral)),
    (&["shift gear", "change gear", "next gear", "shift"], CommandActionTemplate::ShiftGear),
];

#[derive(Copy, Clone)]
enum CommandActionTemplate {
    Direct(RobotAction),
    CancelNav,
    ShiftGear,
    SetGear(Gear),
}

impl CommandActionTemplate {
    fn into_action(self) -> CommandAction {
        match self {
            Self::Direct(a) => CommandAction::Direct(a),
            Self::CancelNav => CommandAction::CancelNav,
            Self::ShiftGear => CommandAction::ShiftGear,
            Self::SetGear(g) => CommandAction::SetGear(g),
        }
    }
}

/// Automated-template verb -> action, in priority order.
const AUTO_TEMPLATES: &[(&[&str], &str)] = &[
    (&["bring", "transport", "carry", "deliver"], "TRANSPORT"),
    (&["move to", "go to", "navigate to", "head to"], "NAVIGATE"),
    (&["pick up", "grab", "get"], "PICKUP"),
];

/// Parses voice transcripts into `ParsedCommand`s and multi-step sequences.
pub struct CommandParser {
    waypoints: WaypointTable,
}

impl CommandParser {
    pub fn new(waypoints: WaypointTable) -> Self {
        Self { waypoints }
    }

    /// Full matching order, producing a (possibly multi-step) sequence.
    /// Returns `None` if nothing in the transcript resolves to a command.
    pub fn parse_sequence(&self, transcript: &str, confidence: f32) -> Option<CommandSequence> {
        let text = transcript.trim();
        if text.is_empty() {
            return None;
        }
        let lower = text.to_lowercase();

        if let Some(steps) = self.match_compound_transport(&lower, transcript, confidence) {
            return CommandSequence::new(steps);
        }
        if let Some(steps) = self.match_pickup_deliver(&lower, transcript, confidence) {
            return CommandSequence::new(steps);
        }
        if let Some(steps) = self.match_conjunction_split(&lower, transcript, confidence) {
            return CommandSequence::new(steps);
        }

        self.parse(transcript, confidence).map(|cmd| CommandSequence::new(vec![cmd]).expect("single step is non-empty"))
    }

    /// Single-command matching: landmark navigation, direct override, then
    /// the automated robot-id/zone template.
    pub fn parse(&self, transcript: &str, confidence: f32) -> Option<ParsedCommand> {
        let text = transcript.trim();
        if text.is_empty() {
            return None;
        }
        let lower = text.to_lowercase();

        self.match_navigation_verb(&lower, transcript, confidence)
            .or_else(|| self.match_direct_override(&lower, transcript, confidence))
            .or_else(|| self.match_automated(&lower, transcript, confidence))
    }

    fn transport_sequence(&self, from_raw: &str, to_raw: &str, raw_text: &str, confidence: f32) -> Option<Vec<ParsedCommand>> {
        let (from_name, _) = self.waypoints.resolve(from_raw)?;
        let (to_name, _) = self.waypoints.resolve(to_raw)?;
        let now = now_secs();
        Some(vec![
            navigate_step(from_name, raw_text, confidence, now),
            direct_step(RobotAction::Grab, raw_text, confidence, now),
            navigate_step(to_name, raw_text, confidence, now),
            direct_step(RobotAction::Release, raw_text, confidence, now),
        ])
    }

    fn match_compound_transport(&self, lower: &str, raw_text: &str, confidence: f32) -> Option<Vec<ParsedCommand>> {
        let caps = COMPOUND_TRANSPORT.captures(lower)?;
        self.transport_sequence(caps.get(1)?.as_str(), caps.get(2)?.as_str(), raw_text, confidence)
    }

    fn match_pickup_deliver(&self, lower: &str, raw_text: &str, confidence: f32) -> Option<Vec<ParsedCommand>> {
        let caps = PICKUP_DELIVER.captures(lower)?;
        self.transport_sequence(caps.get(1)?.as_str(), caps.get(2)?.as_str(), raw_text, confidence)
    }

    fn match_conjunction_split(&self, lower: &str, raw_text: &str, confidence: f32) -> Option<Vec<ParsedCommand>> {
        if !CONJUNCTION_SPLIT.is_match(lower) {
            return None;
        }
        let steps: Vec<ParsedCommand> =
            CONJUNCTION_SPLIT.split(lower).filter_map(|fragment| self.parse(fragment.trim(), confidence)).collect();
        if steps.is_empty() {
            None
        } else {
            let _ = raw_text;
            Some(steps)
        }
    }

    fn match_navigation_verb(&self, lower: &str, raw_text: &str, confidence: f32) -> Option<ParsedCommand> {
        let caps = NAV_VERBS.captures(lower)?;
        let spoken = caps.get(1)?.as_str();
        let (canonical, _) = self.waypoints.resolve(spoken)?;
        Some(navigate_step(canonical, raw_text, confidence, now_secs()))
    }

    fn match_direct_override(&self, lower: &str, raw_text: &str, confidence: f32) -> Option<ParsedCommand> {
        for (keywords, template) in DIRECT_COMMANDS {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                return Some(ParsedCommand {
                    kind: CommandOrigin::DirectOverride,
                    action: template.into_action(),
                    robot_id: None,
                    target: None,
                    item: None,
                    raw_text: raw_text.to_string(),
                    confidence,
                    timestamp: now_secs(),
                });
            }
        }
        None
    }

    fn match_automated(&self, lower: &str, raw_text: &str, confidence: f32) -> Option<ParsedCommand> {
        let robot_id = ROBOT_ID_PATTERN.captures(lower).and_then(|c| c.get(1)).and_then(|m| m.as_str().parse::<u16>().ok()).map(RobotId);
        let zone = ZONE_PATTERN.captures(lower).and_then(|c| c.get(1)).map(|m| format!("zone_{}", m.as_str().to_uppercase()));
        let item = BOX_PATTERN.captures(lower).and_then(|c| c.get(1)).map(|m| format!("box_{}", m.as_str()));

        if robot_id.is_none() && zone.is_none() {
            return None;
        }

        let mut action_str = "NAVIGATE";
        for (keywords, act) in AUTO_TEMPLATES {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                action_str = act;
                break;
            }
        }
        if item.is_some() && zone.is_some() {
            action_str = "TRANSPORT";
        }

        let action = match action_str {
            "TRANSPORT" => CommandAction::Navigate { target_raw: zone.clone().unwrap_or_default() },
            "NAVIGATE" => CommandAction::Navigate { target_raw: zone.clone().unwrap_or_default() },
            "PICKUP" => CommandAction::Direct(RobotAction::Grab),
            _ => CommandAction::Direct(RobotAction::Stop),
        };

        Some(ParsedCommand {
            kind: CommandOrigin::Automated,
            action,
            robot_id,
            target: zone,
            item,
            raw_text: raw_text.to_string(),
            confidence,
            timestamp: now_secs(),
        })
    }
}

fn navigate_step(target_raw: String, raw_text: &str, confidence: f32, timestamp: f64) -> ParsedCommand {
    ParsedCommand {
        kind: CommandOrigin::Automated,
        action: CommandAction::Navigate { target_raw: target_raw.clone() },
        robot_id: None,
        target: Some(target_raw),
        item: None,
        raw_text: raw_text.to_string(),
        confidence,
        timestamp,
    }
}

fn direct_step(action: RobotAction, raw_text: &str, confidence: f32, timestamp: f64) -> ParsedCommand {
    ParsedCommand {
        kind: CommandOrigin::DirectOverride,
        action: CommandAction::Direct(action),
        robot_id: None,
        target: None,
        item: None,
        raw_text: raw_text.to_string(),
        confidence,
        timestamp,
    }
}

fn now_secs() -> f64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or(0.0)
}
