//! Voice command vocabulary shared between the parser, fusion, and
//! supervisory loop.

use crate::action::{Gear, RobotAction};
use crate::ids::RobotId;

/// What a parsed transcript (or transcript fragment) resolves to.
///
/// `Navigate`/`CancelNav` stand apart from `Direct(RobotAction)` because the
/// loop routes them to the autopilot rather than through fusion.
#[derive(Clone, PartialEq, Debug)]
pub enum CommandAction {
    Direct(RobotAction),
    Navigate { target_raw: String },
    CancelNav,
    ShiftGear,
    SetGear(Gear),
}

/// Whether a `ParsedCommand` came from the direct-override keyword table or
/// from the higher-level automated (robot-id/zone extraction) template.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandOrigin {
    DirectOverride,
    Automated,
}

/// One parsed voice instruction, to be either dispatched standalone or
/// played back as a step of a `CommandSequence`.
#[derive(Clone, Debug)]
pub struct ParsedCommand {
    pub kind: CommandOrigin,
    pub action: CommandAction,
    pub robot_id: Option<RobotId>,
    pub target: Option<String>,
    pub item: Option<String>,
    pub raw_text: String,
    pub confidence: f32,
    pub timestamp: f64,
}

/// An ordered, non-empty list of `ParsedCommand` steps, dispatched one at a
/// time by the supervisory loop: navigation steps block subsequent steps
/// until autopilot arrival, other steps fire once and the cursor advances
/// immediately.
#[derive(Clone, Debug)]
pub struct CommandSequence {
    steps: Vec<ParsedCommand>,
    cursor: usize,
}

impl CommandSequence {
    /// `None` if `steps` is empty — a sequence is never allowed to be empty.
    pub fn new(steps: Vec<ParsedCommand>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps, cursor: 0 })
        }
    }

    #[inline]
    pub fn current(&self) -> Option<&ParsedCommand> {
        self.steps.get(self.cursor)
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advance to the next step. No-op once the sequence is already done.
    pub fn advance(&mut self) {
        if self.cursor < self.steps.len() {
            self.cursor += 1;
        }
    }
}
