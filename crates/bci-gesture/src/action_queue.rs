//! Multi-step voice command playback: `NAVIGATE` steps are arrival-gated,
//! everything else executes immediately and advances the same tick.

use bci_core::{CommandAction, CommandSequence, ParsedCommand};

/// Drives a `CommandSequence` to completion one step at a time.
#[derive(Default)]
pub struct ActionQueue {
    sequence: Option<CommandSequence>,
    label: String,
    waiting_for_arrival: bool,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any in-flight sequence with a new one.
    pub fn load(&mut self, sequence: CommandSequence, label: impl Into<String>) {
        self.sequence = Some(sequence);
        self.label = label.into();
        self.waiting_for_arrival = false;
    }

    pub fn clear(&mut self) {
        self.sequence = None;
        self.label.clear();
        self.waiting_for_arrival = false;
    }

    pub fn is_active(&self) -> bool {
        self.sequence.as_ref().is_some_and(|s| !s.is_done())
    }

    pub fn waiting_for_arrival(&self) -> bool {
        self.waiting_for_arrival
    }

    pub fn set_waiting_for_arrival(&mut self, waiting: bool) {
        self.waiting_for_arrival = waiting;
    }

    pub fn current(&self) -> Option<&ParsedCommand> {
        self.sequence.as_ref().and_then(CommandSequence::current)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total(&self) -> usize {
        self.sequence.as_ref().map_or(0, CommandSequence::len)
    }

    /// 1-based index of the step about to run, or `total() + 1` once done.
    pub fn step_number(&self) -> usize {
        self.sequence.as_ref().map_or(0, |s| s.cursor() + 1)
    }

    /// Advance past the current step. Clears the arrival-wait flag and, if
    /// the sequence is now exhausted, clears the whole queue (matching
    /// `_advance_action_queue`'s empty-queue reset).
    pub fn advance(&mut self) {
        self.waiting_for_arrival = false;
        if let Some(seq) = self.sequence.as_mut() {
            seq.advance();
            if seq.is_done() {
                self.clear();
            }
        }
    }

    /// `true` iff the current step is a `NAVIGATE` (arrival-gated rather
    /// than immediately advanced).
    pub fn current_is_navigate(&self) -> bool {
        matches!(self.current().map(|c| &c.action), Some(CommandAction::Navigate { .. }))
    }
}
