//! Converts a per-tick brain-class stream into discrete `GestureEvent`s.
//!
//! Sits between the classifier and `GearStateMachine`: consumes the stable
//! per-tick class (or `None`) and emits an event only on a completing edge.

use bci_core::{BrainClass, GestureEvent, GestureKind, SelectDirection, Tick};

use crate::thresholds::GestureThresholds;

#[derive(Copy, Clone, Debug)]
enum RecogState {
    Idle,
    Holding { class: BrainClass, start: Tick },
    AwaitingSelect { start: Tick },
    AwaitingReclench { start: Tick, direction: SelectDirection },
}

/// Pure state machine; the wall clock is supplied by the caller as `Tick`.
pub struct GestureRecognizer {
    state: RecogState,
    last_quick: Option<(BrainClass, Tick)>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self { state: RecogState::Idle, last_quick: None }
    }

    pub fn reset(&mut self) {
        self.state = RecogState::Idle;
        self.last_quick = None;
    }

    /// Called once per tick. Returns `Some(event)` only on a completing edge.
    pub fn update(&mut self, brain_class: Option<BrainClass>, now: Tick, th: &GestureThresholds) -> Option<GestureEvent> {
        match self.state {
            RecogState::Idle => self.handle_idle(brain_class, now),
            RecogState::Holding { class, start } => self.handle_holding(class, start, brain_class, now, th),
            RecogState::AwaitingSelect { start } => self.handle_awaiting_select(start, brain_class, now, th),
            RecogState::AwaitingReclench { start, direction } => {
                self.handle_awaiting_reclench(start, direction, brain_class, now, th)
            }
        }
    }

    fn handle_idle(&mut self, brain_class: Option<BrainClass>, now: Tick) -> Option<GestureEvent> {
        if let Some(class) = brain_class.filter(|c| c.is_active()) {
            self.state = RecogState::Holding { class, start: now };
        }
        None
    }

    fn handle_holding(
        &mut self,
        held_class: BrainClass,
        start: Tick,
        brain_class: Option<BrainClass>,
        now: Tick,
        th: &GestureThresholds,
    ) -> Option<GestureEvent> {
        if brain_class == Some(held_class) {
            return None;
        }

        let duration_ticks = now.since(start);

        if let Some(new_class) = brain_class.filter(|c| c.is_active()) {
            // Switched to a different active class mid-hold: the previous
            // hold is released, and a new hold begins immediately.
            self.state = RecogState::Holding { class: new_class, start: now };

            if duration_ticks < th.quick_clench_max {
                return Some(self.quick_or_double(held_class, duration_ticks, now, th));
            }
            if duration_ticks < th.long_hold_threshold {
                return Some(self.emit(GestureKind::HoldMedium, held_class, duration_ticks, th, None));
            }
            if held_class == BrainClass::BothFists {
                if let Some(direction) = left_right_direction(new_class) {
                    self.state = RecogState::AwaitingReclench { start: now, direction };
                    return None;
                }
            }
            return Some(self.emit(GestureKind::HoldLong, held_class, duration_ticks, th, None));
        }

        // Released to an inactive class (Relax or none).
        self.state = RecogState::Idle;

        if duration_ticks < th.quick_clench_max {
            return Some(self.quick_or_double(held_class, duration_ticks, now, th));
        }
        if duration_ticks < th.long_hold_threshold {
            return Some(self.emit(GestureKind::HoldMedium, held_class, duration_ticks, th, None));
        }
        if held_class == BrainClass::BothFists {
            self.state = RecogState::AwaitingSelect { start: now };
            return None;
        }
        Some(self.emit(GestureKind::HoldLong, held_class, duration_ticks, th, None))
    }

    fn handle_awaiting_select(
        &mut self,
        start: Tick,
        brain_class: Option<BrainClass>,
        now: Tick,
        th: &GestureThresholds,
    ) -> Option<GestureEvent> {
        if now.since(start) > th.select_window {
            return Some(self.timeout_to_hold_long(brain_class, now, th));
        }

        if let Some(direction) = brain_class.and_then(left_right_direction) {
            self.state = RecogState::AwaitingReclench { start: now, direction };
        }
        None
    }

    fn handle_awaiting_reclench(
        &mut self,
        start: Tick,
        direction: SelectDirection,
        brain_class: Option<BrainClass>,
        now: Tick,
        th: &GestureThresholds,
    ) -> Option<GestureEvent> {
        if now.since(start) > th.reclench_window {
            return Some(self.timeout_to_hold_long(brain_class, now, th));
        }

        if brain_class == Some(BrainClass::BothFists) {
            self.state = RecogState::Holding { class: BrainClass::BothFists, start: now };
            return Some(self.emit(
                GestureKind::SelectSequence,
                BrainClass::BothFists,
                th.long_hold_threshold,
                th,
                Some(direction),
            ));
        }

        None
    }

    fn timeout_to_hold_long(&mut self, brain_class: Option<BrainClass>, now: Tick, th: &GestureThresholds) -> GestureEvent {
        self.state = RecogState::Idle;
        if let Some(class) = brain_class.filter(|c| c.is_active()) {
            self.state = RecogState::Holding { class, start: now };
        }
        self.emit(GestureKind::HoldLong, BrainClass::BothFists, th.long_hold_threshold, th, None)
    }

    fn quick_or_double(&mut self, class: BrainClass, duration_ticks: u64, now: Tick, th: &GestureThresholds) -> GestureEvent {
        if let Some((last_class, last_time)) = self.last_quick {
            if last_class == class && now.since(last_time) < th.double_clench_window {
                self.last_quick = None;
                return self.emit(GestureKind::DoubleClench, class, duration_ticks, th, None);
            }
        }
        self.last_quick = Some((class, now));
        self.emit(GestureKind::QuickClench, class, duration_ticks, th, None)
    }

    fn emit(
        &self,
        kind: GestureKind,
        class: BrainClass,
        duration_ticks: u64,
        th: &GestureThresholds,
        direction: Option<SelectDirection>,
    ) -> GestureEvent {
        let duration_s = duration_ticks as f32 * th.tick_duration_secs;
        let event = GestureEvent::new(kind, class, duration_s);
        match direction {
            Some(d) => event.with_select_direction(d),
            None => event,
        }
    }
}

fn left_right_direction(class: BrainClass) -> Option<SelectDirection> {
    match class {
        BrainClass::LeftFist => Some(SelectDirection::Left),
        BrainClass::RightFist => Some(SelectDirection::Right),
        _ => None,
    }
}
