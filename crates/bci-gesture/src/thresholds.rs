//! Gesture timing thresholds expressed in ticks, so comparisons never drift.

use bci_core::ControlConfig;

/// Pre-converted tick counts for every timing window the recognizer checks,
/// plus the tick duration needed to report `duration_s` on emitted events.
#[derive(Copy, Clone, Debug)]
pub struct GestureThresholds {
    pub quick_clench_max: u64,
    pub long_hold_threshold: u64,
    pub double_clench_window: u64,
    pub select_window: u64,
    pub reclench_window: u64,
    pub tick_duration_secs: f32,
}

impl GestureThresholds {
    pub fn from_config(cfg: &ControlConfig) -> Self {
        let tick_duration_secs = cfg.tick_duration_secs();
        let ticks_for = |secs: f32| (secs / tick_duration_secs).ceil() as u64;
        Self {
            quick_clench_max: ticks_for(cfg.quick_clench_max_s),
            long_hold_threshold: ticks_for(cfg.long_hold_threshold_s),
            double_clench_window: ticks_for(cfg.double_clench_window_s),
            select_window: ticks_for(cfg.select_window_s),
            reclench_window: ticks_for(cfg.reclench_window_s),
            tick_duration_secs,
        }
    }
}
