//! Control loop time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter, one per
//! 100 ms supervisory-loop iteration at the default `CONTROL_HZ = 10`.  The
//! mapping to wall-clock time is held in `ControlClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! Using an integer tick as the canonical time unit means gesture-timing
//! comparisons (quick-clench/hold/double-clench windows) are exact — no
//! floating point drift accumulates over a long-running session.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute supervisory-loop tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── ControlClock ──────────────────────────────────────────────────────────────

/// Converts between tick counts and seconds, and advances the current tick.
///
/// `ControlClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many real seconds one tick represents. Default: 0.1 (10 Hz).
    pub tick_duration_secs: f32,
    /// The current tick — advanced by `ControlClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl ControlClock {
    /// Create a clock starting at `start_unix_secs` running at `control_hz`.
    pub fn new(start_unix_secs: i64, control_hz: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs: 1.0 / control_hz as f32,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.current_tick.0 as f32 * self.tick_duration_secs
    }

    /// How many ticks span `secs` seconds (rounds up — a window never closes early).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.tick_duration_secs).ceil() as u64
    }

    /// Wall-clock Unix timestamp (seconds) of `tick`.
    #[inline]
    pub fn unix_time(&self, tick: Tick) -> f64 {
        self.start_unix_secs as f64 + tick.0 as f64 * self.tick_duration_secs as f64
    }
}

impl fmt::Display for ControlClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s elapsed)", self.current_tick, self.elapsed_secs())
    }
}

// ── ControlConfig ───────────────────────────────────────────────────────────

/// Top-level supervisory-loop configuration.
///
/// Owns every scalar tunable named in the system's Configuration section:
/// control rate, voice/cancel-confirm timeouts, gesture timing thresholds,
/// waypoint arrival/align thresholds, planner resolution and robot radius,
/// and dead-reckoning deltas. The factory floor's obstacle rectangles and
/// named-waypoint/alias table are scene data, not tunables — they live in
/// `bci_planner::factory_obstacles()` and `bci_planner::factory_waypoint_table()`
/// and are constructed independently of this struct.
#[derive(Clone, Debug)]
pub struct ControlConfig {
    /// Supervisory loop rate in Hz. Default: 10.
    pub control_hz: u32,
    /// How long a voice-mapped action is re-emitted after arrival, in seconds.
    pub voice_override_hold_s: f32,
    /// Window in which a second double-clench confirms a pending cancel, in seconds.
    pub cancel_confirm_timeout_s: f32,

    /// Gesture timing thresholds, all in seconds. `quick_clench_max_s` is
    /// both the quick-clench ceiling and the floor of `HOLD_MEDIUM`.
    pub quick_clench_max_s: f32,
    pub long_hold_threshold_s: f32,
    pub double_clench_window_s: f32,
    pub select_window_s: f32,
    pub reclench_window_s: f32,

    /// Autopilot arrival distance, meters.
    pub waypoint_arrival_dist: f32,
    /// Autopilot heading-alignment threshold, radians.
    pub waypoint_align_threshold: f32,

    /// Occupancy grid cell size, meters.
    pub planner_resolution: f32,
    /// Obstacle inflation radius, meters.
    pub robot_radius: f32,

    /// Dead-reckoning per-tick linear step, meters.
    pub dead_reckoning_linear_delta: f32,
    /// Dead-reckoning per-tick angular step, radians.
    pub dead_reckoning_angular_delta: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            control_hz: 10,
            voice_override_hold_s: 2.0,
            cancel_confirm_timeout_s: 5.0,
            quick_clench_max_s: 1.5,
            long_hold_threshold_s: 4.0,
            double_clench_window_s: 1.0,
            select_window_s: 3.0,
            reclench_window_s: 3.0,
            waypoint_arrival_dist: 0.5,
            waypoint_align_threshold: 0.3,
            planner_resolution: 0.25,
            robot_radius: 0.3,
            dead_reckoning_linear_delta: 0.06,
            dead_reckoning_angular_delta: 0.06,
        }
    }
}

impl ControlConfig {
    /// Construct a `ControlClock` pre-configured for this run.
    pub fn make_clock(&self, start_unix_secs: i64) -> ControlClock {
        ControlClock::new(start_unix_secs, self.control_hz)
    }

    /// Seconds represented by one tick at `control_hz`.
    #[inline]
    pub fn tick_duration_secs(&self) -> f32 {
        1.0 / self.control_hz as f32
    }
}
