use bci_core::ControlConfig;

/// Fusion-specific timing, in ticks, derived from `ControlConfig`.
#[derive(Copy, Clone, Debug)]
pub struct FusionThresholds {
    pub voice_override_hold_ticks: u64,
}

impl FusionThresholds {
    pub fn from_config(cfg: &ControlConfig) -> Self {
        let tick_duration = cfg.tick_duration_secs();
        Self { voice_override_hold_ticks: (cfg.voice_override_hold_s / tick_duration).ceil() as u64 }
    }
}
