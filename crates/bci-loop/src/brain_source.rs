//! Thin seam for the EEG source + neural classifier, both out of scope for
//! this crate. Anything producing a stable per-tick `BrainClass` — a
//! classifier wired to live hardware, a replay file, a test harness — can
//! implement this trait and be handed to the loop.

use bci_core::BrainClass;

pub trait BrainSource: Send + Sync {
    /// Sample this tick's stable classification, or `None` if no class
    /// cleared the confidence gate.
    fn sample(&mut self) -> Option<BrainClass>;

    fn reset(&mut self) {}
}

/// Always reports no classification. The default when no classifier is
/// wired in — brain input stays off until a real source (or the brain
/// simulator, via `InboundCommand::SimulateBrain`) is provided.
#[derive(Default)]
pub struct NoBrainSource;

impl BrainSource for NoBrainSource {
    fn sample(&mut self) -> Option<BrainClass> {
        None
    }
}
