//! Voice transcript parsing and brain/voice command fusion.

pub mod error;
pub mod fusion;
pub mod parser;
pub mod thresholds;

pub use error::{FusionError, FusionResult};
pub use fusion::{CommandFusion, FusionOutcome, FusionSource};
pub use parser::CommandParser;
pub use thresholds::FusionThresholds;

#[cfg(test)]
mod tests;
