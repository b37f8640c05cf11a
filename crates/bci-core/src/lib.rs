//! Shared types, time model, and RNG for the BCI robot-control supervisory
//! core. Every other `bci-*` crate depends on this one; it depends on none
//! of them.

pub mod action;
pub mod brain;
pub mod command;
pub mod error;
pub mod gesture;
pub mod ids;
pub mod rng;
pub mod time;

pub use action::{Gear, RobotAction};
pub use brain::BrainClass;
pub use command::{CommandAction, CommandOrigin, CommandSequence, ParsedCommand};
pub use error::{BciError, BciResult};
pub use gesture::{GestureEvent, GestureKind, SelectDirection};
pub use ids::RobotId;
pub use rng::ControlRng;
pub use time::{ControlClock, ControlConfig, Tick};

#[cfg(test)]
mod tests;
