//! Fixed-rate supervisory tick loop fusing brain, voice, and autopilot
//! input into robot actuation — the top of the `bci-*` dependency stack.

pub mod brain_source;
pub mod builder;
pub mod error;
pub mod inbound;
pub mod snapshot;
pub mod supervisory;

pub use brain_source::{BrainSource, NoBrainSource};
pub use builder::SupervisoryLoopBuilder;
pub use error::{LoopError, LoopResult};
pub use inbound::{InboundCommand, ManualCommand};
pub use snapshot::{
    ActionQueueStatus, ActionSource, CommandLogEntry, LogSource, LoopSnapshot, SpeakRequest,
    TickReport,
};
pub use supervisory::SupervisoryLoop;
