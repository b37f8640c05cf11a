//! Subscriber-protocol message types, channel-based fan-out, and
//! fire-and-forget TTS dispatch for the BCI supervisory core — the
//! transport-facing layer that turns a [`bci_loop::TickReport`] into
//! messages an external subscriber can consume.

pub mod error;
pub mod hub;
pub mod message;
pub mod tts;

pub use error::{BroadcastError, BroadcastResult};
pub use hub::BroadcastHub;
pub use message::{messages_for_tick, LogKind, Message, StateUpdate};
pub use tts::{NoopTtsBackend, SynthesizedSpeech, TtsBackend, TtsWorker};

#[cfg(test)]
mod tests;
