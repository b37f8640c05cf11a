//! Error type for `bci-broadcast`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error(transparent)]
    Core(#[from] bci_core::BciError),

    #[error("tts worker queue is full, request dropped")]
    TtsQueueFull,
}

pub type BroadcastResult<T> = Result<T, BroadcastError>;
