//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `BciError` via `From` impls, or keep them separate and wrap `BciError` as
//! one variant. Both patterns are acceptable; prefer whichever keeps error
//! sites clean.

use thiserror::Error;

use crate::RobotId;

/// The top-level error type for `bci-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BciError {
    #[error("robot {0} not found")]
    RobotNotFound(RobotId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `bci-*` crates.
pub type BciResult<T> = Result<T, BciError>;
