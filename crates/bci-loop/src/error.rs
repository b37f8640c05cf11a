use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("supervisory loop configuration error: {0}")]
    Config(String),
}

pub type LoopResult<T> = Result<T, LoopError>;
