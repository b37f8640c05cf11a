use thiserror::Error;

#[derive(Debug, Error)]
pub enum FusionError {
    #[error("fusion configuration error: {0}")]
    Config(String),
}

pub type FusionResult<T> = Result<T, FusionError>;
