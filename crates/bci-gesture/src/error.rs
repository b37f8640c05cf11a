use thiserror::Error;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("gesture threshold configuration error: {0}")]
    Config(String),
}

pub type GestureResult<T> = Result<T, GestureError>;
