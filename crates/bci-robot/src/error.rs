use thiserror::Error;

use bci_core::RobotId;

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("robot {0} not found")]
    NotFound(RobotId),
    #[error(transparent)]
    Core(#[from] bci_core::BciError),
}

pub type RobotResult<T> = Result<T, RobotError>;
