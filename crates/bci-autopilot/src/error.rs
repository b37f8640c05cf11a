use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutopilotError {
    #[error("landmark '{0}' did not resolve to a waypoint")]
    UnresolvedLandmark(String),
}

pub type AutopilotResult<T> = Result<T, AutopilotError>;
