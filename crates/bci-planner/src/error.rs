use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("landmark '{0}' did not resolve to a waypoint")]
    UnresolvedLandmark(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
