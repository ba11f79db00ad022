use diesel::result::Error as DieselError;
use tower_sessions::session::Error as SessionError;
use validator::ValidationErrors;

use crate::data::models::{ApiError, SchedulerError};

impl From<DieselError> for ApiError {
    fn from(err: DieselError) -> Self {
        ApiError::Database(err)
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        ApiError::Pool(err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<SchedulerError> for ApiError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::UnknownSkill(_)
            | SchedulerError::InvalidQuality(_)
            | SchedulerError::DateOutOfRange { .. } => ApiError::Validation(err.to_string()),
            SchedulerError::ReviewNotFound(id) => ApiError::NotFound(format!("Review item {id}")),
            SchedulerError::Database(e) => ApiError::Database(e),
        }
    }
}
