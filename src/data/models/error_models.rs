use diesel::result::Error as DieselError;
use thiserror::Error;

/// Failures of the review scheduler itself
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Unknown skill {0}")]
    UnknownSkill(i32),
    #[error("Performance quality must be between 0 and 5, got {0}")]
    InvalidQuality(i32),
    #[error("Review item {0} not found")]
    ReviewNotFound(i32),
    #[error("Due date out of range: {interval_days} days after {from}")]
    DateOutOfRange {
        from: chrono::NaiveDate,
        interval_days: i32,
    },
    #[error("Database error: {0}")]
    Database(#[from] DieselError),
}

/// Errors returned by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Access denied")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Database error")]
    Database(DieselError),
    #[error("Connection pool error: {0}")]
    Pool(String),
    #[error("Session error: {0}")]
    Session(String),
}
