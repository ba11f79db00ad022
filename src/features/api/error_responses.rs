use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::data::models::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotLoggedIn => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e),
            ApiError::Database(e) => {
                log::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Pool(e) => {
                log::error!("Failed to get DB connection: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database unavailable".to_string(),
                )
            }
            ApiError::Session(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Session error: {}", e),
            ),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::SchedulerError;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(status_of(ApiError::NotLoggedIn), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ApiError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(ApiError::NotFound("Practice session 4".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(SchedulerError::UnknownSkill(9).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(SchedulerError::ReviewNotFound(3).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_errors_map_to_500() {
        assert_eq!(
            status_of(ApiError::Database(diesel::result::Error::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::Pool("timed out".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
