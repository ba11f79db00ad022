use tower_sessions::Session;

use crate::data::models::ApiError;

const LEARNER_ID_KEY: &str = "user_id";

/// Stores `learner_id` under the session's `user_id` key, marking the session as logged in.
pub async fn set_learner_session(session: &Session, learner_id: i32) -> Result<(), ApiError> {
    session.insert(LEARNER_ID_KEY, learner_id).await?;
    Ok(())
}

pub async fn get_current_learner_id(session: &Session) -> Option<i32> {
    match session.get::<i32>(LEARNER_ID_KEY).await {
        Ok(learner_id) => learner_id,
        Err(e) => {
            log::error!("Failed to get user_id from session: {}", e);
            None
        }
    }
}

pub async fn require_learner(session: &Session) -> Result<i32, ApiError> {
    get_current_learner_id(session)
        .await
        .ok_or(ApiError::NotLoggedIn)
}
