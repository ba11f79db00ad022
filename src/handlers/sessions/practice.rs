use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use diesel::SqliteConnection;
use validator::Validate;

use crate::{
    data::models::{
        ApiError, ApiResponse, ExerciseResultRequest, ExerciseResultResponse, SessionResponse,
    },
    data::repositories::{CurriculumRepository, PracticeRepository},
    features::progress::ProgressTracker,
    features::scheduling::ReviewScheduler,
    state::AppState,
    utils,
};

pub async fn start_session(
    State(state): State<AppState>,
    session: tower_sessions::Session,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let learner_id = utils::require_learner(&session).await?;
    let mut conn = state.pool.get()?;

    let practice = PracticeRepository::start_session(&mut conn, learner_id, Utc::now().naive_utc())?;
    log::info!(
        "Learner {} started practice session {}",
        learner_id,
        practice.session_id
    );

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: practice.session_id,
            started_at: practice.started_at,
            completed_at: practice.completed_at,
        }),
    ))
}

pub async fn complete_session(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Path(session_id): Path<i32>,
) -> Result<Json<ApiResponse>, ApiError> {
    let learner_id = utils::require_learner(&session).await?;
    let mut conn = state.pool.get()?;

    PracticeRepository::find_session_for_learner(&mut conn, learner_id, session_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Practice session {session_id}")))?;
    PracticeRepository::complete_session(&mut conn, session_id, Utc::now().naive_utc())?;

    Ok(Json(ApiResponse {
        success: true,
        message: "Practice session completed".to_string(),
    }))
}

/// Records an answered exercise, then reschedules the skill's review.
///
/// Scheduling runs after the attempt is committed and never fails the request.
pub async fn record_exercise_result(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Path(session_id): Path<i32>,
    Json(payload): Json<ExerciseResultRequest>,
) -> Result<Json<ExerciseResultResponse>, ApiError> {
    let learner_id = utils::require_learner(&session).await?;
    payload.validate()?;

    let mut conn = state.pool.get()?;

    PracticeRepository::find_session_for_learner(&mut conn, learner_id, session_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Practice session {session_id}")))?;
    let exercise = CurriculumRepository::find_exercise(&mut conn, payload.exercise_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Exercise {}", payload.exercise_id)))?;

    let progress = ProgressTracker::record_attempt(
        &mut conn,
        learner_id,
        session_id,
        &exercise,
        &payload,
        Utc::now().naive_utc(),
    )?;

    schedule_after_attempt(
        &mut conn,
        utils::today_utc(),
        learner_id,
        exercise.skill_id,
        payload.correct,
        progress.crown_level_up(),
    );

    Ok(Json(ExerciseResultResponse {
        correct: payload.correct,
        xp_earned: progress.xp_earned,
        total_xp: progress.total_xp,
        crown_level: progress.crown_level,
        crown_level_up: progress.crown_level_up(),
    }))
}

fn schedule_after_attempt(
    conn: &mut SqliteConnection,
    today: NaiveDate,
    learner_id: i32,
    skill_id: i32,
    correct: bool,
    crown_level_up: bool,
) {
    let mut scheduler = ReviewScheduler::new(conn, today);
    let quality = if correct { 1 } else { 0 };

    if let Err(e) = scheduler.schedule_skill_review(learner_id, skill_id, quality) {
        log::error!(
            "Failed to schedule review of skill {} for learner {}: {}",
            skill_id,
            learner_id,
            e
        );
    }

    if crown_level_up {
        if let Err(e) = scheduler.schedule_unit_review_after_crown_level_up(learner_id, skill_id) {
            log::error!(
                "Failed to schedule unit review after crown level-up of skill {} for learner {}: {}",
                skill_id,
                learner_id,
                e
            );
        }
    }
}
