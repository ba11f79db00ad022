use std::collections::HashMap;

use axum::extract::{Json, Path, Query, State};

use crate::{
    data::models::{
        ApiError, ReviewItem, ScheduleParams, ScheduleResponse, ScheduledReview, Skill,
    },
    data::repositories::CurriculumRepository,
    features::scheduling::ReviewScheduler,
    state::AppState,
    utils,
};

pub async fn get_schedule(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Path(user_id): Path<i32>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let learner_id = utils::require_learner(&session).await?;
    if learner_id != user_id {
        log::warn!(
            "Learner {} tried to read the schedule of learner {}",
            learner_id,
            user_id
        );
        return Err(ApiError::Forbidden);
    }

    let today = utils::today_utc();
    let reference_date = params.date.unwrap_or(today);
    let mut conn = state.pool.get()?;

    let schedule = ReviewScheduler::new(&mut conn, today)
        .with_limits(state.schedule_limits)
        .get_schedule(learner_id, reference_date)?;

    let mut skill_ids: Vec<i32> = schedule
        .today
        .iter()
        .chain(&schedule.upcoming)
        .map(|item| item.skill_id)
        .collect();
    skill_ids.sort_unstable();
    skill_ids.dedup();

    let skills: HashMap<i32, Skill> = CurriculumRepository::skills_by_ids(&mut conn, &skill_ids)?
        .into_iter()
        .map(|skill| (skill.skill_id, skill))
        .collect();

    Ok(Json(ScheduleResponse {
        today: enrich(schedule.today, &skills),
        upcoming: enrich(schedule.upcoming, &skills),
    }))
}

/// Resolves one review item. The body has the same shape as a schedule entry.
pub async fn complete_review(
    State(state): State<AppState>,
    session: tower_sessions::Session,
    Path(review_id): Path<i32>,
) -> Result<Json<ScheduledReview>, ApiError> {
    let learner_id = utils::require_learner(&session).await?;
    let mut conn = state.pool.get()?;

    let item = ReviewScheduler::new(&mut conn, utils::today_utc())
        .complete_review(learner_id, review_id)?;
    let skill = CurriculumRepository::find_skill(&mut conn, item.skill_id)?;

    Ok(Json(ScheduledReview::new(item, skill.as_ref())))
}

fn enrich(items: Vec<ReviewItem>, skills: &HashMap<i32, Skill>) -> Vec<ScheduledReview> {
    items
        .into_iter()
        .map(|item| {
            let skill = skills.get(&item.skill_id);
            ScheduledReview::new(item, skill)
        })
        .collect()
}
