use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::data::models::{ReviewItem, Skill, TargetType};

/// Request payload for reporting an answered exercise
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResultRequest {
    pub exercise_id: i32,   // Exercise the learner answered
    pub correct: bool,      // Outcome of the attempt
    #[serde(default)]
    #[validate(length(max = 4096, message = "Response is too long"))]
    pub response: String,   // Raw learner response
    #[validate(range(min = 0, message = "Time taken cannot be negative"))]
    pub time_taken: i32,    // Seconds spent on the exercise
    #[serde(default)]
    #[validate(range(min = 0, message = "Hints used cannot be negative"))]
    pub hints_used: i32,    // Hints revealed before answering
    #[validate(range(min = 1, message = "At least one attempt is required"))]
    pub attempts: i32,      // Tries before the final answer
}

/// Response for a recorded exercise result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResultResponse {
    pub correct: bool,
    pub xp_earned: i32,
    pub total_xp: i32,
    pub crown_level: i32,
    pub crown_level_up: bool, // Lets the UI celebrate
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: i32,
    pub started_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleParams {
    pub date: Option<NaiveDate>, // Reference date, defaults to today (UTC)
}

/// A review item enriched with its skill's display metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReview {
    pub id: i32,
    pub learner_id: i32,
    pub target_type: TargetType,
    pub skill_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i32>,
    pub due_date: NaiveDate,
    pub next_review_date: Option<NaiveDate>,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub repetition_count: i32,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>, // Only set once resolved
    pub title: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl ScheduledReview {
    pub fn new(item: ReviewItem, skill: Option<&Skill>) -> Self {
        Self {
            id: item.review_id,
            learner_id: item.learner_id,
            target_type: item.target_type,
            skill_id: item.skill_id,
            unit_id: item.unit_id,
            due_date: item.due_date,
            next_review_date: item.next_review_date,
            interval_days: item.interval_days,
            ease_factor: item.ease_factor,
            repetition_count: item.repetition_count,
            priority: item.priority,
            completed_at: item.completed_at,
            title: skill.map(|s| s.title.clone()),
            icon: skill.and_then(|s| s.icon.clone()),
            description: skill.and_then(|s| s.description.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub today: Vec<ScheduledReview>,
    pub upcoming: Vec<ScheduledReview>,
}

/// Standard API response format
#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}
