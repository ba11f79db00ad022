use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{exercise_attempts, exercises, practice_sessions, skill_progress, skills};

/// A skill and the display metadata shown next to its reviews
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = skills, primary_key(skill_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Skill {
    pub skill_id: i32,
    pub unit_id: i32,
    pub title: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Exercise {
    pub exercise_id: i32,
    pub skill_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = practice_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PracticeSession {
    pub session_id: i32,
    pub learner_id: i32,
    pub started_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = practice_sessions)]
pub struct NewPracticeSession {
    pub learner_id: i32,
    pub started_at: NaiveDateTime,
}

/// Raw record of one answered exercise
#[derive(Debug, Insertable)]
#[diesel(table_name = exercise_attempts)]
pub struct NewExerciseAttempt<'a> {
    pub session_id: i32,
    pub exercise_id: i32,
    pub learner_id: i32,
    pub correct: bool,
    pub response: &'a str,
    pub time_taken: i32,
    pub hints_used: i32,
    pub attempts: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = skill_progress)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SkillProgress {
    pub learner_id: i32,
    pub skill_id: i32,
    pub xp: i32,
    pub crown_level: i32,
    pub updated_at: NaiveDateTime,
}

/// Experience gained by one attempt and whether it crossed a crown threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub xp_earned: i32,
    pub total_xp: i32,
    pub previous_crown_level: i32,
    pub crown_level: i32,
}

impl ProgressUpdate {
    pub fn crown_level_up(&self) -> bool {
        self.crown_level > self.previous_crown_level
    }
}
