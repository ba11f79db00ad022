use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::data::models::{
    Exercise, ExerciseResultRequest, NewExerciseAttempt, ProgressUpdate, SkillProgress,
};
use crate::data::repositories::PracticeRepository;
use crate::features::progress::crowns::{crown_level_for, xp_for_attempt};

pub struct ProgressTracker;

impl ProgressTracker {
    /// Stores the raw attempt and adds its experience to the learner's skill
    /// progress in a single transaction.
    pub fn record_attempt(
        conn: &mut SqliteConnection,
        learner_id: i32,
        session_id: i32,
        exercise: &Exercise,
        result: &ExerciseResultRequest,
        now: NaiveDateTime,
    ) -> Result<ProgressUpdate, diesel::result::Error> {
        conn.immediate_transaction::<_, diesel::result::Error, _>(|conn| {
            PracticeRepository::record_attempt(
                conn,
                &NewExerciseAttempt {
                    session_id,
                    exercise_id: exercise.exercise_id,
                    learner_id,
                    correct: result.correct,
                    response: &result.response,
                    time_taken: result.time_taken,
                    hints_used: result.hints_used,
                    attempts: result.attempts,
                    created_at: now,
                },
            )?;

            let previous = PracticeRepository::find_progress(conn, learner_id, exercise.skill_id)?;
            let (previous_xp, previous_crown_level) = previous
                .map(|p| (p.xp, p.crown_level))
                .unwrap_or((0, 0));

            let xp_earned = xp_for_attempt(result.correct, result.hints_used);
            let total_xp = previous_xp.saturating_add(xp_earned);
            // Crown levels never go down, even if the thresholds are retuned.
            let crown_level = crown_level_for(total_xp).max(previous_crown_level);

            PracticeRepository::save_progress(
                conn,
                &SkillProgress {
                    learner_id,
                    skill_id: exercise.skill_id,
                    xp: total_xp,
                    crown_level,
                    updated_at: now,
                },
            )?;

            Ok(ProgressUpdate {
                xp_earned,
                total_xp,
                previous_crown_level,
                crown_level,
            })
        })
    }
}
