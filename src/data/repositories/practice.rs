use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::{NewExerciseAttempt, NewPracticeSession, PracticeSession, SkillProgress};
use crate::schema::{exercise_attempts, practice_sessions, skill_progress};

pub struct PracticeRepository;

impl PracticeRepository {
    pub fn start_session(
        conn: &mut SqliteConnection,
        learner_id: i32,
        started_at: NaiveDateTime,
    ) -> Result<PracticeSession, diesel::result::Error> {
        diesel::insert_into(practice_sessions::table)
            .values(&NewPracticeSession {
                learner_id,
                started_at,
            })
            .execute(conn)?;

        let session_id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
            .get_result::<i32>(conn)?;

        practice_sessions::table
            .find(session_id)
            .select(PracticeSession::as_select())
            .first(conn)
    }

    pub fn find_session_for_learner(
        conn: &mut SqliteConnection,
        learner_id: i32,
        session_id: i32,
    ) -> Result<Option<PracticeSession>, diesel::result::Error> {
        practice_sessions::table
            .filter(practice_sessions::session_id.eq(session_id))
            .filter(practice_sessions::learner_id.eq(learner_id))
            .select(PracticeSession::as_select())
            .first(conn)
            .optional()
    }

    pub fn complete_session(
        conn: &mut SqliteConnection,
        session_id: i32,
        completed_at: NaiveDateTime,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(
            practice_sessions::table
                .filter(practice_sessions::session_id.eq(session_id))
                .filter(practice_sessions::completed_at.is_null()),
        )
        .set(practice_sessions::completed_at.eq(Some(completed_at)))
        .execute(conn)
    }

    pub fn record_attempt(
        conn: &mut SqliteConnection,
        attempt: &NewExerciseAttempt<'_>,
    ) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(exercise_attempts::table)
            .values(attempt)
            .execute(conn)
    }

    pub fn find_progress(
        conn: &mut SqliteConnection,
        learner_id: i32,
        skill_id: i32,
    ) -> Result<Option<SkillProgress>, diesel::result::Error> {
        skill_progress::table
            .find((learner_id, skill_id))
            .select(SkillProgress::as_select())
            .first(conn)
            .optional()
    }

    pub fn save_progress(
        conn: &mut SqliteConnection,
        progress: &SkillProgress,
    ) -> Result<usize, diesel::result::Error> {
        diesel::insert_into(skill_progress::table)
            .values(progress)
            .on_conflict((skill_progress::learner_id, skill_progress::skill_id))
            .do_update()
            .set((
                skill_progress::xp.eq(progress.xp),
                skill_progress::crown_level.eq(progress.crown_level),
                skill_progress::updated_at.eq(progress.updated_at),
            ))
            .execute(conn)
    }
}
