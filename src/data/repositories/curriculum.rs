use diesel::prelude::*;

use crate::data::models::{Exercise, Skill};
use crate::schema::{exercises, skills};

pub struct CurriculumRepository;

impl CurriculumRepository {
    pub fn find_skill(
        conn: &mut SqliteConnection,
        skill_id: i32,
    ) -> Result<Option<Skill>, diesel::result::Error> {
        skills::table
            .find(skill_id)
            .select(Skill::as_select())
            .first(conn)
            .optional()
    }

    pub fn skills_by_ids(
        conn: &mut SqliteConnection,
        skill_ids: &[i32],
    ) -> Result<Vec<Skill>, diesel::result::Error> {
        if skill_ids.is_empty() {
            return Ok(Vec::new());
        }

        skills::table
            .filter(skills::skill_id.eq_any(skill_ids.to_vec()))
            .select(Skill::as_select())
            .load(conn)
    }

    /// Lowest-numbered skill of a unit other than `excluded`
    pub fn other_skill_in_unit(
        conn: &mut SqliteConnection,
        unit_id: i32,
        excluded: i32,
    ) -> Result<Option<i32>, diesel::result::Error> {
        skills::table
            .filter(skills::unit_id.eq(unit_id))
            .filter(skills::skill_id.ne(excluded))
            .order_by(skills::skill_id.asc())
            .select(skills::skill_id)
            .first(conn)
            .optional()
    }

    pub fn find_exercise(
        conn: &mut SqliteConnection,
        exercise_id: i32,
    ) -> Result<Option<Exercise>, diesel::result::Error> {
        exercises::table
            .find(exercise_id)
            .select(Exercise::as_select())
            .first(conn)
            .optional()
    }
}
