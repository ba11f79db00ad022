use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::data::models::{NewReviewItem, ReviewItem, ReviewReschedule, TargetType};
use crate::schema::review_items;

pub struct ReviewRepository;

impl ReviewRepository {
    /// Outstanding items for one skill, newest first
    pub fn outstanding_for_skill(
        conn: &mut SqliteConnection,
        learner_id: i32,
        skill_id: i32,
        target_types: &[TargetType],
    ) -> Result<Vec<ReviewItem>, diesel::result::Error> {
        review_items::table
            .filter(review_items::learner_id.eq(learner_id))
            .filter(review_items::skill_id.eq(skill_id))
            .filter(review_items::target_type.eq_any(target_types.to_vec()))
            .filter(review_items::completed_at.is_null())
            .order_by((review_items::updated_at.desc(), review_items::review_id.desc()))
            .select(ReviewItem::as_select())
            .load(conn)
    }

    /// Outstanding unit reviews for one unit, newest first
    pub fn outstanding_for_unit(
        conn: &mut SqliteConnection,
        learner_id: i32,
        unit_id: i32,
    ) -> Result<Vec<ReviewItem>, diesel::result::Error> {
        review_items::table
            .filter(review_items::learner_id.eq(learner_id))
            .filter(review_items::unit_id.eq(unit_id))
            .filter(review_items::target_type.eq(TargetType::UnitReview))
            .filter(review_items::completed_at.is_null())
            .order_by((review_items::updated_at.desc(), review_items::review_id.desc()))
            .select(ReviewItem::as_select())
            .load(conn)
    }

    pub fn find_for_learner(
        conn: &mut SqliteConnection,
        learner_id: i32,
        review_id: i32,
    ) -> Result<Option<ReviewItem>, diesel::result::Error> {
        review_items::table
            .filter(review_items::review_id.eq(review_id))
            .filter(review_items::learner_id.eq(learner_id))
            .select(ReviewItem::as_select())
            .first(conn)
            .optional()
    }

    pub fn insert(
        conn: &mut SqliteConnection,
        item: &NewReviewItem,
    ) -> Result<ReviewItem, diesel::result::Error> {
        diesel::insert_into(review_items::table)
            .values(item)
            .execute(conn)?;

        let review_id = diesel::select(diesel::dsl::sql::<Integer>("last_insert_rowid()"))
            .get_result::<i32>(conn)?;

        review_items::table
            .find(review_id)
            .select(ReviewItem::as_select())
            .first(conn)
    }

    pub fn reschedule(
        conn: &mut SqliteConnection,
        review_id: i32,
        changes: &ReviewReschedule,
    ) -> Result<ReviewItem, diesel::result::Error> {
        diesel::update(review_items::table.find(review_id))
            .set(changes)
            .execute(conn)?;

        review_items::table
            .find(review_id)
            .select(ReviewItem::as_select())
            .first(conn)
    }

    /// Marks outstanding items as resolved. Already completed items keep their timestamp.
    pub fn complete(
        conn: &mut SqliteConnection,
        review_ids: &[i32],
        completed_at: NaiveDateTime,
    ) -> Result<usize, diesel::result::Error> {
        if review_ids.is_empty() {
            return Ok(0);
        }

        diesel::update(
            review_items::table
                .filter(review_items::review_id.eq_any(review_ids.to_vec()))
                .filter(review_items::completed_at.is_null()),
        )
        .set((
            review_items::completed_at.eq(Some(completed_at)),
            review_items::updated_at.eq(completed_at),
        ))
        .execute(conn)
    }

    /// Outstanding items due on or before `date`, highest priority first
    pub fn due_by(
        conn: &mut SqliteConnection,
        learner_id: i32,
        date: NaiveDate,
        limit: i64,
    ) -> Result<Vec<ReviewItem>, diesel::result::Error> {
        review_items::table
            .filter(review_items::learner_id.eq(learner_id))
            .filter(review_items::completed_at.is_null())
            .filter(review_items::due_date.le(date))
            .order_by((
                review_items::priority.desc(),
                review_items::due_date.asc(),
                review_items::review_id.asc(),
            ))
            .limit(limit)
            .select(ReviewItem::as_select())
            .load(conn)
    }

    /// Outstanding items due after `date`, soonest first
    pub fn due_after(
        conn: &mut SqliteConnection,
        learner_id: i32,
        date: NaiveDate,
        limit: i64,
    ) -> Result<Vec<ReviewItem>, diesel::result::Error> {
        review_items::table
            .filter(review_items::learner_id.eq(learner_id))
            .filter(review_items::completed_at.is_null())
            .filter(review_items::due_date.gt(date))
            .order_by((
                review_items::due_date.asc(),
                review_items::priority.desc(),
                review_items::review_id.asc(),
            ))
            .limit(limit)
            .select(ReviewItem::as_select())
            .load(conn)
    }

    /// Unit reviews, in any state, that point at `skill_id` as their trigger
    pub fn unit_reviews_for_skill(
        conn: &mut SqliteConnection,
        skill_id: i32,
    ) -> Result<Vec<ReviewItem>, diesel::result::Error> {
        review_items::table
            .filter(review_items::skill_id.eq(skill_id))
            .filter(review_items::target_type.eq(TargetType::UnitReview))
            .order_by(review_items::review_id.asc())
            .select(ReviewItem::as_select())
            .load(conn)
    }

    pub fn reassign_skill(
        conn: &mut SqliteConnection,
        review_ids: &[i32],
        skill_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        if review_ids.is_empty() {
            return Ok(0);
        }

        diesel::update(
            review_items::table.filter(review_items::review_id.eq_any(review_ids.to_vec())),
        )
        .set(review_items::skill_id.eq(skill_id))
        .execute(conn)
    }

    pub fn delete(
        conn: &mut SqliteConnection,
        review_ids: &[i32],
    ) -> Result<usize, diesel::result::Error> {
        if review_ids.is_empty() {
            return Ok(0);
        }

        diesel::delete(
            review_items::table.filter(review_items::review_id.eq_any(review_ids.to_vec())),
        )
        .execute(conn)
    }

    /// Deletes every item of the given target types for a skill, for all learners.
    pub fn delete_for_skill(
        conn: &mut SqliteConnection,
        skill_id: i32,
        target_types: &[TargetType],
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(
            review_items::table
                .filter(review_items::skill_id.eq(skill_id))
                .filter(review_items::target_type.eq_any(target_types.to_vec())),
        )
        .execute(conn)
    }

    /// Most recently completed item for one skill, if the learner has any
    pub fn latest_completed_for_skill(
        conn: &mut SqliteConnection,
        learner_id: i32,
        skill_id: i32,
        target_types: &[TargetType],
    ) -> Result<Option<ReviewItem>, diesel::result::Error> {
        review_items::table
            .filter(review_items::learner_id.eq(learner_id))
            .filter(review_items::skill_id.eq(skill_id))
            .filter(review_items::target_type.eq_any(target_types.to_vec()))
            .filter(review_items::completed_at.is_not_null())
            .order_by((review_items::completed_at.desc(), review_items::review_id.desc()))
            .select(ReviewItem::as_select())
            .first(conn)
            .optional()
    }
}
