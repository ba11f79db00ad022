#![allow(dead_code)]

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use review_scheduler::{
    DbPool,
    data::models::{NewReviewItem, ReviewItem, TargetType},
    data::repositories::ReviewRepository,
    db::{self, ConnectionOptions},
    schema::{exercises, review_items, skills, units},
};

/// Skills 1..=16 live in unit 1, skill 17 in unit 2. Exercise `n` practices skill `n`.
pub const UNIT_ONE_SKILLS: i32 = 16;
pub const UNIT_TWO_SKILL: i32 = 17;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(chrono::Days::new(days)).unwrap()
}

/// In-memory database with the schema and curriculum loaded.
pub fn memory_connection() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:").unwrap();
    db::run_migrations(&mut conn).unwrap();
    seed_curriculum(&mut conn);
    conn
}

/// Single-connection pool, so every checkout sees the same in-memory database.
pub fn memory_pool() -> DbPool {
    let pool = db::build_pool(
        ":memory:",
        1,
        ConnectionOptions {
            busy_timeout: Duration::from_secs(1),
        },
    )
    .unwrap();
    let mut conn = pool.get().unwrap();
    db::run_migrations(&mut conn).unwrap();
    seed_curriculum(&mut conn);
    drop(conn);
    pool
}

pub fn seed_curriculum(conn: &mut SqliteConnection) {
    for (unit_id, title) in [(1, "Kindness"), (2, "Honesty")] {
        diesel::insert_into(units::table)
            .values((units::unit_id.eq(unit_id), units::title.eq(title)))
            .execute(conn)
            .unwrap();
    }

    for skill_id in 1..=UNIT_TWO_SKILL {
        let unit_id = if skill_id == UNIT_TWO_SKILL { 2 } else { 1 };
        diesel::insert_into(skills::table)
            .values((
                skills::skill_id.eq(skill_id),
                skills::unit_id.eq(unit_id),
                skills::title.eq(format!("Skill {skill_id}")),
                skills::icon.eq(Some("star")),
                skills::description.eq(None::<String>),
            ))
            .execute(conn)
            .unwrap();
        diesel::insert_into(exercises::table)
            .values((
                exercises::exercise_id.eq(skill_id),
                exercises::skill_id.eq(skill_id),
            ))
            .execute(conn)
            .unwrap();
    }
}

/// Inserts an outstanding item directly, bypassing the scheduler.
pub fn insert_item(
    conn: &mut SqliteConnection,
    learner_id: i32,
    skill_id: i32,
    target_type: TargetType,
    due_date: NaiveDate,
    interval_days: i32,
    ease_factor: f64,
    priority: i32,
) -> ReviewItem {
    let now = Utc::now().naive_utc();
    ReviewRepository::insert(
        conn,
        &NewReviewItem {
            learner_id,
            target_type,
            skill_id,
            unit_id: None,
            due_date,
            next_review_date: None,
            interval_days,
            ease_factor,
            repetition_count: 3,
            priority,
            created_at: now,
            updated_at: now,
        },
    )
    .unwrap()
}

pub fn outstanding_for(conn: &mut SqliteConnection, learner_id: i32, skill_id: i32) -> Vec<ReviewItem> {
    review_items::table
        .filter(review_items::learner_id.eq(learner_id))
        .filter(review_items::skill_id.eq(skill_id))
        .filter(review_items::completed_at.is_null())
        .select(ReviewItem::as_select())
        .load(conn)
        .unwrap()
}
