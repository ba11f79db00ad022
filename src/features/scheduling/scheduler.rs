use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::data::models::{
    NewReviewItem, ReviewItem, ReviewReschedule, Schedule, ScheduleLimits, SchedulerError,
    TargetType,
};
use crate::data::repositories::{CurriculumRepository, ReviewRepository};
use crate::features::scheduling::interval::{
    compute_next_interval, priority_for, BOOTSTRAP_EASE_FACTOR, BOOTSTRAP_INTERVAL_DAYS,
    UNIT_REVIEW_INTERVAL_DAYS,
};

/// Highest performance quality accepted on input.
pub const MAX_PERFORMANCE_QUALITY: i32 = 5;

/// Review scheduler bound to one connection and one calendar day.
///
/// Every read-modify-write runs inside an immediate SQLite transaction, so two
/// concurrent attempts on the same learner and skill are applied one after the
/// other instead of racing on `repetition_count` and `ease_factor`.
pub struct ReviewScheduler<'a> {
    conn: &'a mut SqliteConnection,
    today: NaiveDate,
    limits: ScheduleLimits,
}

impl<'a> ReviewScheduler<'a> {
    pub fn new(conn: &'a mut SqliteConnection, today: NaiveDate) -> Self {
        ReviewScheduler {
            conn,
            today,
            limits: ScheduleLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ScheduleLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Reschedules the learner's review of a skill after one attempt.
    ///
    /// A failed attempt turns the item into a `remedial` review due tomorrow;
    /// a passed one into a `spaced_repetition` review with a longer interval.
    /// The item is updated in place when one is already outstanding. Otherwise a
    /// new item continues from the learner's last completed one for the skill,
    /// or from the bootstrap state if there is none.
    pub fn schedule_skill_review(
        &mut self,
        learner_id: i32,
        skill_id: i32,
        performance_quality: i32,
    ) -> Result<ReviewItem, SchedulerError> {
        if !(0..=MAX_PERFORMANCE_QUALITY).contains(&performance_quality) {
            return Err(SchedulerError::InvalidQuality(performance_quality));
        }
        if CurriculumRepository::find_skill(self.conn, skill_id)?.is_none() {
            return Err(SchedulerError::UnknownSkill(skill_id));
        }

        let today = self.today;
        let now = Utc::now().naive_utc();

        let item = self.conn.immediate_transaction::<_, SchedulerError, _>(|conn| {
            let outstanding = ReviewRepository::outstanding_for_skill(
                conn,
                learner_id,
                skill_id,
                &TargetType::SKILL_REVIEW,
            )?;
            let current = supersede_older(conn, outstanding, now)?;

            // A completed occurrence still carries the learned interval and ease.
            let previous = match &current {
                Some(item) => Some(item.clone()),
                None => ReviewRepository::latest_completed_for_skill(
                    conn,
                    learner_id,
                    skill_id,
                    &TargetType::SKILL_REVIEW,
                )?,
            };

            let (interval, ease, repetitions) = previous
                .as_ref()
                .map(|item| (item.interval_days, item.ease_factor, item.repetition_count))
                .unwrap_or((BOOTSTRAP_INTERVAL_DAYS, BOOTSTRAP_EASE_FACTOR, 0));

            let (interval_days, ease_factor) =
                compute_next_interval(interval, ease, performance_quality);
            let due_date = add_days(today, interval_days)?;

            let (target_type, repetition_count, next_review_date) = if performance_quality > 0 {
                (
                    TargetType::SpacedRepetition,
                    repetitions + 1,
                    look_ahead(due_date, interval_days, ease_factor),
                )
            } else {
                (TargetType::Remedial, 0, None)
            };

            let item = match current {
                Some(item) => ReviewRepository::reschedule(
                    conn,
                    item.review_id,
                    &ReviewReschedule {
                        target_type,
                        skill_id,
                        unit_id: None,
                        due_date,
                        next_review_date,
                        interval_days,
                        ease_factor,
                        repetition_count,
                        priority: priority_for(interval_days),
                        updated_at: now,
                    },
                )?,
                None => ReviewRepository::insert(
                    conn,
                    &NewReviewItem {
                        learner_id,
                        target_type,
                        skill_id,
                        unit_id: None,
                        due_date,
                        next_review_date,
                        interval_days,
                        ease_factor,
                        repetition_count,
                        priority: priority_for(interval_days),
                        created_at: now,
                        updated_at: now,
                    },
                )?,
            };

            Ok(item)
        })?;

        log::debug!(
            "Scheduled {} review {} for learner {} skill {}: due {} (interval {}d, ease {:.2})",
            item.target_type,
            item.review_id,
            learner_id,
            skill_id,
            item.due_date,
            item.interval_days,
            item.ease_factor
        );

        Ok(item)
    }

    /// Creates or moves the unit-level checkpoint after a skill's crown level rose.
    ///
    /// Per-skill reviews inside the unit are left alone.
    pub fn schedule_unit_review_after_crown_level_up(
        &mut self,
        learner_id: i32,
        skill_id: i32,
    ) -> Result<ReviewItem, SchedulerError> {
        let skill = CurriculumRepository::find_skill(self.conn, skill_id)?
            .ok_or(SchedulerError::UnknownSkill(skill_id))?;
        let unit_id = skill.unit_id;

        let today = self.today;
        let now = Utc::now().naive_utc();

        let item = self.conn.immediate_transaction::<_, SchedulerError, _>(|conn| {
            let outstanding = ReviewRepository::outstanding_for_unit(conn, learner_id, unit_id)?;
            let current = supersede_older(conn, outstanding, now)?;

            let interval_days = UNIT_REVIEW_INTERVAL_DAYS;
            let due_date = add_days(today, interval_days)?;

            let item = match current {
                Some(item) => ReviewRepository::reschedule(
                    conn,
                    item.review_id,
                    &ReviewReschedule {
                        target_type: TargetType::UnitReview,
                        skill_id,
                        unit_id: Some(unit_id),
                        due_date,
                        next_review_date: look_ahead(due_date, interval_days, item.ease_factor),
                        interval_days,
                        ease_factor: item.ease_factor,
                        repetition_count: item.repetition_count + 1,
                        priority: priority_for(interval_days),
                        updated_at: now,
                    },
                )?,
                None => ReviewRepository::insert(
                    conn,
                    &NewReviewItem {
                        learner_id,
                        target_type: TargetType::UnitReview,
                        skill_id,
                        unit_id: Some(unit_id),
                        due_date,
                        next_review_date: look_ahead(due_date, interval_days, BOOTSTRAP_EASE_FACTOR),
                        interval_days,
                        ease_factor: BOOTSTRAP_EASE_FACTOR,
                        repetition_count: 0,
                        priority: priority_for(interval_days),
                        created_at: now,
                        updated_at: now,
                    },
                )?,
            };

            Ok(item)
        })?;

        log::info!(
            "Unit {} review {} scheduled for learner {} on {} after crown level-up of skill {}",
            unit_id,
            item.review_id,
            learner_id,
            item.due_date,
            skill_id
        );

        Ok(item)
    }

    /// Due and upcoming outstanding reviews as of `reference_date`.
    ///
    /// Overdue items are carried into `today`.
    pub fn get_schedule(
        &mut self,
        learner_id: i32,
        reference_date: NaiveDate,
    ) -> Result<Schedule, SchedulerError> {
        let limits = self.limits;
        self.conn.transaction::<_, SchedulerError, _>(|conn| {
            let today = ReviewRepository::due_by(conn, learner_id, reference_date, limits.today)?;
            let upcoming =
                ReviewRepository::due_after(conn, learner_id, reference_date, limits.upcoming)?;
            Ok(Schedule { today, upcoming })
        })
    }

    /// Marks one of the learner's items as resolved.
    pub fn complete_review(
        &mut self,
        learner_id: i32,
        review_id: i32,
    ) -> Result<ReviewItem, SchedulerError> {
        let now = Utc::now().naive_utc();
        self.conn.immediate_transaction::<_, SchedulerError, _>(|conn| {
            let item = ReviewRepository::find_for_learner(conn, learner_id, review_id)?
                .ok_or(SchedulerError::ReviewNotFound(review_id))?;
            if !item.is_outstanding() {
                return Ok(item);
            }

            ReviewRepository::complete(conn, &[review_id], now)?;
            ReviewRepository::find_for_learner(conn, learner_id, review_id)?
                .ok_or(SchedulerError::ReviewNotFound(review_id))
        })
    }

    /// Deletes every skill-level review of a retired skill, for all learners.
    ///
    /// Unit reviews triggered by the skill stay with their unit and are moved to
    /// another skill of it. They are deleted only when the unit has no other skill.
    /// Returns the number of deleted items.
    pub fn retire_skill_reviews(&mut self, skill_id: i32) -> Result<usize, SchedulerError> {
        let (deleted, reassigned) = self.conn.immediate_transaction::<_, SchedulerError, _>(|conn| {
            let mut deleted =
                ReviewRepository::delete_for_skill(conn, skill_id, &TargetType::SKILL_SCOPED)?;
            let mut reassigned = 0;

            let mut by_unit: BTreeMap<Option<i32>, Vec<i32>> = BTreeMap::new();
            for item in ReviewRepository::unit_reviews_for_skill(conn, skill_id)? {
                by_unit.entry(item.unit_id).or_default().push(item.review_id);
            }

            for (unit_id, review_ids) in by_unit {
                let replacement = match unit_id {
                    Some(unit_id) => {
                        CurriculumRepository::other_skill_in_unit(conn, unit_id, skill_id)?
                    }
                    None => None,
                };
                match replacement {
                    Some(other) => {
                        reassigned += ReviewRepository::reassign_skill(conn, &review_ids, other)?
                    }
                    None => deleted += ReviewRepository::delete(conn, &review_ids)?,
                }
            }

            Ok((deleted, reassigned))
        })?;

        log::info!(
            "Retired skill {}: deleted {} review items, moved {} unit reviews",
            skill_id,
            deleted,
            reassigned
        );
        Ok(deleted)
    }
}

// Keeps the newest item and completes the rest.
fn supersede_older(
    conn: &mut SqliteConnection,
    outstanding: Vec<ReviewItem>,
    now: NaiveDateTime,
) -> Result<Option<ReviewItem>, SchedulerError> {
    let mut items = outstanding.into_iter();
    let newest = items.next();
    let superseded: Vec<i32> = items.map(|item| item.review_id).collect();

    if !superseded.is_empty() {
        let completed = ReviewRepository::complete(conn, &superseded, now)?;
        log::warn!(
            "Completed {} superseded review items {:?}",
            completed,
            superseded
        );
    }

    Ok(newest)
}

fn add_days(from: NaiveDate, interval_days: i32) -> Result<NaiveDate, SchedulerError> {
    u64::try_from(interval_days)
        .ok()
        .and_then(|days| from.checked_add_days(Days::new(days)))
        .ok_or(SchedulerError::DateOutOfRange {
            from,
            interval_days,
        })
}

// Date of the review after `due_date`, assuming that one is passed too.
fn look_ahead(due_date: NaiveDate, interval_days: i32, ease_factor: f64) -> Option<NaiveDate> {
    let (next_interval, _) = compute_next_interval(interval_days, ease_factor, 1);
    add_days(due_date, next_interval).ok()
}
