use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};

use crate::schema::review_items;

/// Why a review item was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    SkillPractice,
    UnitReview,
    SpacedRepetition,
    Remedial,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::SkillPractice => "skill_practice",
            TargetType::UnitReview => "unit_review",
            TargetType::SpacedRepetition => "spaced_repetition",
            TargetType::Remedial => "remedial",
        }
    }

    /// Target types that make up a learner's per-skill review slot.
    pub const SKILL_REVIEW: [TargetType; 2] = [TargetType::SpacedRepetition, TargetType::Remedial];

    /// Target types owned by a single skill. Unit reviews belong to the unit.
    pub const SKILL_SCOPED: [TargetType; 3] = [
        TargetType::SkillPractice,
        TargetType::SpacedRepetition,
        TargetType::Remedial,
    ];
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skill_practice" => Ok(TargetType::SkillPractice),
            "unit_review" => Ok(TargetType::UnitReview),
            "spaced_repetition" => Ok(TargetType::SpacedRepetition),
            "remedial" => Ok(TargetType::Remedial),
            other => Err(format!("unknown review target type: {other}")),
        }
    }
}

impl ToSql<Text, Sqlite> for TargetType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for TargetType {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let value = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        value.parse().map_err(Into::into)
    }
}

/// One scheduled review for one learner and one target
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = review_items, primary_key(review_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub review_id: i32,
    pub learner_id: i32,
    pub target_type: TargetType,
    pub skill_id: i32,
    pub unit_id: Option<i32>,
    pub due_date: NaiveDate,
    pub next_review_date: Option<NaiveDate>,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub repetition_count: i32,
    pub priority: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ReviewItem {
    pub fn is_outstanding(&self) -> bool {
        self.completed_at.is_none()
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = review_items)]
pub struct NewReviewItem {
    pub learner_id: i32,
    pub target_type: TargetType,
    pub skill_id: i32,
    pub unit_id: Option<i32>,
    pub due_date: NaiveDate,
    pub next_review_date: Option<NaiveDate>,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub repetition_count: i32,
    pub priority: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// In-place reschedule of an outstanding item
#[derive(Debug, AsChangeset)]
#[diesel(table_name = review_items, treat_none_as_null = true)]
pub struct ReviewReschedule {
    pub target_type: TargetType,
    pub skill_id: i32,
    pub unit_id: Option<i32>,
    pub due_date: NaiveDate,
    pub next_review_date: Option<NaiveDate>,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub repetition_count: i32,
    pub priority: i32,
    pub updated_at: NaiveDateTime,
}

/// Due-today and upcoming review items for one learner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub today: Vec<ReviewItem>,
    pub upcoming: Vec<ReviewItem>,
}

/// Page sizes for the schedule query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleLimits {
    pub today: i64,
    pub upcoming: i64,
}

impl Default for ScheduleLimits {
    fn default() -> Self {
        Self {
            today: 10,
            upcoming: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_target_type_is_rejected() {
        assert!("weekly".parse::<TargetType>().is_err());
    }

    #[test]
    fn target_type_serializes_snake_case() {
        let json = serde_json::to_string(&TargetType::SpacedRepetition).unwrap();
        assert_eq!(json, "\"spaced_repetition\"");
    }
}
