pub mod session;

use chrono::{NaiveDate, Utc};

pub use session::{get_current_learner_id, require_learner, set_learner_session};

/// Calendar day used for scheduling, in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
