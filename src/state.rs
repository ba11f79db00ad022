use crate::DbPool;
use crate::data::models::ScheduleLimits;

/// Shared state handed to every API handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub schedule_limits: ScheduleLimits,
}

impl AppState {
    pub fn new(pool: DbPool, schedule_limits: ScheduleLimits) -> Self {
        Self {
            pool,
            schedule_limits,
        }
    }
}
