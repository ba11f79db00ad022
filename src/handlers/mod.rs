pub mod schedule;
pub mod sessions;
