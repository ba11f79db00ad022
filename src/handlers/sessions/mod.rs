pub mod practice;

pub use practice::{complete_session, record_exercise_result, start_session};
