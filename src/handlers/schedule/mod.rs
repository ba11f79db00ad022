pub mod schedule;

pub use schedule::{complete_review, get_schedule};
