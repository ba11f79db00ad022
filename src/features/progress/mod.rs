pub mod crowns;
pub mod tracker;

pub use tracker::ProgressTracker;
