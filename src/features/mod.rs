pub mod api;
pub mod progress;
pub mod scheduling;
