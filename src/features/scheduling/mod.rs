pub mod interval;
pub mod scheduler;

pub use interval::compute_next_interval;
pub use scheduler::ReviewScheduler;
