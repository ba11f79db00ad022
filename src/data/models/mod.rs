pub mod curriculum_models;
pub mod error_models;
pub mod review_models;
pub mod session_models;

pub use curriculum_models::{
    Exercise, NewExerciseAttempt, NewPracticeSession, PracticeSession, ProgressUpdate, Skill,
    SkillProgress,
};
pub use error_models::{ApiError, SchedulerError};
pub use review_models::{
    NewReviewItem, ReviewItem, ReviewReschedule, Schedule, ScheduleLimits, TargetType,
};
pub use session_models::{
    ApiResponse, ExerciseResultRequest, ExerciseResultResponse, ScheduleParams, ScheduleResponse,
    ScheduledReview, SessionResponse,
};
