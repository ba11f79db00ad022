pub mod curriculum;
pub mod practice;
pub mod review;

pub use curriculum::CurriculumRepository;
pub use practice::PracticeRepository;
pub use review::ReviewRepository;
