//! Academic structure aggregate: departments, levels, programs,
//! classrooms, courses and teacher/student profiles.

mod model;
mod repository;

pub use model::*;
pub use repository::AcademicRepositoryInterface;
