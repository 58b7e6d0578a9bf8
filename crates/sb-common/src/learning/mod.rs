pub mod path;
pub mod prerequisites;

pub use path::{build_learning_path, find_mentors, LearningPath, Mentor};
pub use prerequisites::{analyze_prerequisites, Importance, Phase, Prerequisite};
