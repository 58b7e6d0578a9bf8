pub mod health;
pub mod learning;
pub mod matches;
pub mod profiles;
pub mod similarity;
pub mod teachers;
