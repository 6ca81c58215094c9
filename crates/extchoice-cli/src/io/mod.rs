pub mod input;
pub mod submission;
