pub mod problem;
pub mod session;
pub mod submission;
