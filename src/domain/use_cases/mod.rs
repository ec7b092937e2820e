pub mod intake;
pub mod submission;
