pub mod grading;
pub mod output;
pub mod profile;
pub mod tui;
