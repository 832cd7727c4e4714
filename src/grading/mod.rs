pub mod engine;

pub use engine::{compute_grade, GradeBreakdown, GradeError, GradeResult, DEFAULT_PRECISION};
