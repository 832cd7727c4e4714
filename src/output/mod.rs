mod formatter;

pub use formatter::{format_breakdown, format_grade, format_value, should_use_colors};
