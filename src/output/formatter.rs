use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::grading::GradeResult;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the final grade as a single result line.
pub fn format_grade(result: &GradeResult, precision: i32, use_colors: bool) -> String {
    let value = format_value(result.grade, precision);
    if use_colors {
        format!("{} {}", "mGRADE:".bold(), value.green().bold())
    } else {
        format!("mGRADE: {value}")
    }
}

/// Format the intermediate quantities, one `name = value` line each, in
/// evaluation order.
pub fn format_breakdown(result: &GradeResult, use_colors: bool) -> String {
    result
        .breakdown
        .entries()
        .iter()
        .map(|(label, value)| {
            if use_colors {
                format!("  {:>6} = {}", label.cyan(), value)
            } else {
                format!("  {label:>6} = {value}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a grade with a fixed number of decimal digits, matching the
/// precision it was rounded to.
pub fn format_value(grade: f64, precision: i32) -> String {
    let digits = precision.max(0) as usize;
    format!("{grade:.digits$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{compute_grade, DEFAULT_PRECISION};
    use crate::profile::Profile;
    use serde_json::Map;

    fn sample_result() -> GradeResult {
        let profile = Profile {
            mec: 0.5,
            tser: 50.0,
            tsir: 50.0,
            cmj: 30.0,
            mrsi_p: 1.0,
            mrsi_d: 1.0,
            gh_n: 100.0,
            gh_rfd: 200.0,
            h_n: 150.0,
            h_rfd: 250.0,
            mtp: 40.0,
            age: 25,
            extra: Map::new(),
        };
        compute_grade(&profile, DEFAULT_PRECISION).unwrap()
    }

    #[test]
    fn test_format_grade_plain() {
        let line = format_grade(&sample_result(), DEFAULT_PRECISION, false);
        assert_eq!(line, "mGRADE: 0.2750");
    }

    #[test]
    fn test_format_value_pads_to_precision() {
        assert_eq!(format_value(0.275, 4), "0.2750");
        assert_eq!(format_value(0.27, 2), "0.27");
        assert_eq!(format_value(1.0, 0), "1");
    }

    #[test]
    fn test_format_breakdown_lists_all_quantities() {
        let text = format_breakdown(&sample_result(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].contains("ghROT = 150"));
        assert!(lines[9].contains("nMEC"));
    }
}
