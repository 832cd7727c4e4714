use std::time::Instant;

use serde_json::{Map, Value};

use crate::grading::{compute_grade, GradeResult};
use crate::profile::{load_profile, save_profile, Field, Profile};

/// Form slots: the twelve measurement fields followed by the filename line.
pub const FIELD_SLOTS: usize = Field::ALL.len();
pub const FILENAME_SLOT: usize = FIELD_SLOTS;
const SLOT_COUNT: usize = FIELD_SLOTS + 1;

const FLASH_SECS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Breakdown,
    Help,
}

/// Session state for one interactive run.
///
/// Every input buffer lives here and is passed by reference into the action
/// handlers; nothing is ambient. Each action runs to completion before the
/// next key event is processed.
pub struct App {
    /// Text buffers for the twelve measurement fields, in `Field::ALL` order.
    pub buffers: [String; FIELD_SLOTS],
    /// Profile name for save/load.
    pub filename: String,
    /// Extra keys carried over from the last loaded profile, written back
    /// on save so they are not dropped.
    pub extra: Map<String, Value>,
    /// Currently focused slot (a field index, or `FILENAME_SLOT`).
    pub selected: usize,
    /// Last computed grade, if any.
    pub result: Option<GradeResult>,
    pub precision: i32,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(precision: i32) -> Self {
        // The form starts at each field's minimum: 0 for measurements,
        // 1 for age.
        let buffers = Field::ALL.map(|field| {
            if field.is_integer() {
                "1".to_string()
            } else {
                "0".to_string()
            }
        });

        Self {
            buffers,
            filename: String::new(),
            extra: Map::new(),
            selected: 0,
            result: None,
            precision,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
        }
    }

    pub fn next_slot(&mut self) {
        self.selected = (self.selected + 1) % SLOT_COUNT;
    }

    pub fn previous_slot(&mut self) {
        self.selected = (self.selected + SLOT_COUNT - 1) % SLOT_COUNT;
    }

    fn buffer_mut(&mut self) -> &mut String {
        if self.selected == FILENAME_SLOT {
            &mut self.filename
        } else {
            &mut self.buffers[self.selected]
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let accepted = if self.selected == FILENAME_SLOT {
            !c.is_control()
        } else {
            // Numeric buffers take anything f64/u32 parsing could accept.
            c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
        };
        if accepted {
            self.buffer_mut().push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer_mut().pop();
    }

    /// Parse the twelve buffers into a profile. The first unparsable buffer
    /// aborts with a message naming the field; the core never sees it.
    pub fn parse_profile(&self) -> Result<Profile, String> {
        fn parse_f64(buffer: &str, field: Field) -> Result<f64, String> {
            buffer
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{} is not a number: '{}'", field.key(), buffer))
        }

        let value = |field: Field| parse_f64(&self.buffers[field as usize], field);

        let age_buffer = &self.buffers[Field::Age as usize];
        let age = age_buffer
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Age must be a positive integer: '{age_buffer}'"))?;

        Ok(Profile {
            mec: value(Field::Mec)?,
            tser: value(Field::Tser)?,
            tsir: value(Field::Tsir)?,
            cmj: value(Field::Cmj)?,
            mrsi_p: value(Field::MrsiP)?,
            mrsi_d: value(Field::MrsiD)?,
            gh_n: value(Field::GhN)?,
            gh_rfd: value(Field::GhRfd)?,
            h_n: value(Field::HN)?,
            h_rfd: value(Field::HRfd)?,
            mtp: value(Field::Mtp)?,
            age,
            extra: self.extra.clone(),
        })
    }

    /// Calculate the grade from the current buffers.
    pub fn calculate(&mut self) {
        let profile = match self.parse_profile() {
            Ok(profile) => profile,
            Err(msg) => {
                self.show_flash(format!("Calculation failed: {msg}"));
                return;
            }
        };

        match compute_grade(&profile, self.precision) {
            Ok(result) => {
                self.result = Some(result);
                self.show_flash(format!(
                    "Calculated mGRADE: {}",
                    crate::output::format_value(result.grade, self.precision)
                ));
            }
            Err(e) => {
                self.result = None;
                self.show_flash(format!("Calculation failed: {e}"));
            }
        }
    }

    /// Save the current buffers as a named profile.
    pub fn save(&mut self) {
        if self.filename.trim().is_empty() {
            self.show_flash("Enter a file name before saving".to_string());
            return;
        }

        let profile = match self.parse_profile() {
            Ok(profile) => profile,
            Err(msg) => {
                self.show_flash(format!("Cannot save: {msg}"));
                return;
            }
        };

        match save_profile(&profile, self.filename.trim()) {
            Ok(path) => {
                self.show_flash(format!("Profile saved to {}", path.display()));
            }
            Err(e) => self.show_flash(format!("Error saving profile: {e}")),
        }
    }

    /// Load a named profile into the buffers.
    ///
    /// On any failure every buffer is left exactly as it was; only the
    /// status message changes.
    pub fn load(&mut self) {
        if self.filename.trim().is_empty() {
            self.show_flash("Enter a file name before loading".to_string());
            return;
        }

        match load_profile(self.filename.trim()) {
            Ok(profile) => {
                for field in Field::ALL {
                    self.buffers[field as usize] = profile.display_value(field);
                }
                self.extra = profile.extra.clone();
                self.result = None;
                self.show_flash("Profile loaded".to_string());
            }
            Err(e) => self.show_flash(format!("Error loading profile: {e}")),
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_breakdown(&mut self) {
        if self.result.is_some() {
            self.input_mode = InputMode::Breakdown;
        } else {
            self.show_flash("Calculate a grade first".to_string());
        }
    }

    pub fn dismiss_overlay(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve_path;
    use std::env;
    use std::fs;

    fn reference_buffers() -> [String; FIELD_SLOTS] {
        [
            "0.5", "50", "50", "30", "1.0", "1.0", "100", "200", "150", "250", "40", "25",
        ]
        .map(String::from)
    }

    fn temp_name(stem: &str) -> String {
        env::temp_dir()
            .join(format!("mgrade_app_test_{stem}"))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_calculate_reference_scenario() {
        let mut app = App::new(4);
        app.buffers = reference_buffers();
        app.calculate();
        assert_eq!(app.result.unwrap().grade, 0.275);
    }

    #[test]
    fn test_calculate_flashes_on_bad_buffer() {
        let mut app = App::new(4);
        app.buffers = reference_buffers();
        app.buffers[Field::Cmj as usize] = "not-a-number".to_string();
        app.calculate();
        assert!(app.result.is_none());
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.contains("CMJ"));
    }

    #[test]
    fn test_age_buffer_must_be_positive_integer() {
        let mut app = App::new(4);
        app.buffers = reference_buffers();
        app.buffers[Field::Age as usize] = "25.5".to_string();
        assert!(app.parse_profile().unwrap_err().contains("Age"));
    }

    #[test]
    fn test_save_then_load_roundtrip_through_form() {
        let name = temp_name("roundtrip");
        let _ = fs::remove_file(resolve_path(&name));

        let mut app = App::new(4);
        app.buffers = reference_buffers();
        app.filename = name.clone();
        app.save();

        let mut other = App::new(4);
        other.filename = name.clone();
        other.load();
        assert_eq!(other.parse_profile().unwrap(), app.parse_profile().unwrap());

        let _ = fs::remove_file(resolve_path(&name));
    }

    #[test]
    fn test_failed_load_leaves_buffers_untouched() {
        let name = temp_name("load_missing");
        let _ = fs::remove_file(resolve_path(&name));

        let mut app = App::new(4);
        app.buffers = reference_buffers();
        app.filename = name;
        let before = app.buffers.clone();
        app.load();

        assert_eq!(app.buffers, before);
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_slot_navigation_wraps_through_filename() {
        let mut app = App::new(4);
        assert_eq!(app.selected, 0);
        app.previous_slot();
        assert_eq!(app.selected, FILENAME_SLOT);
        app.next_slot();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_numeric_buffers_reject_letters() {
        let mut app = App::new(4);
        app.buffers[0].clear();
        app.insert_char('1');
        app.insert_char('x');
        app.insert_char('.');
        app.insert_char('5');
        assert_eq!(app.buffers[0], "1.5");
    }

    #[test]
    fn test_breakdown_requires_a_result() {
        let mut app = App::new(4);
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.flash_message.is_some());

        app.buffers = reference_buffers();
        app.calculate();
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Breakdown);
    }
}
