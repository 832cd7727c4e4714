//! Color constants and shared styles for the TUI

use ratatui::prelude::*;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const CAPTION_COLOR: Color = Color::DarkGray;
pub const FIELD_LABEL: Color = Color::Cyan;

pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY_COLOR: Color = Color::Cyan;
pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;

pub const RESULT_COLOR: Color = Color::Green;

pub const FIELD_SELECTED: Style = Style::new().add_modifier(Modifier::REVERSED);
pub const HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
