use crate::profile::Field;
use crate::tui::app::{App, InputMode, FILENAME_SLOT};
use crate::tui::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

/// Fields per form column; the form lays out three columns of four.
const COLUMN_ROWS: usize = 4;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 18 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + spacer(1) + Form(fill) + Filename(1) + Result(1) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0]);
    render_form(frame, chunks[2], app);
    render_filename(frame, chunks[3], app);
    render_result(frame, chunks[4], app);
    render_status_bar(frame, chunks[5], app);

    match app.input_mode {
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Help => render_help_popup(frame),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "mGRADE Calculator",
            Style::default().fg(theme::TITLE_COLOR).bold(),
        ),
        Span::styled(
            "  enter the measurements below",
            Style::default().fg(theme::MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    for (col, chunk) in columns.iter().enumerate() {
        let mut lines = Vec::new();
        for row in 0..COLUMN_ROWS {
            let slot = col * COLUMN_ROWS + row;
            let field = Field::ALL[slot];
            let selected = app.selected == slot;

            let value = if selected {
                format!("{}|", app.buffers[slot])
            } else {
                app.buffers[slot].clone()
            };
            let value_style = if selected {
                theme::FIELD_SELECTED
            } else {
                Style::default()
            };

            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>6}: ", field.key()),
                    Style::default().fg(theme::FIELD_LABEL).bold(),
                ),
                Span::styled(value, value_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("        {}", field.caption()),
                Style::default().fg(theme::CAPTION_COLOR),
            )));
            lines.push(Line::from(""));
        }
        frame.render_widget(Paragraph::new(lines), *chunk);
    }
}

fn render_filename(frame: &mut Frame, area: Rect, app: &App) {
    let selected = app.selected == FILENAME_SLOT;
    let value = if selected {
        format!("{}|", app.filename)
    } else {
        app.filename.clone()
    };
    let value_style = if selected {
        theme::FIELD_SELECTED
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(
            "File name: ",
            Style::default().fg(theme::FIELD_LABEL).bold(),
        ),
        Span::styled(value, value_style),
        Span::styled(
            "  (.json appended if missing)",
            Style::default().fg(theme::CAPTION_COLOR),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.result {
        Some(result) => Line::from(vec![
            Span::styled("mGRADE: ", theme::HEADER_STYLE),
            Span::styled(
                crate::output::format_value(result.grade, app.precision),
                Style::default().fg(theme::RESULT_COLOR).bold(),
            ),
        ]),
        None => Line::from(Span::styled(
            "No grade calculated yet",
            Style::default().fg(theme::MUTED),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") || msg.starts_with("Calculation failed")
            || msg.starts_with("Cannot")
        {
            theme::FLASH_ERROR
        } else {
            theme::FLASH_SUCCESS
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("Tab", ":next field "),
            ("Enter", ":calculate "),
            ("^S", ":save "),
            ("^L", ":load "),
            ("^B", ":breakdown "),
            ("F1", ":help "),
            ("Esc", ":quit"),
        ];
        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme::STATUS_KEY_COLOR),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}

/// Render the intermediate-quantity overlay for the last computed grade
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(result) = &app.result else {
        return;
    };

    let popup_area = centered_rect_fixed(44, 16, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Grade Breakdown ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines: Vec<Line> = result
        .breakdown
        .entries()
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:>6} "),
                    Style::default().fg(theme::FIELD_LABEL).bold(),
                ),
                Span::raw(format!("= {value}")),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("mGRADE ", theme::HEADER_STYLE),
        Span::styled(
            format!(
                "= {}",
                crate::output::format_value(result.grade, app.precision)
            ),
            Style::default().fg(theme::RESULT_COLOR).bold(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(theme::MUTED),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect_fixed(50, 13, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Keyboard Shortcuts ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let entries = [
        ("Tab / Down    ", "Next field"),
        ("Shift-Tab / Up", "Previous field"),
        ("Enter         ", "Calculate mGRADE"),
        ("Ctrl-S        ", "Save profile to file"),
        ("Ctrl-L        ", "Load profile from file"),
        ("Ctrl-B        ", "Show grade breakdown"),
        ("F1            ", "Show/hide this help"),
        ("Esc / Ctrl-c  ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(Color::Cyan).bold()),
                Span::raw(format!("  {label}")),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme::MUTED),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}
