pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 250ms tick drives flash message expiry
    let mut events = EventHandler::new(250);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                // Quit
                KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('c') if ctrl => app.should_quit = true,

                // Actions
                KeyCode::Enter => app.calculate(),
                KeyCode::Char('s') if ctrl => app.save(),
                KeyCode::Char('l') if ctrl => app.load(),
                KeyCode::Char('b') if ctrl => app.show_breakdown(),
                KeyCode::F(1) => app.show_help(),

                // Field navigation
                KeyCode::Tab | KeyCode::Down => app.next_slot(),
                KeyCode::BackTab | KeyCode::Up => app.previous_slot(),

                // Editing
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) if !ctrl => app.insert_char(c),

                _ => {}
            }
        }
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.dismiss_overlay(),
            KeyCode::Char('b') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.dismiss_overlay()
            }
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_overlay();
        }
    }
}
