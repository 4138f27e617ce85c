use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_help_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Enter => {
            app.show_help = false;
        }
        _ => {}
    }
}
