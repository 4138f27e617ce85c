pub mod help;
pub mod map;

use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.show_help {
        help::handle_help_input(app, key);
    } else {
        map::handle_map_input(app, key);
    }
}
