pub mod screens;

use crate::app::state::App;
use crossterm::event::KeyCode;

pub use screens::map::select_filter;

pub fn handle_input(app: &mut App, key: KeyCode) {
    screens::dispatch_input(app, key);
}
