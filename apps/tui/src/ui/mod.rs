// UI module for station-map
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    let area = f.area();
    if app.show_help {
        screens::help::render_help(f, area);
    } else {
        screens::map::render_map(app, f);
    }
}
