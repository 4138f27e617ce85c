use crate::app::state::App;
use crate::config::{PAN_STEP, ZOOM_STEP};
use crate::domain::{Filter, Metric};
use crossterm::event::KeyCode;

pub fn handle_map_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Esc => {
            if app.hovered.is_some() {
                app.clear_hover();
            } else {
                app.running = false;
            }
        }
        KeyCode::F(1) | KeyCode::Char('?') => {
            app.show_help = true;
        }
        // Metric radio group; re-selecting the checked option re-renders,
        // the same as clicking a checked radio button.
        KeyCode::Char('t') => app.render(Metric::Tsr),
        KeyCode::Char('p') => app.render(Metric::Products),
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(filter) = Filter::from_index(c as usize - '1' as usize) {
                select_filter(app, filter);
            }
        }
        KeyCode::Tab => app.cycle_hover(1),
        KeyCode::BackTab => app.cycle_hover(-1),
        KeyCode::Char('+' | '=') => app.view.zoom_by(ZOOM_STEP),
        KeyCode::Char('-') => app.view.zoom_by(1.0 / ZOOM_STEP),
        KeyCode::Char('0') => app.view.reset(),
        KeyCode::Up => app.view.pan(0.0, -PAN_STEP),
        KeyCode::Down => app.view.pan(0.0, PAN_STEP),
        KeyCode::Left => app.view.pan(-PAN_STEP, 0.0),
        KeyCode::Right => app.view.pan(PAN_STEP, 0.0),
        _ => {}
    }
}

/// Filter control state machine: selecting the active control is a no-op;
/// selecting any other control transitions exclusively and re-applies the
/// filter.
pub fn select_filter(app: &mut App, filter: Filter) {
    if filter == app.active_filter {
        return;
    }
    app.switch_filter(filter);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_SCALE, BASE_TRANSLATE, MAP_SCALE};
    use crate::data::loader::LoadedStations;
    use crate::data::models::Station;
    use crate::geo::projection::AlbersUsa;

    fn app() -> App {
        let projection = AlbersUsa::new(
            BASE_SCALE * MAP_SCALE,
            (BASE_TRANSLATE.0 * MAP_SCALE, BASE_TRANSLATE.1 * MAP_SCALE),
        );
        let mut app = App::new(projection);
        app.set_stations(LoadedStations {
            stations: vec![
                Station {
                    name: "WAMU-FM".to_string(),
                    longitude: -77.02,
                    latitude: 38.93,
                    tsr: 50.0,
                    total_products: 3.0,
                    product_names: String::new(),
                    core_publisher: Some(0.0),
                    composer_pro: Some(1.0),
                    springboard: None,
                },
                Station {
                    name: "KQED-FM".to_string(),
                    longitude: -122.42,
                    latitude: 37.77,
                    tsr: 90.0,
                    total_products: 1.0,
                    product_names: String::new(),
                    core_publisher: Some(1.0),
                    composer_pro: Some(1.0),
                    springboard: None,
                },
            ],
            skipped: 0,
        });
        app
    }

    #[test]
    fn selecting_the_active_filter_is_a_no_op() {
        let mut app = app();
        handle_map_input(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_filter, Filter::CorePublisher);
        assert!(app.markers[0].hidden);

        // hide a marker the filter itself would keep visible; a real switch
        // would reset it
        app.markers[1].hidden = true;
        handle_map_input(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_filter, Filter::CorePublisher);
        assert!(app.markers[1].hidden);
    }

    #[test]
    fn selecting_another_filter_transitions_exclusively() {
        let mut app = app();
        handle_map_input(&mut app, KeyCode::Char('2'));
        handle_map_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_filter, Filter::ComposerPro);
        assert!(!app.markers[0].hidden);
    }

    #[test]
    fn metric_keys_drive_the_render_entry_point() {
        let mut app = app();
        handle_map_input(&mut app, KeyCode::Char('p'));
        assert_eq!(app.metric, Metric::Products);
        assert_eq!(app.scale.unwrap().domain(), [1.0, 3.0]);
        handle_map_input(&mut app, KeyCode::Char('t'));
        assert_eq!(app.metric, Metric::Tsr);
        assert_eq!(app.scale.unwrap().domain(), [50.0, 90.0]);
    }

    #[test]
    fn help_toggle_and_quit() {
        let mut app = app();
        handle_map_input(&mut app, KeyCode::F(1));
        assert!(app.show_help);
        app.show_help = false;
        handle_map_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
