use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{handle_input, input::select_filter, App};
use crate::config::{self, AppPaths, RADIUS_RANGE, ZOOM_STEP};
use crate::data::loader::{self, DataError, LoadedStations};
use crate::data::topology::{self, Outline};
use crate::domain::{Filter, Metric};
use crate::geo::scale::extent;
use crate::ui;
use crate::ui::screens::map::{cell_to_canvas, layout};
use crate::ui::widgets::nav;

/// Completion signal from one of the two background fetches. They race
/// independently and may land in either order; the base map and the markers
/// are separate visual layers with no ordering dependency.
#[derive(Debug)]
pub enum LoadEvent {
    Stations(Result<LoadedStations, DataError>),
    Outlines(Result<Vec<Outline>, DataError>),
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut loads: UnboundedReceiver<LoadEvent>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Apply whichever load results have arrived since the last frame
        while let Ok(load) = loads.try_recv() {
            apply_load(app, load);
        }

        // Advance animations
        app.update();

        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Handle events with improved error context
        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if key.kind != KeyEventKind::Release {
                        handle_input(app, key.code);
                    }
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => {
                    let size = terminal.size()?;
                    handle_mouse(app, Rect::new(0, 0, size.width, size.height), mouse);
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::FocusGained | Event::FocusLost | Event::Paste(_)) | Err(_) => {
                    // Ignore the rest
                }
            }
        }
    }
    Ok(())
}

/// Routes a load result into the app. Dataset success triggers the first
/// render; dataset failure is logged and leaves the map blank. A missing
/// base map stays silent, markers render regardless.
fn apply_load(app: &mut App, load: LoadEvent) {
    match load {
        LoadEvent::Stations(Ok(loaded)) => {
            app.status_message = if loaded.skipped > 0 {
                format!(
                    "Loaded {} stations ({} rows without usable coordinates skipped)",
                    loaded.stations.len(),
                    loaded.skipped
                )
            } else {
                format!("Loaded {} stations", loaded.stations.len())
            };
            app.set_stations(loaded);
        }
        LoadEvent::Stations(Err(e)) => {
            app.loading_stations = false;
            app.status_message = format!("Failed to load station data: {e}");
            config::debug_log(&format!("station load error: {e}"));
        }
        LoadEvent::Outlines(Ok(outlines)) => {
            app.set_outlines(&outlines);
        }
        LoadEvent::Outlines(Err(e)) => {
            app.loading_map = false;
            config::debug_log(&format!("map geometry error: {e}"));
        }
    }
}

fn handle_mouse(app: &mut App, frame: Rect, mouse: MouseEvent) {
    let layout = layout(frame);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let point = cell_to_canvas(app, layout.map, mouse.column, mouse.row);
            app.hover_at(point, (mouse.column, mouse.row));
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(filter) = nav::filter_at(layout.nav, mouse.column, mouse.row) {
                select_filter(app, filter);
            }
        }
        MouseEventKind::ScrollUp => app.view.zoom_by(ZOOM_STEP),
        MouseEventKind::ScrollDown => app.view.zoom_by(1.0 / ZOOM_STEP),
        _ => {}
    }
}

/// Run without a UI: load both resources inline and print dataset stats.
pub async fn run_headless(paths: &AppPaths, json: bool) -> Result<()> {
    let loaded = loader::load_stations(&paths.stations).await?;
    let outline_features = match topology::load_outlines(&paths.map).await {
        Ok(outlines) => Some(outlines.len()),
        Err(e) => {
            config::debug_log(&format!("map geometry error: {e}"));
            None
        }
    };

    let stats = build_headless_stats(&loaded, outline_features);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nStation Map Stats");
    println!("==================");
    println!("Stations: {}", stats.stations);
    println!("Skipped rows: {}", stats.skipped_rows);
    if let Some(count) = stats.outline_features {
        println!("State outlines: {count}");
    }

    println!("\nMetric extents:");
    for metric in &stats.metrics {
        match (metric.min, metric.max) {
            (Some(min), Some(max)) => println!(
                "- {}: {min} to {max} (radius {} to {})",
                metric.metric, metric.radius_min, metric.radius_max
            ),
            _ => println!("- {}: no usable values", metric.metric),
        }
    }

    println!("\nCategory membership:");
    for category in &stats.categories {
        println!("- {}: {}", category.category, category.members);
    }
}

fn build_headless_stats(
    loaded: &LoadedStations,
    outline_features: Option<usize>,
) -> HeadlessStats {
    let metrics = Metric::ALL
        .iter()
        .map(|&metric| {
            let domain = extent(loaded.stations.iter().map(|s| s.metric_value(metric)));
            MetricStats {
                metric: metric.field_name().to_string(),
                min: domain.map(|[min, _]| min),
                max: domain.map(|[_, max]| max),
                radius_min: RADIUS_RANGE[0],
                radius_max: RADIUS_RANGE[1],
            }
        })
        .collect();

    let categories = Filter::ALL
        .iter()
        .filter(|filter| filter.category_label().is_some())
        .map(|&filter| CategoryStats {
            category: filter
                .category_label()
                .unwrap_or_default()
                .to_string(),
            members: loaded
                .stations
                .iter()
                .filter(|station| station.is_member(filter))
                .count(),
        })
        .collect();

    HeadlessStats {
        stations: loaded.stations.len(),
        skipped_rows: loaded.skipped,
        outline_features,
        metrics,
        categories,
    }
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    stations: usize,
    skipped_rows: usize,
    outline_features: Option<usize>,
    metrics: Vec<MetricStats>,
    categories: Vec<CategoryStats>,
}

#[derive(serde::Serialize)]
struct MetricStats {
    metric: String,
    min: Option<f64>,
    max: Option<f64>,
    radius_min: f64,
    radius_max: f64,
}

#[derive(serde::Serialize)]
struct CategoryStats {
    category: String,
    members: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_SCALE, BASE_TRANSLATE, MAP_SCALE};
    use crate::geo::projection::AlbersUsa;

    fn fresh_app() -> App {
        App::new(AlbersUsa::new(
            BASE_SCALE * MAP_SCALE,
            (BASE_TRANSLATE.0 * MAP_SCALE, BASE_TRANSLATE.1 * MAP_SCALE),
        ))
    }

    fn loaded() -> LoadedStations {
        crate::data::loader::decode_stations(
            "\
name,longitude,latitude,TSR,total products,Core Publisher
WAMU-FM,-77.02,38.93,50,3,0
KQED-FM,-122.42,37.77,90,1,1
"
            .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn loads_may_complete_in_either_order() {
        // stations before outlines
        let mut app = fresh_app();
        apply_load(&mut app, LoadEvent::Stations(Ok(loaded())));
        apply_load(&mut app, LoadEvent::Outlines(Ok(vec![vec![
            (-100.0, 40.0),
            (-99.0, 41.0),
        ]])));
        assert_eq!(app.markers.len(), 2);
        assert!(app.outlines.is_some());

        // outlines before stations
        let mut app = fresh_app();
        apply_load(&mut app, LoadEvent::Outlines(Ok(vec![vec![
            (-100.0, 40.0),
            (-99.0, 41.0),
        ]])));
        apply_load(&mut app, LoadEvent::Stations(Ok(loaded())));
        assert_eq!(app.markers.len(), 2);
        assert!(app.outlines.is_some());
    }

    #[test]
    fn dataset_failure_leaves_the_map_blank_but_running() {
        let mut app = fresh_app();
        apply_load(
            &mut app,
            LoadEvent::Stations(Err(DataError::NotAFeatureCollection)),
        );
        assert!(app.running);
        assert!(app.stations.is_none());
        assert!(app.markers.is_empty());
        assert!(app.status_message.starts_with("Failed"));
    }

    #[test]
    fn map_failure_is_silent() {
        let mut app = fresh_app();
        apply_load(
            &mut app,
            LoadEvent::Outlines(Err(DataError::NotAFeatureCollection)),
        );
        assert!(app.outlines.is_none());
        assert!(app.status_message.is_empty());
        assert!(!app.loading_map);
    }

    #[test]
    fn headless_stats_cover_metrics_and_categories() {
        let stats = build_headless_stats(&loaded(), Some(12));
        assert_eq!(stats.stations, 2);
        assert_eq!(stats.metrics.len(), 2);
        assert_eq!(stats.metrics[0].min, Some(50.0));
        assert_eq!(stats.metrics[0].max, Some(90.0));
        assert_eq!(stats.metrics[1].min, Some(1.0));
        assert_eq!(stats.metrics[1].max, Some(3.0));

        // Core Publisher: only KQED is a member; the untracked categories
        // count everyone
        assert_eq!(stats.categories[0].members, 1);
        assert_eq!(stats.categories[1].members, 2);
        assert_eq!(stats.categories[2].members, 2);
    }
}
