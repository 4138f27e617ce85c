use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Logical canvas the projection renders into; the view transform pans and
/// zooms over this box.
pub const CANVAS_WIDTH: f64 = 1200.0;
pub const CANVAS_HEIGHT: f64 = 900.0;

/// Base projection parameters, enlarged 1.5x so the lower 48 fill the canvas.
pub const BASE_SCALE: f64 = 1000.0;
pub const MAP_SCALE: f64 = 1.5;
pub const BASE_TRANSLATE: (f64, f64) = (400.0, 250.0);

/// Bubble radius range in canvas pixels; the metric extent maps onto this.
pub const RADIUS_RANGE: [f64; 2] = [2.0, 36.0];

/// Entry transition for freshly bound markers.
pub const ENTER_DURATION_MS: u64 = 1250;
/// Retarget transition when the metric changes; staggered by marker index.
pub const UPDATE_DURATION_MS: u64 = 200;

pub const ZOOM_BOUNDS: [f64; 2] = [1.0, 10.0];
pub const ZOOM_STEP: f64 = 1.25;
/// Pan step per key press, in canvas pixels at zoom 1.
pub const PAN_STEP: f64 = 40.0;

/// Resource locations for the two fetches.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub stations: PathBuf,
    pub map: PathBuf,
}

/// Initializes the application configuration from .env / environment
/// variables, falling back to the conventional data directory.
pub fn init_app_config() -> AppPaths {
    dotenv().ok();

    AppPaths {
        stations: env::var("STATION_DATA")
            .map_or_else(|_| PathBuf::from("data/stations4.csv"), PathBuf::from),
        map: env::var("STATION_MAP").map_or_else(|_| PathBuf::from("data/us.json"), PathBuf::from),
    }
}

pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|value| value != "0")
}

/// Diagnostics go to stderr, gated on the DEBUG toggle; operator-facing
/// conditions use the in-UI status line instead.
pub fn debug_log(message: &str) {
    if debug_enabled() {
        eprintln!("[DEBUG] {message}");
    }
}
