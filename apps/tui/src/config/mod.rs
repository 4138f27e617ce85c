mod config;

pub use config::{
    debug_enabled, debug_log, init_app_config, AppPaths, BASE_SCALE, BASE_TRANSLATE, CANVAS_HEIGHT,
    CANVAS_WIDTH, ENTER_DURATION_MS, MAP_SCALE, PAN_STEP, RADIUS_RANGE, UPDATE_DURATION_MS,
    ZOOM_BOUNDS, ZOOM_STEP,
};
