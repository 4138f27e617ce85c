use clap::Parser;
use color_eyre::Result;

use station_map::app::App;
use station_map::cli::CliArgs;
use station_map::config;
use station_map::data::{loader, topology};
use station_map::domain::Metric;
use station_map::event::{self, LoadEvent};
use station_map::geo::projection::AlbersUsa;
use station_map::terminal;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let paths = config::init_app_config();

    // Run in headless mode when asked to, or when there is no terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&paths, args.json).await;
    }

    // The projection must exist before the view reads it during init
    let projection = AlbersUsa::new(
        config::BASE_SCALE * config::MAP_SCALE,
        (
            config::BASE_TRANSLATE.0 * config::MAP_SCALE,
            config::BASE_TRANSLATE.1 * config::MAP_SCALE,
        ),
    );

    // Initialize application state
    let mut app = App::new(projection);
    app.metric = Metric::resolve(args.metric.as_deref().unwrap_or("TSR"));

    // Kick off the two fetches; they are independent and may complete in
    // either order. Results drain into the event loop.
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let stations_tx = tx.clone();
    let stations_path = paths.stations.clone();
    tokio::spawn(async move {
        let _ = stations_tx.send(LoadEvent::Stations(
            loader::load_stations(&stations_path).await,
        ));
    });
    let map_path = paths.map.clone();
    tokio::spawn(async move {
        let _ = tx.send(LoadEvent::Outlines(topology::load_outlines(&map_path).await));
    });

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, rx).await;

    // Restore terminal
    terminal::cleanup(true, true);

    // Return the result
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
