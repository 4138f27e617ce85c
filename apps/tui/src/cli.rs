use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "station-map", version, about = "Station map TUI")]
pub struct CliArgs {
    /// Print dataset stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the station dataset path
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Override the state geometry path
    #[arg(long, value_name = "PATH")]
    pub map: Option<String>,

    /// Initial bubble metric ("TSR" or "products")
    #[arg(long, value_name = "METRIC")]
    pub metric: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.data {
            std::env::set_var("STATION_DATA", path);
        }
        if let Some(path) = &self.map {
            std::env::set_var("STATION_MAP", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
