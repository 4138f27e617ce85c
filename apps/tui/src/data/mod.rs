// Data layer: the station dataset and the state boundary geometry.
// Both are fetched once at startup and never reloaded.

pub mod loader;
pub mod models;
pub mod topology;

pub use loader::{DataError, LoadedStations};
pub use models::Station;
pub use topology::Outline;
