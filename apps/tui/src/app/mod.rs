// App module for station-map
// Handles application state and the render/update pipeline

pub mod input;
pub mod markers;
pub mod state;

pub use input::handle_input;
pub use markers::Marker;
pub use state::{App, TooltipState, ViewTransform};
