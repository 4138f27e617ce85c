// Export our modules for use in the binary and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod event;
pub mod geo;
pub mod terminal;
pub mod ui;

pub use domain::{Filter, Metric};
