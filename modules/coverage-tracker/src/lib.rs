pub mod cli;
pub mod config;
pub mod render;
pub mod tracker;

pub use config::TrackerConfig;
pub use tracker::{SearchBackend, SearchOutcome, Tracker};
