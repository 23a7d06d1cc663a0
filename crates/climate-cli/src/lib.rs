//! Climate CLI - offline access to the scoring pipeline.
//!
//! - `score`: run the full pipeline for one coordinate
//! - `nearest`: list the closest safe zones to a coordinate

pub mod commands;

pub use commands::{execute, Cli, Command};
