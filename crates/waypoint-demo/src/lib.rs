#![forbid(unsafe_code)]

//! Command-line front end for Waypoint.
//!
//! Owns logging initialisation; the library crates only emit `tracing`
//! events.

pub mod classify;
pub mod cli;
pub mod error;
pub mod logging;
pub mod scale;
pub mod walkthrough;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{DemoError, Result};
