//! textanchor CLI library
//!
//! This library provides the command-line interface for locating text
//! fragments, stitching batch segments and rendering highlights.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use commands::Cli;
pub use error::{CliError, CliResult};
