//! Roster CLI Library
//!
//! Command-line front end for the users admin panel. The binary is a thin
//! wrapper; commands are exposed here so they can be tested against a mock
//! API.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::StdinConfirm;
pub use config::{ClientSettings, RosterConfig};
pub use error::{CliError, Result};
