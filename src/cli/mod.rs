//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes defining commands, parsing arguments, wiring the configured service
//! together, and rendering insights for the terminal.

mod commands;

pub use commands::*;
