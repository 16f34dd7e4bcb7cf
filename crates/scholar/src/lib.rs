//! Scholar command-line interface.
//!
//! The binary in `main.rs` only parses arguments and sets up logging;
//! everything a command does lives here so it can be driven from tests.

pub mod app;
pub mod commands;
