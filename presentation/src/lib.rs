//! Presentation layer for knobpanel
//!
//! This crate contains the CLI definitions, console formatters and the
//! live log display used while the generation script runs.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OverrideArgs, PresetCommand};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ConsoleLogSink;
