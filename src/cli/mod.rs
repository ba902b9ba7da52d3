//! CLI module for the tfs plan analyzer.
//!
//! This module provides the command-line interface for browsing, printing
//! and publishing plans.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat, PlanArgs};
pub use output::OutputFormatter;
