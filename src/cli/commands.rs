//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tfs - Terraform plan analyzer.
#[derive(Parser, Debug)]
#[command(name = "tfs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "TFS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Plan input shared by every command.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Plan file (binary plan or its JSON rendering).
    pub plan: PathBuf,

    /// Planning tool binary used for `show -json`.
    #[arg(long)]
    pub terraform_bin: Option<String>,

    /// Read the plan file as JSON without invoking the planning tool.
    #[arg(long)]
    pub raw_json: bool,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the plan in an interactive terminal view.
    Tui {
        /// Plan input.
        #[command(flatten)]
        input: PlanArgs,
    },

    /// Print a summary and every resource diff.
    Show {
        /// Plan input.
        #[command(flatten)]
        input: PlanArgs,

        /// Only show one category (create, destroy, replace, update, import).
        #[arg(long)]
        category: Option<String>,
    },

    /// Generate a shareable HTML report, optionally uploading it to S3.
    Web {
        /// Plan input.
        #[command(flatten)]
        input: PlanArgs,

        /// Where to write the report.
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,

        /// S3 bucket to upload the report to.
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Key prefix inside the bucket.
        #[arg(long)]
        prefix: Option<String>,

        /// AWS region of the bucket.
        #[arg(long)]
        region: Option<String>,

        /// Lifetime of the shared link in seconds.
        #[arg(long)]
        expiration_secs: Option<u64>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}
