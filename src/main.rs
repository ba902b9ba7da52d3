//! tfs CLI entrypoint.
//!
//! This is the main entrypoint for the tfs command-line tool.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tfs::cli::{Cli, Commands, OutputFormatter, PlanArgs};
use tfs::config::{ConfigParser, Settings};
use tfs::error::{ConfigError, Result};
use tfs::plan::{Buckets, Category, PlanSource, classify};
use tfs::render::DocumentRenderer;
use tfs::upload::{S3Uploader, SharedLink, publish_document};

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let formatter = OutputFormatter::new(cli.output);
    match run(cli, &formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            formatter.error(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Logs go to stderr. The interactive view owns the terminal, so it only
/// lets warnings through.
fn init_logging(cli: &Cli) {
    let filter = match (&cli.command, cli.verbose) {
        (Commands::Tui { .. }, _) => EnvFilter::new("warn"),
        (_, true) => EnvFilter::new("debug"),
        (_, false) => EnvFilter::new("info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatches the selected command.
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let parser = ConfigParser::new();
    parser.load_dotenv()?;
    let settings = parser.load(cli.config.as_deref())?;

    match cli.command {
        Commands::Tui { input } => cmd_tui(&settings, &input),
        Commands::Show { input, category } => {
            cmd_show(&settings, &input, category.as_deref(), formatter)
        }
        Commands::Web {
            input,
            out,
            s3_bucket,
            prefix,
            region,
            expiration_secs,
        } => {
            let mut settings = settings;
            if let Some(out) = out {
                settings.document.output = out;
            }
            if s3_bucket.is_some() {
                settings.upload.bucket = s3_bucket;
            }
            if prefix.is_some() {
                settings.upload.prefix = prefix;
            }
            if region.is_some() {
                settings.upload.region = region;
            }
            if let Some(secs) = expiration_secs {
                settings.upload.expiration_secs = secs;
            }
            cmd_web(&settings, &input, formatter)
        }
    }
}

/// Loads and classifies the plan named on the command line.
fn load_buckets(settings: &Settings, input: &PlanArgs) -> Result<Buckets> {
    let binary = input
        .terraform_bin
        .clone()
        .unwrap_or_else(|| settings.terraform.binary.clone());
    let raw_json = input.raw_json || settings.terraform.raw_json;

    let source = PlanSource::new(binary).with_raw_json(raw_json);
    let plan = source.load(&input.plan)?;
    info!(
        "Loaded {} resource changes from {}",
        plan.resource_changes.len(),
        input.plan.display()
    );

    Ok(classify(&plan.resource_changes))
}

/// Browse the plan interactively.
fn cmd_tui(settings: &Settings, input: &PlanArgs) -> Result<()> {
    let buckets = load_buckets(settings, input)?;
    tfs::tui::run(buckets)
}

/// Print the summary and diffs.
fn cmd_show(
    settings: &Settings,
    input: &PlanArgs,
    category: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let only = category
        .map(|name| {
            Category::parse(name).ok_or_else(|| {
                ConfigError::validation(
                    format!(
                        "unknown category '{name}' (expected one of: {})",
                        Category::ALL.map(Category::key).join(", ")
                    ),
                    "category",
                )
            })
        })
        .transpose()?;

    let buckets = load_buckets(settings, input)?;
    write_stdout(&formatter.format_show(&buckets, only))
}

/// Write the HTML report and optionally share it.
fn cmd_web(settings: &Settings, input: &PlanArgs, formatter: &OutputFormatter) -> Result<()> {
    settings.validate()?;
    let expiration = settings.upload.expiration();

    let buckets = load_buckets(settings, input)?;
    let html = DocumentRenderer::new().render(&buckets);

    let out: &PathBuf = &settings.document.output;
    std::fs::write(out, &html)?;
    info!("Report written to {}", out.display());

    let link = match settings.upload.target_bucket() {
        Some(bucket) => Some(upload_report(settings, bucket, html, expiration)?),
        None => {
            debug!("No bucket configured, skipping upload");
            None
        }
    };

    write_stdout(&formatter.format_report(out, link.as_ref()))
}

/// Uploads the report on a short-lived runtime.
fn upload_report(
    settings: &Settings,
    bucket: &str,
    html: String,
    expiration: Duration,
) -> Result<SharedLink> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let uploader = S3Uploader::new(bucket, settings.upload.region.as_deref()).await?;
        publish_document(
            &uploader,
            settings.upload.prefix.as_deref(),
            html,
            expiration,
            Utc::now(),
        )
        .await
    })
}

/// Writes command output to stdout.
fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
