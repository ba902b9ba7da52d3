//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::plan::{Buckets, Category};
use crate::render::{LineStyle, RenderedBlock, ResourceRenderer};
use crate::upload::SharedLink;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Category row for table display.
#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    label: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'static str,
    #[tabled(rename = "Resources")]
    count: usize,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the category summary.
    #[must_use]
    pub fn format_summary(&self, buckets: &Buckets) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&SummaryJson::new(buckets, None)).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_summary_text(buckets),
        }
    }

    /// Formats the summary followed by every rendered block, optionally
    /// limited to one category. JSON output lists addresses only.
    #[must_use]
    pub fn format_show(&self, buckets: &Buckets, only: Option<Category>) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&SummaryJson::new(buckets, only)).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = Self::format_summary_text(buckets);
                let renderer = ResourceRenderer::new();

                for (category, changes) in buckets.iter() {
                    if only.is_some_and(|c| c != category) {
                        continue;
                    }
                    for change in changes {
                        output.push('\n');
                        output.push_str(&Self::format_block(&renderer.render(change)));
                    }
                }

                output
            }
        }
    }

    /// Formats the result of the `web` command.
    #[must_use]
    pub fn format_report(&self, path: &Path, link: Option<&SharedLink>) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = ReportJson {
                    output: path.display().to_string(),
                    url: link.map(|l| l.url.clone()),
                    expires_in_secs: link.map(|l| l.expires_in.as_secs()),
                };
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = format!("{} Report written to {}\n", "✓".green(), path.display());
                if let Some(link) = link {
                    let _ = writeln!(
                        output,
                        "{} Shared link (valid for {}s):\n{}",
                        "✓".green(),
                        link.expires_in.as_secs(),
                        link.url
                    );
                }
                output
            }
        }
    }

    /// Formats a rendered block with terminal colors.
    #[must_use]
    pub fn format_block(block: &RenderedBlock) -> String {
        let mut output = String::new();
        for line in &block.lines {
            let text = match line.style {
                LineStyle::Heading => line.text.bold().to_string(),
                LineStyle::Plain => line.text.clone(),
                LineStyle::Tinted(category) => match category.diff_color() {
                    Some((r, g, b)) => line.text.truecolor(r, g, b).to_string(),
                    None => line.text.clone(),
                },
            };
            output.push_str(&text);
            output.push('\n');
        }
        output
    }

    /// Formats the summary as a table.
    fn format_summary_text(buckets: &Buckets) -> String {
        if buckets.is_empty() {
            return format!(
                "{} No changes. Infrastructure matches the configuration.\n",
                "✓".green()
            );
        }

        let rows: Vec<CategoryRow> = buckets
            .iter()
            .map(|(category, changes)| CategoryRow {
                label: category.label(),
                symbol: category.symbol(),
                count: changes.len(),
            })
            .collect();

        let mut output = String::from("\nPlan Summary\n");
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        let _ = write!(
            output,
            "\nPlan: {} to create, {} to replace, {} to update, {} to destroy\n",
            Self::colored_count(buckets, Category::Create),
            Self::colored_count(buckets, Category::Replace),
            Self::colored_count(buckets, Category::Update),
            Self::colored_count(buckets, Category::Destroy)
        );

        output
    }

    fn colored_count(buckets: &Buckets, category: Category) -> String {
        let (r, g, b) = category.color();
        buckets.len(category).to_string().truecolor(r, g, b).to_string()
    }

    /// Prints an error message to stderr.
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({ "status": "error", "message": message });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            }
            OutputFormat::Text => {
                eprintln!("{} {message}", "✗".red());
            }
        }
    }
}

// JSON serialization helpers

#[derive(Serialize)]
struct SummaryJson {
    total: usize,
    categories: BTreeMap<&'static str, CategoryJson>,
}

#[derive(Serialize)]
struct CategoryJson {
    count: usize,
    addresses: Vec<String>,
}

impl SummaryJson {
    fn new(buckets: &Buckets, only: Option<Category>) -> Self {
        let categories = buckets
            .iter()
            .filter(|(category, _)| only.is_none_or(|c| c == *category))
            .map(|(category, changes)| {
                (
                    category.key(),
                    CategoryJson {
                        count: changes.len(),
                        addresses: changes.iter().map(|c| c.address.clone()).collect(),
                    },
                )
            })
            .collect();

        Self {
            total: buckets.total(),
            categories,
        }
    }
}

#[derive(Serialize)]
struct ReportJson {
    output: String,
    url: Option<String>,
    expires_in_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{AttributeChange, PlanValue, ResourceChange, classify};
    use std::path::PathBuf;
    use std::time::Duration;

    fn sample() -> Buckets {
        classify(&[
            ResourceChange::new("t.a", "t", "a", &["create"]).with_attribute(
                "x",
                AttributeChange::new(None, Some(PlanValue::from("a")), false),
            ),
            ResourceChange::new("t.b", "t", "b", &["update"]).with_attribute(
                "x",
                AttributeChange::new(Some(PlanValue::from("1")), Some(PlanValue::from("2")), false),
            ),
        ])
    }

    #[test]
    fn test_text_show_contains_table_and_blocks() {
        let output = OutputFormatter::new(OutputFormat::Text).format_show(&sample(), None);
        assert!(output.contains("Plan Summary"));
        assert!(output.contains("CREATE"));
        assert!(output.contains("# t.a will be created"));
        assert!(output.contains("      + x = \"a\""));
        assert!(output.contains("# t.b will be updated in-place"));
    }

    #[test]
    fn test_show_filters_category() {
        let output = OutputFormatter::new(OutputFormat::Text)
            .format_show(&sample(), Some(Category::Update));
        assert!(!output.contains("# t.a will be created"));
        assert!(output.contains("# t.b will be updated in-place"));
    }

    #[test]
    fn test_json_summary() {
        let output = OutputFormatter::new(OutputFormat::Json).format_summary(&sample());
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["categories"]["create"]["addresses"][0], "t.a");
        assert_eq!(json["categories"]["import"]["count"], 0);
    }

    #[test]
    fn test_json_show_respects_filter() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_show(&sample(), Some(Category::Create));
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(json["categories"].get("update").is_none());
        assert_eq!(json["categories"]["create"]["count"], 1);
    }

    #[test]
    fn test_empty_plan_text() {
        let output = OutputFormatter::new(OutputFormat::Text).format_summary(&Buckets::default());
        assert!(output.contains("No changes"));
    }

    #[test]
    fn test_text_report_without_link() {
        colored::control::set_override(false);
        let output = OutputFormatter::new(OutputFormat::Text)
            .format_report(&PathBuf::from("tfs.html"), None);
        assert_eq!(output, "✓ Report written to tfs.html\n");
    }

    #[test]
    fn test_json_report() {
        let link = SharedLink {
            url: String::from("https://example.test/r.html"),
            expires_in: Duration::from_secs(900),
        };
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_report(&PathBuf::from("tfs.html"), Some(&link));
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["output"], "tfs.html");
        assert_eq!(json["url"], "https://example.test/r.html");
        assert_eq!(json["expires_in_secs"], 900);
    }
}
