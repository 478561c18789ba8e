//! Renderer module
//!
//! Renders a ReportSet to different output formats: text, jsonl, json, md

use colored::Colorize;
use std::io::Write;

use crate::core::model::{Report, ReportSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for report sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a report set to a string
    pub fn render(&self, report_set: &ReportSet) -> String {
        match self.config.format {
            OutputFormat::Text => self.render_text(report_set),
            OutputFormat::Jsonl => self.render_jsonl(report_set),
            OutputFormat::Json => self.render_json(report_set),
            OutputFormat::Markdown => self.render_markdown(report_set),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, report_set: &ReportSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(report_set);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() && !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render as console text, one block per exercise
    fn render_text(&self, report_set: &ReportSet) -> String {
        let mut output = String::new();
        for report in &report_set.reports {
            output.push('\n');
            let header = format!("{} Exercise", report.exercise);
            output.push_str(&header.bold().to_string());
            output.push('\n');
            for line in &report.lines {
                output.push_str(line);
                output.push('\n');
            }
            match &report.error {
                Some(error) => {
                    let message = format!("  Error! {}", error.message);
                    output.push_str(&message.red().to_string());
                    output.push('\n');
                }
                None => output.push_str("  Done.\n"),
            }
        }
        output
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, report_set: &ReportSet) -> String {
        report_set
            .reports
            .iter()
            .filter_map(|report| {
                if self.config.pretty {
                    serde_json::to_string_pretty(report).ok()
                } else {
                    serde_json::to_string(report).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, report_set: &ReportSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&report_set.reports).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&report_set.reports).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, report_set: &ReportSet) -> String {
        let mut output = String::new();

        let failed: Vec<&Report> = report_set
            .reports
            .iter()
            .filter(|r| !r.is_success())
            .collect();

        if !failed.is_empty() {
            output.push_str("## Errors\n\n");
            for report in failed {
                if let Some(error) = &report.error {
                    output.push_str(&format!(
                        "- **{}** ({}): {}\n",
                        report.exercise, error.code, error.message
                    ));
                }
            }
            output.push('\n');
        }

        for report in &report_set.reports {
            output.push_str(&format!("## {}\n\n", report.exercise));
            if !report.lines.is_empty() {
                output.push_str("```\n");
                for line in &report.lines {
                    output.push_str(line);
                    output.push('\n');
                }
                output.push_str("```\n");
            }
            output.push('\n');
        }

        output
    }
}
