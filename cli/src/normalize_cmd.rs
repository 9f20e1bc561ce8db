use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use sarif_explorer_normalize::FileStatus;
use sarif_explorer_normalize::LoadedLog;
use sarif_explorer_normalize::Location;
use sarif_explorer_normalize::Range;
use sarif_explorer_schema::ResultLevel;
use std::fmt::Write as _;

use crate::load::LoadArgs;

#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Parser)]
pub struct NormalizeCommand {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Select the output format.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub output_format: OutputFormat,
}

impl NormalizeCommand {
    pub async fn run(self) -> Result<()> {
        let loaded = self.load.load().await?;
        match self.output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&loaded)
                    .context("Failed to serialize the normalized log")?;
                println!("{json}");
            }
            OutputFormat::Text => print!("{}", render_text(&loaded)),
        }
        Ok(())
    }
}

/// Human-readable summary: one header per run, one line per result.
pub fn render_text(loaded: &LoadedLog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} runs, {} results",
        loaded.sarif_file_name.bold(),
        loaded.runs.len(),
        loaded.result_count()
    );

    for run in &loaded.runs {
        let _ = writeln!(out, "run {} {}", run.run_id, run.tool_full_name.bright_blue());
        if let Some(cmd_line) = &run.cmd_line {
            let _ = writeln!(out, "  {} {cmd_line}", "$".dimmed());
        }

        for result in loaded.results_for_run(run.run_id) {
            let rule = result.rule_id.as_deref().unwrap_or("-");
            let _ = writeln!(
                out,
                "  {} {rule} {}",
                level_label(result.severity_level),
                result.message.text
            );
            if let Some(location) = &result.assigned_location {
                let _ = writeln!(out, "      at {}", describe_location(location));
            }
            let steps = result.step_count();
            if steps > 0 {
                let _ = writeln!(
                    out,
                    "      {} code flows, {steps} steps",
                    result.code_flows.len()
                );
            }
        }
    }
    out
}

fn level_label(level: ResultLevel) -> String {
    let label = format!("{:<13}", level.to_string());
    match level {
        ResultLevel::Error => label.red().to_string(),
        ResultLevel::Warning => label.yellow().to_string(),
        ResultLevel::Note | ResultLevel::Open => label.cyan().to_string(),
        ResultLevel::Pass | ResultLevel::NotApplicable => label.dimmed().to_string(),
    }
}

/// `uri:line:column`, or `uri` for whole-file and offset ranges.
pub fn describe_location(location: &Location) -> String {
    let mut text = match location.range {
        Some(Range::LineColumn {
            start_line,
            start_column,
            ..
        }) => format!("{}:{start_line}:{start_column}", location.uri),
        Some(Range::CharOffset { offset, .. }) => format!("{} (char {offset})", location.uri),
        Some(Range::ByteOffset { offset, .. }) => format!("{} (byte {offset})", location.uri),
        None => location.uri.clone(),
    };
    if location.file_status == FileStatus::Missing {
        text.push_str(" (file not found)");
    }
    text
}
