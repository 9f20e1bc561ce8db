use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use sarif_explorer_code_flow_lens::CodeFlowLensProvider;
use sarif_explorer_code_flow_lens::SessionHost;
use sarif_explorer_code_flow_lens::StepLens;
use sarif_explorer_code_flow_lens::Verbosity;
use sarif_explorer_normalize::NavigationCommand;
use sarif_explorer_normalize::Range;
use sarif_explorer_schema::Importance;
use serde::Serialize;
use std::fmt::Write as _;

use crate::load::LoadArgs;
use crate::normalize_cmd::OutputFormat;

#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum VerbosityArg {
    Essential,
    #[default]
    Important,
    Unimportant,
}

impl From<VerbosityArg> for Verbosity {
    fn from(value: VerbosityArg) -> Self {
        match value {
            VerbosityArg::Essential => Importance::Essential,
            VerbosityArg::Important => Importance::Important,
            VerbosityArg::Unimportant => Importance::Unimportant,
        }
    }
}

#[derive(Debug, Parser)]
pub struct StepsCommand {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Index of the result (across all runs, in file order)
    #[arg(long = "result", value_name = "INDEX")]
    pub result_index: usize,

    /// Document URI, exactly as it appears in the normalized log
    #[arg(long = "document", value_name = "URI")]
    pub document_uri: String,

    /// Lowest step importance to show
    #[arg(long, value_enum, default_value_t = VerbosityArg::Important)]
    pub verbosity: VerbosityArg,

    /// Select the output format.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LensOutput<'a> {
    range: Option<Range>,
    command: &'a NavigationCommand,
}

impl StepsCommand {
    pub async fn run(self) -> Result<()> {
        let loaded = self.load.load().await?;

        let mut host = SessionHost::new();
        let session = host.load(loaded);
        session.set_verbosity(self.verbosity.into());
        session
            .select_result(self.result_index)
            .context("Cannot select result")?;

        let lenses = CodeFlowLensProvider::new().provide(&session, &self.document_uri);
        match self.output_format {
            OutputFormat::Json => {
                let output: Vec<LensOutput<'_>> = lenses
                    .iter()
                    .map(|lens| LensOutput {
                        range: lens.range,
                        command: &lens.command,
                    })
                    .collect();
                let json = serde_json::to_string_pretty(&output)
                    .context("Failed to serialize step markers")?;
                println!("{json}");
            }
            OutputFormat::Text => print!("{}", render_text(&lenses)),
        }
        Ok(())
    }
}

/// One line per marker: `line:column  title`.
pub fn render_text(lenses: &[StepLens]) -> String {
    let mut out = String::new();
    for lens in lenses {
        let position = match lens.range {
            Some(Range::LineColumn {
                start_line,
                start_column,
                ..
            }) => format!("{start_line}:{start_column}"),
            Some(Range::CharOffset { offset, .. }) => format!("char {offset}"),
            Some(Range::ByteOffset { offset, .. }) => format!("byte {offset}"),
            None => "-".to_string(),
        };
        let _ = writeln!(out, "{position:<10} {}", lens.command.title);
    }
    out
}
