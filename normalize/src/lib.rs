/*!
# SARIF Explorer Normalize

Turns SARIF 2.0.0 runs and results into a flat, display-ready model.

## Features

- **Rule binding**: results pick up rule name, help link, description and
  configured severity through the run's rule dictionary
- **Precedence chains**: severity and message fall back through the result,
  the rule and fixed defaults
- **Location resolution**: base-URI ids, typed ranges, file existence and
  snippets, with output order matching input order
- **Message formatting**: `{N}` arguments and `[label](target)` links to
  result locations or external URIs
- **Code flows**: flow → thread → step hierarchy with importance and a
  ready-to-invoke navigation command per step

## Architecture

```text
SarifLog
    │
    ├──> Run Normalizer ──────────────> RunInfo
    │
    └──> Result Normalizer ───────────> ResultInfo
         ├─> Location Resolver
         │    └─> DocumentProvider (filesystem, editor buffers, ...)
         ├─> Code-Flow Normalizer
         └─> Message Formatter
```

## Example

```rust,no_run
use sarif_explorer_normalize::{Normalizer, NormalizerConfig};
use sarif_explorer_schema::SarifLog;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NormalizerConfig {
        source_root: Some(PathBuf::from("./my-project")),
        ..Default::default()
    };

    let text = std::fs::read_to_string("scan.sarif")?;
    let log = SarifLog::from_json_str(&text)?;
    let loaded = Normalizer::new(config).normalize_log(&log, "scan.sarif", 0).await?;

    for result in &loaded.results {
        println!("{}: {}", result.severity_level, result.message.text);
    }

    Ok(())
}
```
*/

mod code_flow;
mod config;
mod documents;
mod error;
mod location;
mod log;
mod message;
mod model;
mod normalizer;
mod ordered;
mod result;
mod run;

pub use code_flow::normalize_code_flows;
pub use config::NormalizerConfig;
pub use documents::{DocumentProvider, FsDocumentProvider};
pub use error::{NormalizeError, Result};
pub use location::{LocationResolver, extract_snippet, join_base_uri};
pub use log::LoadedLog;
pub use message::{StringTable, format_message, format_text, lookup_message_string, substitute_arguments};
pub use model::{
    Attachment, CodeFlow, FileStatus, FormattedMessage, Location, MessageSegment,
    NavigationCommand, Range, ResultInfo, RunId, RunInfo, SELECT_STEP_COMMAND, Step, StepRef,
    ThreadFlow,
};
pub use normalizer::Normalizer;
pub use result::normalize_result;
pub use run::{normalize_run, tool_full_name};
