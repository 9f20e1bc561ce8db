//! The flat, display-ready model produced by normalization.

use sarif_explorer_schema::Importance;
use sarif_explorer_schema::PropertyBag;
use sarif_explorer_schema::RegionCoordinates;
use sarif_explorer_schema::ResultLevel;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// Identifier the caller assigns to each run of a loaded log.
pub type RunId = u32;

/// Command a presentation layer invokes to select a code-flow step.
pub const SELECT_STEP_COMMAND: &str = "sarif.codeFlow.selectStep";

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInfo {
    pub run_id: RunId,
    pub tool_name: String,
    pub tool_full_name: String,
    pub tool_version: Option<String>,
    pub cmd_line: Option<String>,
    pub tool_file_name: Option<String>,
    pub working_dir: Option<String>,
    pub additional_properties: Option<PropertyBag>,
    pub uri_base_ids: Option<BTreeMap<String, String>>,
    pub sarif_file_name: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInfo {
    pub run_id: RunId,
    /// `None` entries keep the positions of locations that could not be
    /// mapped. An absent `locations` member yields a single `None`.
    pub locations: Vec<Option<Location>>,
    pub assigned_location: Option<Location>,
    pub related_locs: Vec<Option<Location>>,
    pub attachments: Option<Vec<Attachment>>,
    pub code_flows: Vec<CodeFlow>,
    pub rule_id: Option<String>,
    pub rule_name: Option<String>,
    pub rule_help_uri: Option<String>,
    pub rule_description: Option<FormattedMessage>,
    pub severity_level: ResultLevel,
    pub message: FormattedMessage,
    pub additional_properties: Option<PropertyBag>,
}

impl ResultInfo {
    pub fn step_count(&self) -> usize {
        self.code_flows
            .iter()
            .flat_map(|flow| flow.threads.iter())
            .map(|thread| thread.steps.len())
            .sum()
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub description: Option<FormattedMessage>,
    pub file: Location,
    pub regions_of_interest: Option<Vec<Location>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFlow {
    pub message: Option<FormattedMessage>,
    pub threads: Vec<ThreadFlow>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadFlow {
    pub id: Option<String>,
    pub message: Option<FormattedMessage>,
    pub steps: Vec<Step>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub location: Option<Location>,
    pub importance: Importance,
    pub command: NavigationCommand,
    /// Sequence number declared by the producer, if any.
    pub step: Option<i64>,
    pub kind: Option<String>,
    pub module: Option<String>,
    pub nesting_level: Option<i64>,
    pub execution_order: Option<i64>,
    pub timestamp: Option<String>,
    pub state: Option<Value>,
}

/// Position of a step inside a result's code flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRef {
    pub code_flow: usize,
    pub thread_flow: usize,
    pub step: usize,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCommand {
    pub command: String,
    pub title: String,
    pub arguments: StepRef,
    pub target: Option<Location>,
}

/// Whether the file behind a location was checked and found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    /// No document provider was consulted.
    #[default]
    Unchecked,
    Mapped,
    Missing,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Physical-location id, unique within a run.
    pub id: Option<i64>,
    pub uri: String,
    /// `None` for whole-file references and for files that could not be read.
    pub range: Option<Range>,
    pub file_status: FileStatus,
    pub snippet: Option<String>,
    pub message: Option<FormattedMessage>,
    pub logical_name: Option<String>,
}

impl Location {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            id: None,
            uri: uri.into(),
            range: None,
            file_status: FileStatus::Unchecked,
            snippet: None,
            message: None,
            logical_name: None,
        }
    }

    pub fn file_missing(&self) -> bool {
        self.file_status == FileStatus::Missing
    }
}

/// A resolved range. Exactly one coordinate system per range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Range {
    /// 1-based, inclusive. `end_column` is `None` when the range runs to the
    /// end of `end_line` and the line length is not known.
    LineColumn {
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: Option<u32>,
    },
    CharOffset {
        offset: u64,
        length: u64,
    },
    ByteOffset {
        offset: u64,
        length: u64,
    },
}

impl Range {
    pub fn from_coordinates(coordinates: RegionCoordinates) -> Option<Self> {
        match coordinates {
            RegionCoordinates::LineColumn {
                start_line,
                start_column,
                end_line,
                end_column,
            } => Some(Range::LineColumn {
                start_line,
                start_column,
                end_line,
                end_column,
            }),
            RegionCoordinates::CharOffset { offset, length } => {
                Some(Range::CharOffset { offset, length })
            }
            RegionCoordinates::ByteOffset { offset, length } => {
                Some(Range::ByteOffset { offset, length })
            }
            RegionCoordinates::WholeFile => None,
        }
    }

    pub fn start_line(&self) -> Option<u32> {
        match self {
            Range::LineColumn { start_line, .. } => Some(*start_line),
            Range::CharOffset { .. } | Range::ByteOffset { .. } => None,
        }
    }
}

/// Display text plus the structure needed to render embedded links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMessage {
    /// Plain text with every link reduced to its label.
    pub text: String,
    pub segments: Vec<MessageSegment>,
}

impl FormattedMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            segments: vec![MessageSegment::Text { text: text.clone() }],
            text,
        }
    }

    pub fn has_links(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| !matches!(segment, MessageSegment::Text { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageSegment {
    Text { text: String },
    LocationLink { text: String, location: Box<Location> },
    UriLink { text: String, uri: String },
}

impl MessageSegment {
    pub fn text(&self) -> &str {
        match self {
            MessageSegment::Text { text }
            | MessageSegment::LocationLink { text, .. }
            | MessageSegment::UriLink { text, .. } => text,
        }
    }
}
