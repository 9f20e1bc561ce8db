use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::error::SchemaError;
use crate::level::DefaultLevel;
use crate::level::Importance;
use crate::level::LogVersion;
use crate::level::ResultLevel;

/// Key/value pairs that provide additional information about an object.
pub type PropertyBag = serde_json::Map<String, Value>;

/// Top-level SARIF log.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SarifLog {
    /// URI of the JSON schema corresponding to the version.
    #[serde(rename = "$schema")]
    pub schema: Option<String>,

    pub version: LogVersion,

    pub runs: Vec<Run>,
}

impl SarifLog {
    pub fn from_json_str(json: &str) -> std::result::Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> std::result::Result<Self, SchemaError> {
        Ok(serde_json::from_slice(json)?)
    }
}

/// A single run of an analysis tool and the output of that run.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub tool: Tool,
    pub invocations: Option<Vec<Invocation>>,
    /// Maps base-id symbols to absolute URIs.
    pub original_uri_base_ids: Option<BTreeMap<String, String>>,
    pub results: Option<Vec<Result>>,
    pub resources: Option<Resources>,
    pub instance_guid: Option<String>,
    pub logical_id: Option<String>,
    pub description: Option<Message>,
    pub properties: Option<PropertyBag>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub full_name: Option<String>,
    pub version: Option<String>,
    pub semantic_version: Option<String>,
    pub file_version: Option<String>,
    pub download_uri: Option<String>,
    pub language: Option<String>,
    pub properties: Option<PropertyBag>,
}

/// Runtime environment of the analysis tool run.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    pub command_line: Option<String>,
    pub arguments: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub exit_code: Option<i64>,
    pub executable_location: Option<FileLocation>,
    pub working_directory: Option<String>,
    pub tool_execution_successful: Option<bool>,
    pub machine: Option<String>,
    pub account: Option<String>,
    pub properties: Option<PropertyBag>,
}

/// Location of a file, either absolute or relative to a base id.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLocation {
    pub uri: String,
    pub uri_base_id: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub physical_location: Option<PhysicalLocation>,
    pub fully_qualified_logical_name: Option<String>,
    pub message: Option<Message>,
    pub annotations: Option<Vec<Region>>,
    pub properties: Option<PropertyBag>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    /// Distinguishes this physical location from all others in the run.
    pub id: Option<i64>,
    pub file_location: FileLocation,
    pub region: Option<Region>,
    pub context_region: Option<Region>,
}

/// A region within a file. See [`Region::coordinates`] for the typed view.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub start_line: Option<u32>,
    pub start_column: Option<u32>,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
    pub char_offset: Option<u64>,
    pub char_length: Option<u64>,
    pub byte_offset: Option<u64>,
    pub byte_length: Option<u64>,
    pub snippet: Option<FileContent>,
    pub message: Option<Message>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub text: Option<String>,
    pub binary: Option<String>,
}

/// A message intended for the end user, given inline or by resource id.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: Option<String>,
    pub message_id: Option<String>,
    pub rich_text: Option<String>,
    pub rich_message_id: Option<String>,
    pub arguments: Option<Vec<String>>,
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.message_id.is_none()
            && self.rich_text.is_none()
            && self.rich_message_id.is_none()
    }
}

/// A file relevant to a result.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub description: Option<Message>,
    pub file_location: FileLocation,
    pub regions: Option<Vec<Region>>,
    pub rectangles: Option<Vec<Rectangle>>,
}

/// An area within an image, in the image's natural units.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub bottom: Option<f64>,
    pub right: Option<f64>,
    pub message: Option<Message>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFlow {
    pub message: Option<Message>,
    pub thread_flows: Vec<ThreadFlow>,
    pub properties: Option<PropertyBag>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadFlow {
    pub id: Option<String>,
    pub message: Option<Message>,
    pub locations: Vec<ThreadFlowLocation>,
    pub properties: Option<PropertyBag>,
}

/// A location visited while simulating or monitoring program execution.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadFlowLocation {
    pub step: Option<i64>,
    pub location: Option<Location>,
    pub kind: Option<String>,
    pub module: Option<String>,
    pub state: Option<Value>,
    pub nesting_level: Option<i64>,
    pub execution_order: Option<i64>,
    pub timestamp: Option<String>,
    pub importance: Option<Importance>,
    pub properties: Option<PropertyBag>,
}

/// Localizable strings and rule metadata for a run.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    pub message_strings: Option<BTreeMap<String, String>>,
    pub rules: Option<HashMap<String, Rule>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Result {
    pub rule_id: Option<String>,
    pub level: Option<ResultLevel>,
    pub message: Option<Message>,
    pub rule_message_id: Option<String>,
    pub analysis_target: Option<FileLocation>,
    pub locations: Option<Vec<Location>>,
    pub instance_guid: Option<String>,
    pub correlation_guid: Option<String>,
    pub code_flows: Option<Vec<CodeFlow>>,
    pub related_locations: Option<Vec<Location>>,
    pub attachments: Option<Vec<Attachment>>,
    pub work_item_uri: Option<String>,
    pub properties: Option<PropertyBag>,
}

/// Describes an analysis rule.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Optional here: rules without an id are accepted.
    pub id: Option<String>,
    pub name: Option<Message>,
    pub short_description: Option<Message>,
    pub full_description: Option<Message>,
    pub message_strings: Option<BTreeMap<String, String>>,
    pub rich_message_strings: Option<BTreeMap<String, String>>,
    pub configuration: Option<RuleConfiguration>,
    pub help_uri: Option<String>,
    pub help: Option<Message>,
    pub properties: Option<PropertyBag>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfiguration {
    pub enabled: Option<bool>,
    pub default_level: Option<DefaultLevel>,
    pub parameters: Option<PropertyBag>,
}
