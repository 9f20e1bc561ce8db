use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;

/// The SARIF format version of a log file. Only 2.0.0 is understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogVersion {
    #[serde(rename = "2.0.0")]
    V2,
}

/// Severity level of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ResultLevel {
    NotApplicable,
    Pass,
    Note,
    Warning,
    Error,
    Open,
}

/// Default severity declared by a rule's configuration.
///
/// Anything outside the four documented values deserializes to `Unknown`
/// instead of rejecting the whole log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultLevel {
    Note,
    Warning,
    Error,
    Open,
    #[serde(other)]
    Unknown,
}

impl DefaultLevel {
    /// Map a rule default onto the equivalent result level. Values without a
    /// counterpart fall back to [`ResultLevel::Warning`].
    pub fn to_result_level(self) -> ResultLevel {
        match self {
            DefaultLevel::Error => ResultLevel::Error,
            DefaultLevel::Warning => ResultLevel::Warning,
            DefaultLevel::Note => ResultLevel::Note,
            DefaultLevel::Open => ResultLevel::Open,
            DefaultLevel::Unknown => ResultLevel::Warning,
        }
    }
}

/// How important a thread-flow location is for understanding the flow.
/// Ordered from most to least important: essential, important, unimportant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Importance {
    Essential,
    #[default]
    Important,
    Unimportant,
}
