use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

use crate::error::NormalizeError;
use crate::error::Result;

/// Configuration for log normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Consult the filesystem to confirm files exist and read snippets
    #[serde(default = "default_true")]
    pub resolve_files: bool,

    /// Directory that relative URIs are resolved against when reading files
    #[serde(default)]
    pub source_root: Option<PathBuf>,

    /// Slice snippet text out of the document when the region has none
    #[serde(default = "default_true")]
    pub extract_snippets: bool,

    /// Maximum snippet length in characters (0 = unlimited)
    #[serde(default = "default_max_snippet_chars")]
    pub max_snippet_chars: usize,

    /// Resolve the locations of one collection concurrently. Output order is
    /// preserved either way.
    #[serde(default)]
    pub concurrent_resolution: bool,

    /// Message shown for results that carry no usable message
    #[serde(default = "default_missing_message_text")]
    pub missing_message_text: String,
}

fn default_true() -> bool {
    true
}

fn default_max_snippet_chars() -> usize {
    4096
}

fn default_missing_message_text() -> String {
    "No Message Provided".to_string()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            resolve_files: default_true(),
            source_root: None,
            extract_snippets: default_true(),
            max_snippet_chars: default_max_snippet_chars(),
            concurrent_resolution: false,
            missing_message_text: default_missing_message_text(),
        }
    }
}

impl NormalizerConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.missing_message_text.trim().is_empty() {
            return Err(NormalizeError::InvalidConfig(
                "missing_message_text must not be blank".to_string(),
            ));
        }

        if self
            .source_root
            .as_ref()
            .is_some_and(|root| root.as_os_str().is_empty())
        {
            return Err(NormalizeError::InvalidConfig(
                "source_root must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
