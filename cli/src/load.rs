use anyhow::Context;
use anyhow::Result;
use clap::Args;
use sarif_explorer_normalize::LoadedLog;
use sarif_explorer_normalize::Normalizer;
use sarif_explorer_normalize::NormalizerConfig;
use sarif_explorer_schema::SarifLog;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Options shared by every command that loads a log.
#[derive(Debug, Args)]
pub struct LoadArgs {
    /// SARIF 2.0.0 log to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// TOML file with normalizer settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory relative URIs in the log are resolved against (defaults to
    /// the log's directory)
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Do not read source files (no existence checks, no snippets)
    #[arg(long)]
    pub no_resolve_files: bool,
}

impl LoadArgs {
    /// Settings from `--config` (or defaults) with command-line overrides
    /// applied on top. Without a source root from either, relative URIs
    /// resolve against the directory holding the log.
    pub async fn normalizer_config(&self) -> Result<NormalizerConfig> {
        let mut config = match &self.config {
            Some(path) => NormalizerConfig::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => NormalizerConfig::default(),
        };

        if let Some(root) = &self.source_root {
            config.source_root = Some(root.clone());
        }
        if config.source_root.is_none() {
            config.source_root = self
                .file
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf);
        }
        if self.no_resolve_files {
            config.resolve_files = false;
        }
        config.validate()?;
        Ok(config)
    }

    pub async fn load(&self) -> Result<LoadedLog> {
        let config = self.normalizer_config().await?;
        let log = read_sarif(&self.file).await?;
        let file_name = self.file.display().to_string();
        debug!("Normalizing {file_name} with {config:?}");

        Normalizer::new(config)
            .normalize_log(&log, &file_name, 0)
            .await
            .with_context(|| format!("Failed to normalize {file_name}"))
    }
}

/// Read and parse a SARIF log from disk.
pub async fn read_sarif(path: &Path) -> Result<SarifLog> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    SarifLog::from_json_slice(&bytes)
        .with_context(|| format!("{} is not a SARIF 2.0.0 log", path.display()))
}
