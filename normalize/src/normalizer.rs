use sarif_explorer_schema::Resources;
use sarif_explorer_schema::Run;
use sarif_explorer_schema::SarifLog;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use tracing::info;

use crate::config::NormalizerConfig;
use crate::documents::DocumentProvider;
use crate::documents::FsDocumentProvider;
use crate::error::Result;
use crate::location::LocationResolver;
use crate::log::LoadedLog;
use crate::model::ResultInfo;
use crate::model::RunId;
use crate::model::RunInfo;
use crate::result::normalize_result;
use crate::run::normalize_run;

/// Entry point of the pipeline: turns schema records into the display model.
pub struct Normalizer {
    config: NormalizerConfig,
    documents: Option<Arc<dyn DocumentProvider>>,
}

impl Normalizer {
    /// Create a normalizer. With `resolve_files` set, locations are checked
    /// against the local filesystem rooted at `source_root`.
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            documents: None,
        }
    }

    /// Replace the document source, e.g. with an editor's open buffers.
    pub fn with_document_provider(mut self, documents: Arc<dyn DocumentProvider>) -> Self {
        self.documents = Some(documents);
        self
    }

    /// Document source for one load. The filesystem provider is rebuilt on
    /// every call; its cache covers a single load.
    fn documents_for_load(&self) -> Option<Arc<dyn DocumentProvider>> {
        match &self.documents {
            Some(documents) => Some(Arc::clone(documents)),
            None if self.config.resolve_files => Some(Arc::new(FsDocumentProvider::new(
                self.config.source_root.clone(),
            ))),
            None => None,
        }
    }

    pub fn normalize_run(&self, run: &Run, run_id: RunId, sarif_file_name: &str) -> Result<RunInfo> {
        normalize_run(run, run_id, sarif_file_name)
    }

    pub async fn normalize_result(
        &self,
        result: &sarif_explorer_schema::Result,
        run_id: RunId,
        resources: Option<&Resources>,
        uri_base_ids: Option<&BTreeMap<String, String>>,
    ) -> ResultInfo {
        let documents = self.documents_for_load();
        let resolver = LocationResolver::new(uri_base_ids, documents.as_deref(), &self.config);
        normalize_result(&resolver, result, run_id, resources).await
    }

    /// Normalize every run of `log`, numbering runs from `first_run_id`.
    ///
    /// Fails only on malformed runs; the partially built model is discarded.
    pub async fn normalize_log(
        &self,
        log: &SarifLog,
        sarif_file_name: &str,
        first_run_id: RunId,
    ) -> Result<LoadedLog> {
        let mut loaded = LoadedLog {
            sarif_file_name: sarif_file_name.to_string(),
            runs: Vec::with_capacity(log.runs.len()),
            results: Vec::new(),
        };

        let documents = self.documents_for_load();
        for (run_id, run) in (first_run_id..).zip(log.runs.iter()) {
            let run_info = self.normalize_run(run, run_id, sarif_file_name)?;
            let resolver = LocationResolver::new(
                run.original_uri_base_ids.as_ref(),
                documents.as_deref(),
                &self.config,
            );
            let results = run.results.as_deref().unwrap_or_default();
            debug!(
                "Normalizing {} results of run {run_id} ({})",
                results.len(),
                run_info.tool_full_name
            );

            for result in results {
                loaded
                    .results
                    .push(normalize_result(&resolver, result, run_id, run.resources.as_ref()).await);
            }
            loaded.runs.push(run_info);
        }

        info!(
            "Loaded {sarif_file_name}: {} runs, {} results",
            loaded.runs.len(),
            loaded.results.len()
        );
        Ok(loaded)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}
