use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

/// Source of document text for resolved locations.
///
/// Returning `None` means the document is unreachable; the location is then
/// kept with its URI only.
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    async fn read_document(&self, uri: &str) -> Option<Arc<str>>;
}

/// Reads documents from the local filesystem, caching each file (or its
/// absence) for the lifetime of the provider. [`crate::Normalizer`] builds a
/// fresh one per load.
pub struct FsDocumentProvider {
    source_root: Option<PathBuf>,
    cache: Mutex<HashMap<String, Option<Arc<str>>>>,
}

impl FsDocumentProvider {
    pub fn new(source_root: Option<PathBuf>) -> Self {
        Self {
            source_root,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Map a resolved URI onto a local path. Non-file schemes map to nothing.
    pub fn uri_to_path(&self, uri: &str) -> Option<PathBuf> {
        let path = match Url::parse(uri) {
            Ok(url) if url.scheme() == "file" => url.to_file_path().ok()?,
            // `C:\src\main.c` parses with a one-letter scheme.
            Ok(url) if url.scheme().len() == 1 => PathBuf::from(uri),
            Ok(_) => return None,
            Err(_) => PathBuf::from(uri),
        };

        if path.is_relative() {
            if let Some(root) = &self.source_root {
                return Some(root.join(path));
            }
        }
        Some(path)
    }

    pub async fn cached_documents(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn read_path(path: &Path) -> Option<Arc<str>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Some(Arc::from(String::from_utf8_lossy(&bytes).as_ref())),
            Err(e) => {
                debug!("Could not read {}: {e}", path.display());
                None
            }
        }
    }
}

#[async_trait]
impl DocumentProvider for FsDocumentProvider {
    async fn read_document(&self, uri: &str) -> Option<Arc<str>> {
        if let Some(entry) = self.cache.lock().await.get(uri) {
            return entry.clone();
        }

        let text = match self.uri_to_path(uri) {
            Some(path) => Self::read_path(&path).await,
            None => {
                debug!("No local path for {uri}");
                None
            }
        };

        self.cache
            .lock()
            .await
            .insert(uri.to_string(), text.clone());
        text
    }
}
