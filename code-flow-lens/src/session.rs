use sarif_explorer_normalize::LoadedLog;
use sarif_explorer_normalize::ResultInfo;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::error::LensError;
use crate::error::Result;
use crate::verbosity::Verbosity;

/// What the user currently has selected in an [`ExplorerSession`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Index into [`LoadedLog::results`].
    pub active_result: Option<usize>,
    pub verbosity: Verbosity,
    /// Incremented on every change that affects what is presented.
    pub generation: u64,
}

/// The state of one loaded log as seen by presentation layers.
///
/// Every effective mutation is published through a watch channel, so views
/// holding a receiver from [`ExplorerSession::subscribe`] know when to
/// recompute.
#[derive(Debug)]
pub struct ExplorerSession {
    log: Arc<LoadedLog>,
    selection: watch::Sender<Selection>,
}

impl ExplorerSession {
    pub fn new(log: Arc<LoadedLog>) -> Self {
        Self::with_verbosity(log, Verbosity::default())
    }

    pub fn with_verbosity(log: Arc<LoadedLog>, verbosity: Verbosity) -> Self {
        let (selection, _) = watch::channel(Selection {
            active_result: None,
            verbosity,
            generation: 0,
        });
        Self { log, selection }
    }

    pub fn selection(&self) -> Selection {
        *self.selection.borrow()
    }

    pub fn verbosity(&self) -> Verbosity {
        self.selection.borrow().verbosity
    }

    pub fn active_result(&self) -> Option<&ResultInfo> {
        let index = self.selection.borrow().active_result?;
        self.log.results.get(index)
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.selection.subscribe()
    }

    pub fn select_result(&self, index: usize) -> Result<()> {
        let count = self.log.result_count();
        if index >= count {
            return Err(LensError::ResultOutOfRange { index, count });
        }
        self.update(|selection| {
            let changed = selection.active_result != Some(index);
            selection.active_result = Some(index);
            changed
        });
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.update(|selection| selection.active_result.take().is_some());
    }

    pub fn set_verbosity(&self, verbosity: Verbosity) {
        self.update(|selection| {
            let changed = selection.verbosity != verbosity;
            selection.verbosity = verbosity;
            changed
        });
    }

    fn update(&self, modify: impl FnOnce(&mut Selection) -> bool) {
        let notified = self.selection.send_if_modified(|selection| {
            if !modify(selection) {
                return false;
            }
            selection.generation += 1;
            true
        });
        if notified {
            debug!("Explorer selection changed: {:?}", self.selection());
        }
    }
}

/// Owns the session for the currently loaded log.
///
/// Loading a new log replaces the previous session; readers that still hold
/// the old `Arc` keep a consistent view until they drop it.
#[derive(Debug, Default)]
pub struct SessionHost {
    current: Option<Arc<ExplorerSession>>,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `log`. The selected verbosity survives the reload;
    /// the active result does not.
    pub fn load(&mut self, log: LoadedLog) -> Arc<ExplorerSession> {
        let verbosity = self
            .current
            .as_ref()
            .map(|session| session.verbosity())
            .unwrap_or_default();
        debug!(
            "Loading session for {} ({} results)",
            log.sarif_file_name,
            log.result_count()
        );
        let session = Arc::new(ExplorerSession::with_verbosity(Arc::new(log), verbosity));
        self.current = Some(session.clone());
        session
    }

    pub fn unload(&mut self) -> Option<Arc<ExplorerSession>> {
        self.current.take()
    }

    pub fn current(&self) -> Option<Arc<ExplorerSession>> {
        self.current.clone()
    }
}
