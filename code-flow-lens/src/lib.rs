//! # SARIF Explorer Code-Flow Lens
//!
//! Presentation-side view of a loaded log: an explicit session holding the
//! selected result and verbosity, and a provider that turns the selected
//! result's code flows into per-document step markers.
//!
//! ## Example
//!
//! ```
//! use sarif_explorer_code_flow_lens::{CodeFlowLensProvider, SessionHost};
//! use sarif_explorer_normalize::LoadedLog;
//! use sarif_explorer_schema::Importance;
//!
//! let mut host = SessionHost::new();
//! let session = host.load(LoadedLog::default());
//! let changes = session.subscribe();
//!
//! session.set_verbosity(Importance::Unimportant);
//! assert!(changes.has_changed().unwrap_or(false));
//!
//! let lenses = CodeFlowLensProvider::new().provide(&session, "file:///src/main.c");
//! assert!(lenses.is_empty());
//! ```

mod error;
mod provider;
mod session;
mod verbosity;

pub use error::{LensError, Result};
pub use provider::{CodeFlowLensProvider, StepLens, lenses_for_document};
pub use session::{ExplorerSession, Selection, SessionHost};
pub use verbosity::{Verbosity, step_visible};
