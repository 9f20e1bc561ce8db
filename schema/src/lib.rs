//! # SARIF 2.0.0 schema
//!
//! Serde bindings for the subset of the SARIF 2.0.0 JSON schema that the
//! explorer consumes. These types mirror the wire format one-to-one: optional
//! JSON members are `Option<_>`, required members are plain fields, and
//! dictionaries keep their JSON keys.
//!
//! The only logic that lives here is a set of typed views over groups of
//! optional members (for example [`Region::coordinates`]) so that callers can
//! match on a sum type instead of probing individual fields.
//!
//! ```
//! use sarif_explorer_schema::SarifLog;
//!
//! let log = SarifLog::from_json_str(
//!     r#"{ "version": "2.0.0", "runs": [ { "tool": { "name": "Sample" } } ] }"#,
//! )?;
//! assert_eq!(log.runs[0].tool.name, "Sample");
//! # Ok::<(), sarif_explorer_schema::SchemaError>(())
//! ```

mod error;
mod level;
mod model;
mod region;

pub use error::SchemaError;
pub use level::DefaultLevel;
pub use level::Importance;
pub use level::LogVersion;
pub use level::ResultLevel;
pub use model::Attachment;
pub use model::CodeFlow;
pub use model::FileContent;
pub use model::FileLocation;
pub use model::Invocation;
pub use model::Location;
pub use model::Message;
pub use model::PhysicalLocation;
pub use model::PropertyBag;
pub use model::Rectangle;
pub use model::Region;
pub use model::Resources;
pub use model::Result;
pub use model::Rule;
pub use model::RuleConfiguration;
pub use model::Run;
pub use model::SarifLog;
pub use model::ThreadFlow;
pub use model::ThreadFlowLocation;
pub use model::Tool;
pub use region::RegionCoordinates;
