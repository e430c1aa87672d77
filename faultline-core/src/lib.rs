//! # faultline-core
//!
//! Foundation crate for the Faultline defect-mining engine.
//! Defines the domain model, errors, config, and collaborator traits.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{FaultlineConfig, SourceFileFilter};
pub use errors::error_code::FaultlineErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::commit::CommitMeta;
pub use types::diff::{DiffEdit, LineSpan};
pub use types::method::{MethodId, MethodInventory, MethodRecord};
pub use types::release::Release;
pub use types::report::{AuditRow, LabelReport, TicketOutcome};
pub use types::ticket::{FixVersion, Ticket};
