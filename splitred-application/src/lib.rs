#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger_processor;
pub mod model;
pub mod ports;

pub use error::{MemberInUse, ReportError, SnapshotLoadError};
pub use ledger_processor::LedgerProcessor;
pub use model::{GroupSnapshot, LedgerReport};
pub use ports::GroupSnapshotSource;
