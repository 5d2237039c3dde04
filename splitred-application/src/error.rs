use splitred_domain::{LedgerError, MemberName, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// `position` is 1-based, in snapshot order.
    #[error("expense #{position} `{description}`: {source}")]
    InvalidExpense {
        position: usize,
        description: String,
        source: ValidationError,
    },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("failed to load group `{group_id}`: {source}")]
    Snapshot {
        group_id: String,
        source: SnapshotLoadError,
    },
}

impl ReportError {
    /// Faults of the engine or its collaborators, as opposed to bad input.
    pub fn is_internal(&self) -> bool {
        match self {
            Self::InvalidExpense { .. } => false,
            Self::Ledger(err) => err.is_internal(),
            Self::Snapshot { source, .. } => matches!(source, SnapshotLoadError::Unavailable(_)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotLoadError {
    #[error("group not found")]
    NotFound,
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot is malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("member `{member}` is referenced by expense `{description}`")]
pub struct MemberInUse {
    pub member: MemberName,
    pub description: String,
}
