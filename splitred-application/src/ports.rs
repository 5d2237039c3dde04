use crate::{error::SnapshotLoadError, model::GroupSnapshot};

/// Supplies internally consistent snapshots of a group's members and expenses.
pub trait GroupSnapshotSource: Send + Sync {
    fn load(&self, group_id: &str) -> Result<GroupSnapshot, SnapshotLoadError>;
}
