use splitred_application::{GroupSnapshot, GroupSnapshotSource, SnapshotLoadError};
use splitred_presentation::{GroupSnapshotDto, MoneyFormat};
use std::{fs, io, path::Path};

/// Reads a group snapshot from a JSON file; the group id is the file path.
pub struct JsonFileSnapshots {
    format: MoneyFormat,
}

impl JsonFileSnapshots {
    pub fn new(format: MoneyFormat) -> Self {
        Self { format }
    }
}

impl GroupSnapshotSource for JsonFileSnapshots {
    fn load(&self, group_id: &str) -> Result<GroupSnapshot, SnapshotLoadError> {
        let path = Path::new(group_id);
        let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SnapshotLoadError::NotFound,
            _ => SnapshotLoadError::Unavailable(err.to_string()),
        })?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Loaded snapshot file");
        parse_snapshot(&contents, self.format)
    }
}

pub fn parse_snapshot(contents: &str, format: MoneyFormat) -> Result<GroupSnapshot, SnapshotLoadError> {
    let dto: GroupSnapshotDto = serde_json::from_str(contents)
        .map_err(|err| SnapshotLoadError::Malformed(err.to_string()))?;

    dto.into_snapshot(format)
        .map_err(|err| SnapshotLoadError::Malformed(err.to_string()))
}
