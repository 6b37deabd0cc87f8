use crate::EntryType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Permission and type bits as stored on a node. Never enforced.
pub type Mode = u32;

/// Descriptor returned by `stat`, `lstat` and `read_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Final path segment
    pub name: String,

    /// Content length in bytes; 0 for directories
    pub size: u64,

    pub mode: Mode,

    pub entry_type: EntryType,

    /// Last creation, rename or open of the entry
    pub modified: DateTime<Utc>,
}

impl FileInfo {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.entry_type.is_dir()
    }
}
