//! Tunables for [`MemFs`](crate::MemFs).
//!
//! Every field has a default, so a YAML document only needs the keys it
//! overrides:
//!
//! ```yaml
//! remove_policy: require_empty
//! min_buffer_size: 4096
//! ```

use crate::memory::buffer::MIN_BUFFER_SIZE;
use crate::metadata::Mode;
use serde::{Deserialize, Serialize};

/// What `remove` does with a directory that still has entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovePolicy {
    /// Drop the directory and everything below it.
    #[default]
    Recursive,
    /// Refuse with `DirectoryNotEmpty`.
    RequireEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemFsConfig {
    pub remove_policy: RemovePolicy,

    /// Mode stored by `create`.
    pub default_file_mode: Mode,

    /// Mode of the root directory.
    pub default_dir_mode: Mode,

    /// Minimum growth step for file content, in bytes.
    pub min_buffer_size: usize,
}

impl Default for MemFsConfig {
    fn default() -> Self {
        Self {
            remove_policy: RemovePolicy::default(),
            default_file_mode: 0o666,
            default_dir_mode: 0o777,
            min_buffer_size: MIN_BUFFER_SIZE,
        }
    }
}

impl MemFsConfig {
    /// Serialize to YAML bytes
    pub fn to_yaml_bytes(&self) -> Result<Vec<u8>, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self).map(String::into_bytes)
    }

    /// Deserialize from YAML bytes
    pub fn from_yaml_bytes(bytes: &[u8]) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let config = MemFsConfig {
            remove_policy: RemovePolicy::RequireEmpty,
            ..MemFsConfig::default()
        };
        let yaml = config.to_yaml_bytes().unwrap();
        let parsed = MemFsConfig::from_yaml_bytes(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let parsed = MemFsConfig::from_yaml_bytes(b"min_buffer_size: 4096\n").unwrap();
        assert_eq!(parsed.min_buffer_size, 4096);
        assert_eq!(parsed.remove_policy, RemovePolicy::Recursive);
        assert_eq!(parsed.default_file_mode, 0o666);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(MemFsConfig::from_yaml_bytes(b"remove_policy: sometimes\n").is_err());
    }
}
