//! YAML config file format.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PackmonError, Result};

/// Contents of a packmon config file.
///
/// Every field is optional; missing fields fall back to the defaults.
///
/// ```yaml
/// interval: 3600
/// log: /var/log/packmon.log
/// vendors: [Keil, ARM]
/// quiet: true
/// jobs: 16
/// timeout: 20
/// index_url: http://mirror.example.com/pack/index.pidx
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Seconds between checks; 0 checks once
    pub interval: Option<u64>,

    /// Log file path
    pub log: Option<PathBuf>,

    /// Vendors to monitor
    pub vendors: Option<Vec<String>>,

    /// Print only progress and errors
    pub quiet: Option<bool>,

    /// Maximum requests in flight
    pub jobs: Option<usize>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Pack index location
    pub index_url: Option<String>,
}

/// Load a config file from `path`.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PackmonError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PackmonError::Io(e)
        }
    })?;

    // An empty file deserializes as YAML null.
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(&content).map_err(|e| PackmonError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join("packmon.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_full_config() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
interval: 3600
log: monitor.log
vendors: [Keil, ARM]
quiet: true
jobs: 16
timeout: 20
index_url: http://localhost/index.pidx
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.interval, Some(3600));
        assert_eq!(config.log, Some(PathBuf::from("monitor.log")));
        assert_eq!(config.vendors, Some(vec!["Keil".to_string(), "ARM".to_string()]));
        assert_eq!(config.quiet, Some(true));
        assert_eq!(config.jobs, Some(16));
        assert_eq!(config.timeout, Some(20));
        assert_eq!(config.index_url.as_deref(), Some("http://localhost/index.pidx"));
    }

    #[test]
    fn partial_config_leaves_rest_unset() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "jobs: 4\n");

        let config = load_config(&path).unwrap();
        assert_eq!(config.jobs, Some(4));
        assert_eq!(config.interval, None);
        assert_eq!(config.vendors, None);
    }

    #[test]
    fn empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "\n");
        assert_eq!(load_config(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config(&temp.path().join("absent.yml"));
        assert!(matches!(result, Err(PackmonError::ConfigNotFound { .. })));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "jobs: [not a number\n");
        let result = load_config(&path);
        assert!(matches!(result, Err(PackmonError::ConfigParseError { .. })));
    }

    #[test]
    fn unknown_field_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "intervall: 60\n");
        match load_config(&path) {
            Err(PackmonError::ConfigParseError { message, .. }) => {
                assert!(message.contains("intervall"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
