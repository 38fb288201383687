/// Configuration for loading scrape dumps into a catalog
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Controls how [`Catalog::load_from_directory`](super::Catalog::load_from_directory)
/// treats a dump directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Abort on the first invalid course instead of skipping it
    #[serde(default)]
    pub strict: bool,
    /// Extension of dump files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "json".to_string()
}

impl CatalogConfig {
    /// Loads a config from a JSON file. Missing keys take their defaults.
    ///
    /// # Arguments
    /// * `path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(CatalogConfig)` - Parsed configuration
    /// * `Err` - If the file can't be read or isn't valid JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            strict: false,
            extension: default_extension(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_keys_take_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"strict": true}}"#).unwrap();

        let config = CatalogConfig::load(file.path()).unwrap();
        assert!(config.strict);
        assert_eq!(config.extension, "json");
    }

    #[test]
    fn test_invalid_config_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "strict = true").unwrap();

        let err = CatalogConfig::load(file.path()).unwrap_err();
        assert!(!err.is_input_error());
    }
}
