use serde::{Deserialize, Serialize};
use shelfmark_models::CanonicalStatus;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
}

/// Import behavior and the column mapping for the generic importer
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImportConfig {
    /// Status assigned to rows whose status cell does not resolve.
    /// Takes precedence over keep_unresolved when both are set.
    #[serde(default)]
    pub fallback_status: Option<CanonicalStatus>,

    /// Keep unresolved rows with no status instead of dropping them
    #[serde(default)]
    pub keep_unresolved: bool,

    /// Column names used by the generic importer
    #[serde(default = "default_column_mapping")]
    pub columns: ColumnMapping,

    /// chrono format string for date columns in generic imports
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            fallback_status: None,
            keep_unresolved: false,
            columns: default_column_mapping(),
            date_format: default_date_format(),
        }
    }
}

/// Column names for the generic importer; isbn and date_added are optional
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ColumnMapping {
    pub title: String,
    pub author: String,
    pub status: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
}

pub fn default_column_mapping() -> ColumnMapping {
    ColumnMapping {
        title: "Title".to_string(),
        author: "Author".to_string(),
        status: "Status".to_string(),
        isbn: Some("ISBN".to_string()),
        date_added: Some("Date Added".to_string()),
    }
}

pub fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it doesn't exist
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let columns = &self.import.columns;
        for (name, value) in [
            ("columns.title", &columns.title),
            ("columns.author", &columns.author),
            ("columns.status", &columns.status),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("import.{} must be non-empty", name));
            }
        }

        if self.import.date_format.trim().is_empty() {
            return Err(anyhow::anyhow!("import.date_format must be non-empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.import.columns.title, "Title");
        assert_eq!(config.import.date_format, "%Y-%m-%d");
        assert!(config.import.fallback_status.is_none());
    }

    #[test]
    fn test_round_trip_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.import.fallback_status = Some(CanonicalStatus::ToRead);
        config.import.keep_unresolved = true;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.import.fallback_status, Some(CanonicalStatus::ToRead));
        assert!(loaded.import.keep_unresolved);
        assert_eq!(loaded.import.columns.status, "Status");
    }

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert!(config.import.fallback_status.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [import]
            keep_unresolved = true
            "#,
        )
        .unwrap();
        assert!(config.import.keep_unresolved);
        assert_eq!(config.import.columns.author, "Author");
    }

    #[test]
    fn test_validate_rejects_empty_column_name() {
        let mut config = Config::default();
        config.import.columns.status = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
