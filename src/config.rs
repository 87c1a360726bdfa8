use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analysis::correlation::SUBSCRIPTION_HEATMAP_COLUMNS;
use crate::analysis::distribution::{clamp_bins, DEFAULT_BINS};
use crate::data::model::NumericField;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "ipo_dashboard.json";

/// Dashboard settings. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV loaded at start-up.
    pub data_path: PathBuf,
    /// Initial histogram bin count (clamped to 5..=100).
    pub default_bins: usize,
    /// Column names correlated by the subscription heatmap.
    pub heatmap_columns: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Indian_IPO_Market_Data.csv"),
            default_bins: DEFAULT_BINS,
            heatmap_columns: SUBSCRIPTION_HEATMAP_COLUMNS
                .iter()
                .map(|f| f.column_name().to_string())
                .collect(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Load [`CONFIG_FILE`], falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        match Self::from_file(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn bins(&self) -> usize {
        clamp_bins(self.default_bins)
    }

    /// Heatmap columns resolved to fields; unknown names are skipped.
    pub fn heatmap_fields(&self) -> Vec<NumericField> {
        self.heatmap_columns
            .iter()
            .filter_map(|name| {
                let field = NumericField::from_column_name(name.trim());
                if field.is_none() {
                    log::warn!("Unknown heatmap column '{name}' in config");
                }
                field
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.bins(), 30);
        assert_eq!(config.heatmap_fields(), SUBSCRIPTION_HEATMAP_COLUMNS);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_bins": 500, "heatmap_columns": ["Issue_Size", "Bogus"] }}"#).unwrap();
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("Indian_IPO_Market_Data.csv"));
        assert_eq!(config.bins(), 100);
        assert_eq!(config.heatmap_fields(), [NumericField::IssueSize]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(DashboardConfig::from_file(file.path()).is_err());
    }
}
