//! Configuration file support for liftlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftlog/config.toml`.

use crate::progress::DEFAULT_WEEKLY_GOAL;
use crate::report::RatioBands;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Analysis parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Weeks charted when no count is given
    #[serde(default = "default_weeks")]
    pub default_weeks: usize,

    /// Near-failure sets per pattern per week
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal: u32,

    /// Recent/reference ratio above which load is flagged high
    #[serde(default = "default_ratio_high")]
    pub ratio_high: f64,

    /// Recent/reference ratio below which load is flagged low
    #[serde(default = "default_ratio_low")]
    pub ratio_low: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_weeks: default_weeks(),
            weekly_goal: default_weekly_goal(),
            ratio_high: default_ratio_high(),
            ratio_low: default_ratio_low(),
        }
    }
}

impl AnalysisConfig {
    pub fn ratio_bands(&self) -> RatioBands {
        RatioBands {
            high: self.ratio_high,
            low: self.ratio_low,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("liftlog")
}

fn default_weeks() -> usize {
    5
}

fn default_weekly_goal() -> u32 {
    DEFAULT_WEEKLY_GOAL
}

fn default_ratio_high() -> f64 {
    1.25
}

fn default_ratio_low() -> f64 {
    0.75
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the analysis cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.analysis.default_weeks == 0 {
            return Err(Error::Config("default_weeks must be at least 1".into()));
        }
        if self.analysis.ratio_low > self.analysis.ratio_high {
            return Err(Error::Config(format!(
                "ratio_low ({}) is above ratio_high ({})",
                self.analysis.ratio_low, self.analysis.ratio_high
            )));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("liftlog").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analysis.default_weeks, 5);
        assert_eq!(config.analysis.weekly_goal, 10);
        assert_eq!(config.analysis.ratio_bands(), RatioBands::default());
        assert!(config.data.data_dir.ends_with("liftlog"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.analysis.weekly_goal = 12;
        config.data.data_dir = temp_dir.path().join("data");
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.analysis.weekly_goal, 12);
        assert_eq!(parsed.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[analysis]
default_weeks = 8
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.default_weeks, 8);
        assert_eq!(config.analysis.weekly_goal, 10); // default
        assert_eq!(config.analysis.ratio_high, 1.25); // default
    }

    #[test]
    fn test_invalid_bands_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nratio_low = 2.0\nratio_high = 1.0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
