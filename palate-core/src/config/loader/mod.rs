use crate::config::constants::defaults;
use crate::config::core::{AdvisorConfig, CacheConfig, ServicesConfig, TelemetryConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for Palate
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PalateConfig {
    /// Per-customer analysis cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Emotion classification and summarization services
    #[serde(default)]
    pub services: ServicesConfig,

    /// Generative kitchen advisor used for order notes
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl PalateConfig {
    /// Write palate.toml into `workspace`, leaving an existing file alone unless `force` is set.
    /// Returns the names of the files that were written.
    pub fn bootstrap_project<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Vec<String>> {
        let config_path = workspace.as_ref().join(defaults::CONFIG_FILE_NAME);
        let mut created_files = Vec::new();

        if !config_path.exists() || force {
            Self::create_sample_config(&config_path)?;
            created_files.push(defaults::CONFIG_FILE_NAME.to_string());
        }

        Ok(created_files)
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let default_config = PalateConfig::default();
        let config_content = toml::to_string_pretty(&default_config)
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for loading configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PalateConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Candidate config files for `workspace`, in lookup order.
    pub fn search_paths(workspace: &Path) -> Vec<PathBuf> {
        let mut paths = vec![
            workspace.join(defaults::CONFIG_FILE_NAME),
            workspace
                .join(defaults::CONFIG_DIR_NAME)
                .join(defaults::CONFIG_FILE_NAME),
        ];
        if let Some(home) = dirs::home_dir() {
            paths.push(
                home.join(defaults::CONFIG_DIR_NAME)
                    .join(defaults::CONFIG_FILE_NAME),
            );
        }
        paths
    }

    /// Load the first config found by [`Self::search_paths`], or defaults
    /// when none exists.
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        match Self::search_paths(workspace.as_ref())
            .into_iter()
            .find(|path| path.is_file())
        {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self {
                config: PalateConfig::default(),
                config_path: None,
            }),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: PalateConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PalateConfig {
        &self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
