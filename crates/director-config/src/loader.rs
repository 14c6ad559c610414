//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// On-disk configuration syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML or JSON file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str_as(&content, ConfigFormat::from_path(path))
    }

    /// Load TOML configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        Self::load_str_as(content, ConfigFormat::Toml)
    }

    /// Load configuration from a string in the given format.
    pub fn load_str_as(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = match format {
            ConfigFormat::Toml => toml::from_str(&expanded)?,
            ConfigFormat::Json => serde_json::from_str(&expanded)?,
        };
        Self::expand_paths(&mut config);
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    fn expand_paths(config: &mut Config) {
        config.scenario = Self::expand_path_buf(&config.scenario);
        config.output_dir = Self::expand_path_buf(&config.output_dir);
        if let Some(dir) = config.browser.profile_dir.as_mut() {
            *dir = Self::expand_path_buf(dir);
        }
        if let Some(path) = config.browser.chrome_path.as_mut() {
            *path = Self::expand_path_buf(path);
        }
    }

    fn expand_path_buf(path: &Path) -> PathBuf {
        PathBuf::from(Self::expand_path(&path.to_string_lossy()))
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
