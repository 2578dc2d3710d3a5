//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Upstream endpoint overrides
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory where exported files are written
    #[serde(default = "default_export_dir")]
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_export_dir(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Upstream endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL for the DOAB scrape API
    #[serde(default)]
    pub doab_base_url: Option<String>,

    /// Base URL for the DOAJ search API
    #[serde(default)]
    pub doaj_base_url: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            doab_base_url: None,
            doaj_base_url: None,
        }
    }
}

/// Load configuration from a file, with `OASHELF_*` environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("OASHELF").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the conventional locations
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("oashelf.toml");
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("oashelf").join("config.toml");
    user.exists().then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert!(config.upstream.doab_base_url.is_none());
    }
}
