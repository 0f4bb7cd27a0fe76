//! Run configuration
//!
//! Settings are resolved from, in order of precedence:
//! 1. command line flags
//! 2. environment variables (optionally sourced from a dotenv file)
//! 3. an optional YAML config file
//! 4. built-in defaults
//!
//! The source URLs and the API key have no default. A missing key is an
//! error; there is no fallback credential.
//!
//! Example config file:
//! ```yaml
//! personality_url: https://raw.githubusercontent.com/example/repo/main/personality.csv
//! assets_url: https://example.supabase.co/rest/v1/assets
//! output_dir: datasets
//! timeout_secs: 30
//! ```

use crate::client::DEFAULT_TIMEOUT;
use crate::error::ConfigError;
use crate::storage::DEFAULT_DATASETS_DIR;
use crate::table::InferenceOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const PERSONALITY_URL_VAR: &str = "PERSONALITY_CSV_URL";
pub const ASSETS_URL_VAR: &str = "ASSETS_API_URL";
pub const API_KEY_VAR: &str = "ASSETS_API_KEY";
/// Accepted in place of [`API_KEY_VAR`]
pub const API_KEY_ALIAS_VAR: &str = "SUPABASE_API_KEY";
pub const DATASETS_DIR_VAR: &str = "DATASETS_DIR";
pub const TIMEOUT_VAR: &str = "FETCH_TIMEOUT_SECS";

/// Contents of the optional YAML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub personality_url: Option<String>,
    pub assets_url: Option<String>,
    pub api_key: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    /// Columns kept as text on ingestion
    pub identifier_columns: Option<Vec<String>>,
    /// Non-identifier columns kept as text, such as codes with leading zeros
    pub text_columns: Option<Vec<String>>,
}

impl ConfigFile {
    /// Read a config file from disk
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Inference options, honouring `identifier_columns` and
    /// `text_columns` when set
    pub fn inference(&self) -> InferenceOptions {
        let mut options = InferenceOptions::default();
        if let Some(identifier_columns) = &self.identifier_columns {
            options.identifier_columns = identifier_columns.clone();
        }
        if let Some(text_columns) = &self.text_columns {
            options.text_columns = text_columns.clone();
        }
        options
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub personality_url: Option<String>,
    pub assets_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved configuration for a download run
#[derive(Clone)]
pub struct Config {
    pub personality_url: Url,
    pub assets_url: Url,
    api_key: String,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub inference: InferenceOptions,
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn from_env(file: ConfigFile, overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve(file, overrides, |name| std::env::var(name).ok())
    }

    /// Resolve configuration using `env` to look up environment variables.
    /// Empty values count as unset.
    pub fn resolve(
        file: ConfigFile,
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let inference = file.inference();

        let personality_url = overrides
            .personality_url
            .or_else(|| env(PERSONALITY_URL_VAR))
            .or(file.personality_url)
            .ok_or(ConfigError::Missing {
                setting: "personality CSV URL",
                env_var: PERSONALITY_URL_VAR,
                yaml_key: "personality_url",
            })?;
        let personality_url = parse_url("personality CSV URL", &personality_url)?;

        let assets_url = overrides
            .assets_url
            .or_else(|| env(ASSETS_URL_VAR))
            .or(file.assets_url)
            .ok_or(ConfigError::Missing {
                setting: "assets API URL",
                env_var: ASSETS_URL_VAR,
                yaml_key: "assets_url",
            })?;
        let assets_url = parse_url("assets API URL", &assets_url)?;

        let api_key = env(API_KEY_VAR)
            .or_else(|| env(API_KEY_ALIAS_VAR))
            .or(file.api_key.filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::Missing {
                setting: "assets API key",
                env_var: API_KEY_VAR,
                yaml_key: "api_key",
            })?;

        let output_dir = overrides
            .output_dir
            .or_else(|| env(DATASETS_DIR_VAR).map(PathBuf::from))
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASETS_DIR));

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(secs),
            None => match env(TIMEOUT_VAR) {
                Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue {
                        setting: TIMEOUT_VAR,
                        value: value.clone(),
                    }
                })?),
                None => file.timeout_secs,
            },
        };
        let timeout = match timeout_secs {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    setting: "timeout_secs",
                    value: "0".to_string(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };


        Ok(Self {
            personality_url,
            assets_url,
            api_key,
            output_dir,
            timeout,
            inference,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

fn parse_url(setting: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        setting,
        value: value.to_string(),
        source,
    })
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("personality_url", &self.personality_url.as_str())
            .field("assets_url", &self.assets_url.as_str())
            .field("api_key", &"***")
            .field("output_dir", &self.output_dir)
            .field("timeout", &self.timeout)
            .field("inference", &self.inference)
            .finish()
    }
}
