//! Command-line and config file handling for the tap.

use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, TapError};
use crate::state::State;
use crate::utils::json::load_json;

/// Config key holding the Pendo integration key.
pub const INTEGRATION_KEY: &str = "x_pendo_integration_key";

/// Environment variable consulted when the config file has no integration key.
pub const INTEGRATION_KEY_ENV: &str = "X_PENDO_INTEGRATION_KEY";

/// Keys the Pendo tap cannot run without.
pub const REQUIRED_CONFIG_KEYS: &[&str] = &["start_date", INTEGRATION_KEY, "period"];

/// Command-line arguments.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tap-pendo")]
#[command(about = "Pendo extraction tap", long_about = None)]
#[command(version)]
pub struct Args {
    /// Config file
    #[arg(short, long)]
    pub config: PathBuf,

    /// State file
    #[arg(short, long)]
    pub state: Option<PathBuf>,
}

impl Args {
    /// Load and validate the config, then load the state if one was given.
    pub fn load(&self, required_keys: &[&str]) -> Result<(TapConfig, State)> {
        let config = TapConfig::from_file(&self.config)?
            .with_env_override(std::env::var(INTEGRATION_KEY_ENV).ok());
        check_config(&config, required_keys)?;

        let state = match &self.state {
            Some(path) => State::load(path)?,
            None => State::new(),
        };

        Ok((config, state))
    }
}

/// Parse the process arguments and load config and state.
pub fn parse_args(required_keys: &[&str]) -> Result<(TapConfig, State)> {
    Args::parse().load(required_keys)
}

/// The user's config file, kept as raw JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TapConfig {
    values: Map<String, Value>,
}

impl TapConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading tap configuration");

        let value: Value = load_json(path)?;
        Self::from_value(value)
    }

    /// Build a config from a parsed JSON document, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(TapError::Config(format!(
                "config must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Fill in the integration key from `env_value` if the file lacks one.
    ///
    /// A key present in the file is never replaced.
    pub fn with_env_override(mut self, env_value: Option<String>) -> Self {
        if !self.values.contains_key(INTEGRATION_KEY) {
            if let Some(key) = env_value {
                debug!(env = INTEGRATION_KEY_ENV, "Using integration key from environment");
                self.values.insert(INTEGRATION_KEY.to_string(), Value::String(key));
            }
        }
        self
    }

    /// Get a config value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a config value if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Whether `key` is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All config keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of config entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the config has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Verify that every key in `required_keys` is present in `config`.
///
/// The error lists all missing keys, in the order they were required.
pub fn check_config(config: &TapConfig, required_keys: &[&str]) -> Result<()> {
    let missing_keys: Vec<String> = required_keys
        .iter()
        .filter(|key| !config.contains_key(key))
        .map(|key| key.to_string())
        .collect();

    if missing_keys.is_empty() {
        Ok(())
    } else {
        Err(TapError::MissingConfigKeys(missing_keys))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
