/// Runner configuration
use crate::error::{HeadlessError, Result};
use cadence_playback::types::{DEFAULT_VOLUME, MAX_VOLUME};
use cadence_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Environment variable prefix (`CADENCE_TICK_MS`, ...)
pub const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Catalog file (TOML or JSON); the demo catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Simulated clock period in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    /// Start playing as soon as the runner is up
    #[serde(default)]
    pub autoplay: bool,

    /// Tracing filter used when `RUST_LOG` is not set
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            tick_ms: default_tick_ms(),
            initial_volume: default_initial_volume(),
            autoplay: false,
            log_filter: None,
        }
    }
}

impl Settings {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` is read if
    /// present. `CADENCE_*` variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        Self::from_sources(path, env)
    }

    /// Load from a file and an explicit environment source
    pub fn from_sources(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(HeadlessError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        let config = settings.add_source(env).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(HeadlessError::Config(
                "tick_ms must be greater than 0".to_string(),
            ));
        }

        if self.initial_volume > MAX_VOLUME {
            return Err(HeadlessError::Config(format!(
                "initial_volume must be between 0 and {MAX_VOLUME}, got {}",
                self.initial_volume
            )));
        }

        Ok(())
    }

    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            initial_volume: self.initial_volume,
            tick_period: Duration::from_millis(self.tick_ms),
        }
    }
}

// Default values
fn default_tick_ms() -> u64 {
    1000
}

fn default_initial_volume() -> u8 {
    DEFAULT_VOLUME
}
