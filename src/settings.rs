//! Application settings using Figment.
//!
//! Settings are loaded from (in order of precedence, highest first):
//! 1. Environment variables prefixed with `CONTAINER_`
//! 2. A TOML settings file
//!
//! ```text
//! # settings.toml
//! payload_file = "config/payload.yaml"
//! format = "yaml"        # optional, detected from the extension otherwise
//! log_level = "debug"    # optional, defaults to "info"
//! ```
//!
//! ```text
//! CONTAINER_PAYLOAD_FILE=config/payload.json
//! CONTAINER_LOG_LEVEL=warn
//! ```

use crate::error::{PayloadError, PayloadResult};
use crate::loader::{ConfigFormat, PayloadSource};
use crate::payload::Payload;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "CONTAINER_";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Instrument payload file.
    pub payload_file: PathBuf,
    /// Payload format; detected from the extension when absent.
    #[serde(default)]
    pub format: Option<ConfigFormat>,
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Serialize)]
struct PayloadFileOverride {
    payload_file: PathBuf,
}

impl Settings {
    /// Load settings from a TOML file and `CONTAINER_` environment variables.
    ///
    /// A missing file contributes nothing; extraction then fails unless the
    /// environment provides `payload_file`.
    pub fn load_from<P: AsRef<Path>>(path: P) -> PayloadResult<Self> {
        Self::extract(Figment::new().merge(Toml::file(path.as_ref())))
    }

    /// Load settings for an explicit payload file, still honouring the environment.
    ///
    /// The given file takes precedence over `CONTAINER_PAYLOAD_FILE`.
    pub fn for_payload_file<P: AsRef<Path>>(path: P) -> PayloadResult<Self> {
        let figment = Figment::new()
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(PayloadFileOverride {
                payload_file: path.as_ref().to_path_buf(),
            }));
        let settings: Self = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn extract(figment: Figment) -> PayloadResult<Self> {
        let settings: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that parse but make no sense.
    pub fn validate(&self) -> PayloadResult<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(PayloadError::Configuration(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        if self.payload_file.as_os_str().is_empty() {
            return Err(PayloadError::Configuration(
                "payload_file cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Where to read the payload from.
    pub fn payload_source(&self) -> PayloadSource {
        PayloadSource {
            path: self.payload_file.clone(),
            format: self.format,
        }
    }

    /// Load the configured payload.
    pub fn load_payload(&self) -> PayloadResult<Payload> {
        self.payload_source().load()
    }
}
