//! Server configuration resolved from the command line, the environment and
//! the client's `initializationOptions`.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// Environment variable consulted when no delay is given on the command line.
pub const VALIDATION_DELAY_ENV: &str = "RECETTE_VALIDATION_DELAY_MS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// How long a scheduled validation waits before running. A newer edit
    /// arriving during the wait cancels it.
    pub validation_delay: Duration,
}

/// Options a client may send in the `initialize` request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializationOptions {
    pub validation_delay_ms: Option<u64>,
}

impl ServerConfig {
    /// Resolves the configuration from an explicit value or the environment.
    ///
    /// Checks in order:
    /// 1. The `--validation-delay-ms` argument
    /// 2. `RECETTE_VALIDATION_DELAY_MS`
    /// 3. No delay
    pub fn from_env_or_default(validation_delay_ms: Option<u64>) -> Self {
        let delay_ms = validation_delay_ms
            .or_else(|| Self::delay_from_env(std::env::var(VALIDATION_DELAY_ENV).ok()))
            .unwrap_or(0);
        ServerConfig {
            validation_delay: Duration::from_millis(delay_ms),
        }
    }

    fn delay_from_env(value: Option<String>) -> Option<u64> {
        let value = value?;
        match value.trim().parse() {
            Ok(delay) => Some(delay),
            Err(e) => {
                warn!("Ignoring {}={:?}: {}", VALIDATION_DELAY_ENV, value, e);
                None
            }
        }
    }

    /// Overrides values with the client's `initializationOptions`, if any.
    ///
    /// Malformed options are logged and ignored.
    pub fn apply_initialization_options(&mut self, options: Option<serde_json::Value>) {
        let Some(options) = options else {
            return;
        };
        match serde_json::from_value::<InitializationOptions>(options) {
            Ok(options) => {
                if let Some(delay_ms) = options.validation_delay_ms {
                    self.validation_delay = Duration::from_millis(delay_ms);
                }
            }
            Err(e) => warn!("Ignoring malformed initializationOptions: {}", e),
        }
    }
}
