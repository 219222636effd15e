use std::fmt;

use serde::Deserialize;

use closesnap_state::{UpdateMode, DEFAULT_TOLERANCE};

/// Session configuration: the update mode and tolerance for a run.
///
/// The update mode is plain configuration supplied by the surrounding
/// tooling (there is no CLI surface here); `from_env` covers the common
/// wiring, `from_toml` a checked-in config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub update_mode: UpdateMode,
    pub tolerance: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SessionConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build a config from the environment.
    ///
    /// `CLOSESNAP_UPDATE` selects the mode (`none` | `new` | `all`) and
    /// `CLOSESNAP_TOLERANCE` overrides the tolerance. Without an explicit
    /// mode, CI runs (`CI=true|1`) default to `none` so they verify
    /// strictly instead of writing baselines.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if is_ci() {
            config.update_mode = UpdateMode::None;
        }

        if let Ok(mode) = std::env::var("CLOSESNAP_UPDATE") {
            match mode.parse() {
                Ok(mode) => config.update_mode = mode,
                Err(err) => log::warn!("ignoring CLOSESNAP_UPDATE: {err}"),
            }
        }
        if let Ok(tolerance) = std::env::var("CLOSESNAP_TOLERANCE") {
            match tolerance.parse::<f64>() {
                Ok(t) if t.is_finite() && t > 0.0 => config.tolerance = t,
                _ => log::warn!("ignoring CLOSESNAP_TOLERANCE '{tolerance}'"),
            }
        }

        config
    }
}

fn is_ci() -> bool {
    std::env::var("CI")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

#[derive(Debug)]
pub enum ConfigError {
    /// TOML parse / deserialization error.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
