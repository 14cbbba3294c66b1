//! Container options and the sources they are loaded from.
//!
//! Options can be built in code, read from environment variables, or (with
//! the `config` feature) deserialized from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "WIRE";

/// Resolution limits applied by a [`Container`](crate::Container).
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, ContainerOptions};
///
/// let options = ContainerOptions::default().with_max_depth(64);
/// assert!(options.detect_cycles);
///
/// let container = Container::with_options(options);
/// assert_eq!(container.options().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Maximum nesting of resolutions before `DepthExceeded`
    pub max_depth: usize,
    /// Whether a binding re-entered during its own resolution is reported as `Circular`
    pub detect_cycles: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            detect_cycles: true,
        }
    }
}

impl ContainerOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// Reads `WIRE_MAX_DEPTH` and `WIRE_DETECT_CYCLES`.
    pub fn from_env() -> DiResult<Self> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Reads `<PREFIX>_MAX_DEPTH` and `<PREFIX>_DETECT_CYCLES`; unset keys keep their defaults.
    pub fn from_env_with_prefix(prefix: &str) -> DiResult<Self> {
        Self::from_source(&EnvironmentConfigSource::with_prefix(prefix))
    }

    /// Loads options from any [`ConfigSource`].
    pub fn from_source(source: &dyn ConfigSource) -> DiResult<Self> {
        let mut options = Self::default();

        if let Some(value) = source.get("max_depth") {
            let depth = value.as_i64()?;
            if depth <= 0 {
                return Err(DiError::Config(format!("max_depth must be positive, got {}", depth)));
            }
            options.max_depth = depth as usize;
        }
        if let Some(value) = source.get("detect_cycles") {
            options.detect_cycles = value.as_bool()?;
        }

        Ok(options)
    }

    /// Parses options from a JSON document; missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json_str(json: &str) -> DiResult<Self> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| DiError::Config(e.to_string()))?;
        if options.max_depth == 0 {
            return Err(DiError::Config("max_depth must be positive, got 0".to_string()));
        }
        Ok(options)
    }

    /// Serializes the options as JSON.
    #[cfg(feature = "config")]
    pub fn to_json_string(&self) -> DiResult<String> {
        serde_json::to_string(self).map_err(|e| DiError::Config(e.to_string()))
    }
}

/// A raw configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl ConfigValue {
    /// Parses a textual value, preferring integers, then booleans.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(int_val) = raw.parse::<i64>() {
            ConfigValue::Integer(int_val)
        } else if let Ok(bool_val) = raw.to_ascii_lowercase().parse::<bool>() {
            ConfigValue::Boolean(bool_val)
        } else {
            ConfigValue::String(raw.to_string())
        }
    }

    pub fn as_i64(&self) -> DiResult<i64> {
        match self {
            ConfigValue::Integer(i) => Ok(*i),
            other => Err(DiError::Config(format!("expected an integer, got {:?}", other))),
        }
    }

    /// Accepts `true`/`false` as well as `1`/`0`.
    pub fn as_bool(&self) -> DiResult<bool> {
        match self {
            ConfigValue::Boolean(b) => Ok(*b),
            ConfigValue::Integer(0) => Ok(false),
            ConfigValue::Integer(1) => Ok(true),
            other => Err(DiError::Config(format!("expected a boolean, got {:?}", other))),
        }
    }
}

/// A source of configuration values.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Gets a configuration value by lowercase key.
    fn get(&self, key: &str) -> Option<ConfigValue>;
}

/// Environment variable configuration source.
#[derive(Debug, Default)]
pub struct EnvironmentConfigSource {
    prefix: Option<String>,
}

impl EnvironmentConfigSource {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn env_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix.to_uppercase(), key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl ConfigSource for EnvironmentConfigSource {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        env::var(self.env_key(key)).ok().map(|value| ConfigValue::parse(&value))
    }
}
