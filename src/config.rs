//! Configuration for the codec
//!
//! Centralized decode options with defaults matching the classic wire
//! behavior.

use std::str::FromStr;

use crate::error::AmiError;

/// Codec configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Decode Configuration
    // -------------------------------------------------------------------------
    /// How `Variable:` lines are treated on decode
    pub variable_mode: VariableMode,

    /// Replace invalid UTF-8 sequences instead of failing `decode_bytes`
    pub lossy_utf8: bool,
}

/// Treatment of `Variable: key=value` lines on decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VariableMode {
    /// Stored as the ordinary field `variable` (last one wins).
    /// Encode still emits the Variables mapping, so this is not symmetric.
    #[default]
    Compat,

    /// Parsed on the first `=` into the message's Variables mapping.
    Routed,
}

impl FromStr for VariableMode {
    type Err = AmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compat" => Ok(VariableMode::Compat),
            "routed" => Ok(VariableMode::Routed),
            other => Err(AmiError::Config(format!(
                "unknown variable mode '{}' (expected compat or routed)",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variable_mode: VariableMode::Compat,
            lossy_utf8: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set how `Variable:` lines are decoded
    pub fn variable_mode(mut self, mode: VariableMode) -> Self {
        self.config.variable_mode = mode;
        self
    }

    /// Set whether invalid UTF-8 is replaced (true) or rejected (false)
    pub fn lossy_utf8(mut self, lossy: bool) -> Self {
        self.config.lossy_utf8 = lossy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
