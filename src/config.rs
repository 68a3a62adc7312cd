//! Configuration for the synchronization core
//!
//! Follows a defaults-in-code philosophy: every field has a built-in
//! default, a TOML file only overrides what it names. The capability
//! flags describe the host platform and are applied to resources once,
//! at creation time, so the per-frame strategies stay platform-agnostic.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Maximum position drift tolerated in realtime mode, in seconds
///
/// Precision mode always seeks exactly and ignores this value.
pub const DEFAULT_DRIFT_TOLERANCE: f64 = 0.5;

/// Platform capability flags injected into resources at creation
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MediaCapabilities {
    /// Platform refuses unmuted autoplay; new resources start muted and
    /// are unmuted once, on the first real playback start
    #[serde(default)]
    pub autoplay_requires_mute: bool,

    /// Platform wants inline-playback attributes on new resources
    #[serde(default)]
    pub inline_playback: bool,
}

/// Synchronization configuration
///
/// Loadable from TOML; all fields optional with built-in defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SyncConfig {
    /// Realtime-mode drift tolerance in seconds
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance: f64,

    /// Host platform capabilities
    #[serde(default)]
    pub capabilities: MediaCapabilities,
}

fn default_drift_tolerance() -> f64 {
    DEFAULT_DRIFT_TOLERANCE
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            drift_tolerance: DEFAULT_DRIFT_TOLERANCE,
            capabilities: MediaCapabilities::default(),
        }
    }
}

impl SyncConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.drift_tolerance, 0.5);
        assert!(!config.capabilities.autoplay_requires_mute);
        assert!(!config.capabilities.inline_playback);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SyncConfig::from_toml_str("").unwrap();
        assert_eq!(config.drift_tolerance, 0.5);
        assert!(!config.capabilities.autoplay_requires_mute);
    }

    #[test]
    fn test_partial_override() {
        let config = SyncConfig::from_toml_str(
            r#"
            drift_tolerance = 0.25

            [capabilities]
            autoplay_requires_mute = true
            "#,
        )
        .unwrap();
        assert_eq!(config.drift_tolerance, 0.25);
        assert!(config.capabilities.autoplay_requires_mute);
        assert!(!config.capabilities.inline_playback);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SyncConfig::from_toml_str("drift_tolerance = \"fast\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
