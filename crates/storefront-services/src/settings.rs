//! Application settings.

use serde::Deserialize;
use storefront_loader::LoaderConfig;

/// Top-level settings, loaded from a TOML document.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The `[loader]` section configuring batching and caching.
    pub loader: LoaderConfig,
}

impl Settings {
    /// Parses settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns the TOML parse error for malformed input.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
