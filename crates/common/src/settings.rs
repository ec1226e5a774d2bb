use std::str;

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::Deserialize;

use crate::error::AdapterError;

fn default_endpoint_url() -> String {
    "https://bidder.h12-media.com/prebid/".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_ttl_secs() -> u32 {
    360
}

/// Bidder endpoint and the response defaults applied when the vendor omits
/// overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct BidderSettings {
    /// Endpoint receiving outbound bid payloads, unless a bid request
    /// carries its own `endpointdom`.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u32,
    #[serde(default)]
    pub default_net_revenue: bool,
}

impl Default for BidderSettings {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            default_currency: default_currency(),
            default_ttl_secs: default_ttl_secs(),
            default_net_revenue: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub bidder: BidderSettings,
}

impl Settings {
    /// Loads settings from the embedded TOML plus `H12MEDIA__`-prefixed
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Settings`] when the configuration cannot be
    /// built or deserialized.
    pub fn new() -> Result<Self, Report<AdapterError>> {
        let toml_bytes = include_bytes!("../../../h12media.toml");
        let toml_str = str::from_utf8(toml_bytes).change_context(AdapterError::Settings {
            message: "Embedded TOML is not valid UTF-8".to_string(),
        })?;

        Self::from_toml(toml_str)
    }

    /// Builds settings from a TOML string, with environment overrides
    /// applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Settings`] when the TOML is invalid or a
    /// field has the wrong shape.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<AdapterError>> {
        let environment = Environment::default().prefix("H12MEDIA").separator("__");

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(AdapterError::Settings {
                message: "Failed to build configuration".to_string(),
            })?;

        config
            .try_deserialize()
            .change_context(AdapterError::Settings {
                message: "Failed to deserialize configuration".to_string(),
            })
    }
}
