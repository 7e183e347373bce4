//! Switch configuration.
//!
//! Deserialised from the host configuration (the `[switch]` table of the
//! daemon's TOML file). Every key but `resource` has a default.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigurationError;

/// Default friendly name.
pub const DEFAULT_NAME: &str = "REST Switch";
/// Default body posted to turn the switch on.
pub const DEFAULT_BODY_ON: &str = "ON";
/// Default body posted to turn the switch off.
pub const DEFAULT_BODY_OFF: &str = "OFF";
/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection parameters of a REST switch. Immutable once the switch exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Absolute `http`/`https` URL of the resource.
    pub resource: String,
    /// Friendly name.
    pub name: String,
    /// Body posted to turn the switch on. May contain template expressions.
    pub body_on: String,
    /// Body posted to turn the switch off. May contain template expressions.
    pub body_off: String,
    /// Expression extracting `True`/`False` from a `GET` response body.
    ///
    /// When absent, the body is compared verbatim with `body_on`/`body_off`.
    pub value_template: Option<String>,
    /// Per-request timeout, in seconds.
    pub timeout: u64,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            resource: String::new(),
            name: DEFAULT_NAME.to_string(),
            body_on: DEFAULT_BODY_ON.to_string(),
            body_off: DEFAULT_BODY_OFF.to_string(),
            value_template: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SwitchConfig {
    /// Configuration for `resource` with every other key defaulted.
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Check the resource URL and the timeout.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found: a missing or
    /// scheme-less resource, a non-HTTP scheme, an unparsable URL, or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let resource = self.resource.trim();
        if resource.is_empty() {
            return Err(ConfigurationError::MissingResource);
        }

        let url = Url::parse(resource).map_err(|err| match err {
            url::ParseError::RelativeUrlWithoutBase => ConfigurationError::MissingScheme,
            other => ConfigurationError::InvalidUrl(other),
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigurationError::UnsupportedScheme(other.to_string())),
        }

        if self.timeout == 0 {
            return Err(ConfigurationError::InvalidTimeout);
        }
        Ok(())
    }
}
