//! Common error types used across the workspace.

/// Reasons a switch configuration is rejected before the switch is created.
///
/// All of these are fatal to setup: the host must not register a switch
/// whose configuration produced one of them.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// No resource URL was configured.
    #[error("missing resource")]
    MissingResource,

    /// The resource URL has no `http://` or `https://` scheme.
    #[error("missing scheme")]
    MissingScheme,

    /// The resource URL uses a scheme other than `http` or `https`.
    #[error("unsupported scheme {0:?}")]
    UnsupportedScheme(String),

    /// The resource URL could not be parsed.
    #[error("invalid resource url")]
    InvalidUrl(#[source] url::ParseError),

    /// The request timeout is zero.
    #[error("timeout must be a positive number of seconds")]
    InvalidTimeout,

    /// One of the configured templates does not compile.
    #[error("invalid template in {field}")]
    InvalidTemplate {
        /// Configuration key holding the template.
        field: &'static str,
        /// Underlying renderer error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The diagnostic request could not reach the resource.
    #[error("unreachable endpoint")]
    UnreachableEndpoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_scheme() {
        assert_eq!(
            ConfigurationError::MissingScheme.to_string(),
            "missing scheme"
        );
    }

    #[test]
    fn should_display_unreachable_endpoint() {
        assert_eq!(
            ConfigurationError::UnreachableEndpoint.to_string(),
            "unreachable endpoint"
        );
    }

    #[test]
    fn should_display_template_field() {
        let err = ConfigurationError::InvalidTemplate {
            field: "value_template",
            source: "unexpected end of input".into(),
        };
        assert_eq!(err.to_string(), "invalid template in value_template");
    }

    #[test]
    fn should_expose_template_source() {
        use std::error::Error;

        let err = ConfigurationError::InvalidTemplate {
            field: "body_on",
            source: "unexpected end of input".into(),
        };
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("unexpected end of input")
        );
    }
}
