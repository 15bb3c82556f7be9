//! Error types for the Spot client.
//!
//! Validation failures ([`Error::MissingCredentials`], [`Error::InvalidParameter`])
//! are raised before any network call is attempted. Transport and API failures
//! are surfaced unmodified; nothing is retried internally.

use reqwest::StatusCode;

/// Result alias used throughout the Spot client.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Client error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The call needs an API key or secret that was not configured.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// A caller-supplied value violates the endpoint contract.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as sent on the wire.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Network or timeout failure reported by the HTTP transport.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The exchange answered with a non-2xx status.
    #[error("api error {code} (http {status}): {msg}")]
    Api {
        /// HTTP status code.
        status: StatusCode,
        /// Exchange-assigned error code, e.g. `-1121` for an invalid symbol.
        code: i64,
        /// Exchange-provided message.
        msg: String,
    },

    /// A response body did not match the expected shape.
    #[error("json error: {0}")]
    Decode(#[from] serde_json::Error),

    /// WebSocket setup failure.
    #[error("websocket error: {0}")]
    WebSocket(String),

    /// Local I/O failure, e.g. while starting the blocking runtime.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the exchange error code if this is an [`Error::Api`].
    #[must_use]
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true when the error was raised locally, before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials(_) | Self::InvalidParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::invalid("limit", "must be at most 5000");
        assert_eq!(
            err.to_string(),
            "invalid parameter `limit`: must be at most 5000"
        );

        let err = Error::Api {
            status: StatusCode::BAD_REQUEST,
            code: -1121,
            msg: "Invalid symbol.".into(),
        };
        assert_eq!(
            err.to_string(),
            "api error -1121 (http 400 Bad Request): Invalid symbol."
        );
        assert_eq!(err.api_code(), Some(-1121));
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::MissingCredentials("api secret").is_validation());
        assert!(Error::invalid("symbol", "must not be empty").is_validation());
        assert!(!Error::WebSocket("closed".into()).is_validation());
    }
}
