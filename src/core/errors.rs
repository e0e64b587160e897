use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The exchange answered, but the answer was not a success.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The request never produced a response (connect failure, timeout,
    /// unreadable body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid order book \"{book}\" (choose from {})", format_allowed(.allowed))]
    InvalidOrderBook {
        book: String,
        allowed: Vec<&'static str>,
    },

    #[error("Invalid currency \"{currency}\" (choose from {})", format_allowed(.allowed))]
    InvalidCurrency {
        currency: String,
        allowed: Vec<&'static str>,
    },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// True for input rejected before any network call.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOrderBook { .. } | Self::InvalidCurrency { .. }
        )
    }

    /// True for failures at or after the HTTP call.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Http(_))
    }

    /// Exchange-reported error code, if the exchange sent an error object.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Request(err) => err.error_code.as_deref(),
            _ => None,
        }
    }

    pub fn http_code(&self) -> Option<u16> {
        match self {
            Self::Request(err) => Some(err.http_code),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn format_allowed(allowed: &[&'static str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
    format!("[{}]", quoted.join(", "))
}

/// A response from the exchange that could not be accepted.
///
/// Carries everything needed to log the failure verbatim: the request URL,
/// the raw body, the response headers and status, and the exchange's own
/// error code when the body contained an `error` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub url: String,
    pub body: String,
    pub headers: HashMap<String, String>,
    pub http_code: u16,
    pub error_code: Option<String>,
    pub message: String,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RequestError {}
