//! Error types for the exchange rate fetcher.
//!
//! Every failure is reported to callers as a single [`FetchError`]; the
//! [`FetchCause`] it wraps is kept as the error source for diagnostics.

use std::io;

use thiserror::Error;

/// The single error kind returned by [`fetch_rate`](super::fetch_rate).
#[derive(Error, Debug)]
#[error("failed to fetch exchange rate from {url}")]
pub struct FetchError {
    url: String,
    #[source]
    cause: FetchCause,
}

impl FetchError {
    pub fn new(url: impl Into<String>, cause: FetchCause) -> Self {
        Self {
            url: url.into(),
            cause,
        }
    }

    /// Endpoint that was queried.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Underlying failure.
    pub fn cause(&self) -> &FetchCause {
        &self.cause
    }
}

/// Why a fetch failed.
#[derive(Error, Debug)]
pub enum FetchCause {
    /// DNS, connect, TLS or other transport-level failure.
    #[error("request could not be completed")]
    Transport(#[source] ureq::Transport),

    /// Server answered with a non-success status.
    #[error("server answered with HTTP status {0}")]
    Status(u16),

    /// Response body could not be read as text.
    #[error("response body could not be read")]
    Body(#[source] io::Error),

    /// Body is not JSON, or lacks `USDBRL.bid`.
    #[error("unexpected response format")]
    Json(#[source] serde_json::Error),

    /// `bid` is present but is not a usable rate.
    #[error("bid {0:?} is not a valid rate")]
    InvalidBid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_fetch_error_keeps_cause_as_source() {
        let err = FetchError::new("http://localhost/rate", FetchCause::Status(503));

        assert_eq!(err.url(), "http://localhost/rate");
        assert!(matches!(err.cause(), FetchCause::Status(503)));

        let source = err.source().expect("cause should be exposed as source");
        assert_eq!(source.to_string(), "server answered with HTTP status 503");
    }

    #[test]
    fn test_fetch_error_message_names_url() {
        let err = FetchError::new("http://example.test", FetchCause::InvalidBid("abc".into()));
        assert_eq!(
            err.to_string(),
            "failed to fetch exchange rate from http://example.test"
        );
    }
}
