//! Error kinds surfaced by the aggregation path.
//!
//! Two fatal-to-the-request kinds exist: a missing provider credential
//! (`Configuration`) and an upstream fetch/parse failure (`Provider`).
//! Malformed query parameters are not an error at all; the API layer clamps
//! and defaults them instead of rejecting the request.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The provider credential is absent. No fallback exists.
    Configuration(String),
    /// The upstream call failed or returned a malformed body. The message is
    /// propagated upward unchanged; no retry is attempted.
    Provider(String),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateError::Configuration(msg) => write!(f, "{msg}"),
            AggregateError::Provider(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AggregateError {}

impl From<reqwest::Error> for AggregateError {
    fn from(e: reqwest::Error) -> Self {
        AggregateError::Provider(e.to_string())
    }
}
