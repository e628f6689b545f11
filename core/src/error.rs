//! Error taxonomy for the search client.
//!
//! # Design
//! Three failure classes, split by where in the pipeline they occur:
//! `Serialization` happens locally before anything is sent, `Transport`
//! means no response was obtained at all, and `Server` means the service
//! answered with a non-2xx status. 400 and 500 get dedicated variants with
//! fixed messages because callers branch on them; every other status lands
//! in `Other` with the raw code for debugging.

use std::fmt;

use thiserror::Error;

/// A response was received but carried a non-2xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerError {
    /// 400 — the service rejected the request as malformed.
    BadRequest,
    /// 500 — the service failed internally.
    ServerUnavailable,
    /// Any other non-2xx status, including 3xx (redirects are not followed
    /// into a second request by this client).
    Other(u16),
}

impl ServerError {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ServerError::BadRequest,
            500 => ServerError::ServerUnavailable,
            other => ServerError::Other(other),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerError::BadRequest => 400,
            ServerError::ServerUnavailable => 500,
            ServerError::Other(code) => *code,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ServerError::BadRequest => "Bad request, couldn't parse the request.",
            ServerError::ServerUnavailable => "Server not found, please try again.",
            ServerError::Other(_) => "Network error.",
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message(), self.status())
    }
}

/// The transport could not complete the round-trip: DNS failure, refused
/// connection, timeout. The request may or may not have reached the server.
#[derive(Debug, Clone, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Errors returned by client operations.
///
/// Every operation resolves with exactly one of a payload or one of these;
/// nothing escapes as a panic.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be serialized to JSON. No network call
    /// was made.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// No response was obtained from the service.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-2xx status.
    #[error("{0}")]
    Server(ServerError),
}
