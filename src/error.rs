//! Error taxonomy for the Musaic core.
//!
//! Every fallible core operation returns [`Error`]. The variants are coarse
//! on purpose: the web layer branches on them to pick a user-visible response
//! (not-found vs. generic failure vs. "please sign in"), so they must stay
//! distinguishable, but the core never recovers from any of them beyond the
//! single 401-triggered retry inside the gateway.

use thiserror::Error;

/// A convenient Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No access token could be obtained at all - missing client
    /// configuration or a rejection from the accounts endpoint. The message
    /// carries the upstream status and body for diagnosis.
    #[error("failed to retrieve access token: {0}")]
    Credential(String),

    /// The operation needs a user-scoped token but only a client-scoped one
    /// is available.
    #[error("operation requires an authenticated user session")]
    AuthenticationRequired,

    /// The provider reports no entity for the given id.
    #[error("no catalog entry for {0}")]
    NotFound(String),

    /// Any non-success provider response not handled more specifically.
    /// Never retried.
    #[error("catalog API error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// A network call exceeded the fixed per-call timeout bound.
    #[error("catalog request timed out")]
    Timeout,

    /// A provider response could not be decoded into the expected shape.
    #[error("malformed catalog response: {0}")]
    Decode(String),

    /// Connection-level failure before any HTTP status was received.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Transport(err)
        }
    }
}
