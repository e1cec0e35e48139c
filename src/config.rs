//! Configuration management for the Musaic core.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and an optional `.env` file. Only the Spotify client
//! credentials live here: endpoint URLs are constructor defaults on the
//! credential provider and gateway so tests can point them at a local server.
//!
//! Unlike most lookups of required variables, the credential getters return a
//! `Result` instead of panicking - a missing client id or secret must surface
//! to callers as a credential error, not take the process down.

use std::env;

use crate::error::{Error, Result};

/// Loads environment variables from a `.env` file in the working directory.
///
/// Missing files are fine - deployments are expected to configure the process
/// environment directly, the file is a development convenience.
pub fn load_env() {
    let _ = dotenv::dotenv();
}

/// Returns the Spotify API client ID for authentication.
///
/// Reads the `SPOTIFY_CLIENT_ID` environment variable, obtained when
/// registering the application with Spotify's developer platform.
///
/// # Errors
///
/// Returns [`Error::Credential`] when the variable is not set.
pub fn spotify_client_id() -> Result<String> {
    env::var("SPOTIFY_CLIENT_ID")
        .map_err(|_| Error::Credential("SPOTIFY_CLIENT_ID not set in environment".to_string()))
}

/// Returns the Spotify API client secret for authentication.
///
/// Reads the `SPOTIFY_CLIENT_SECRET` environment variable. The secret should
/// never appear in logs or version control.
///
/// # Errors
///
/// Returns [`Error::Credential`] when the variable is not set.
pub fn spotify_client_secret() -> Result<String> {
    env::var("SPOTIFY_CLIENT_SECRET")
        .map_err(|_| Error::Credential("SPOTIFY_CLIENT_SECRET not set in environment".to_string()))
}
