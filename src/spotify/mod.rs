//! # Spotify Integration Module
//!
//! This module is the provider-access layer of the Musaic core: it obtains
//! and renews access credentials and exposes a narrow, typed interface over
//! the handful of Spotify Web API endpoints the recommendation flow needs.
//!
//! ## Architecture
//!
//! ```text
//! Matcher Engine / web layer
//!          |
//! Catalog trait  <- capability interface, test doubles plug in here
//!          |
//! SpotifyGateway (gateway) -- 401-refresh-and-retry, wire decoding
//!          |
//! CredentialProvider (auth) -- client-credentials exchange, user tokens
//!          |
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - credential acquisition. A fresh client-credentials token per
//!   call when no user session exists, the session's bearer token when one
//!   does. There is deliberately no token cache at this layer.
//! - [`gateway`] - the four catalog operations (search, track lookup, artist
//!   top tracks, playlist export). Each read operation recovers from exactly
//!   one 401 by forcing a credential renewal and retrying once; every other
//!   failure is surfaced unchanged.
//!
//! ## Error Handling
//!
//! All operations return [`crate::error::Error`]. Rate limiting, backoff and
//! request queuing are explicitly not implemented here - a deployment that
//! needs them layers an outer limiter over this module.
//!
//! ## Thread Safety
//!
//! The provider is stateless and the gateway holds only immutable
//! configuration plus a `reqwest::Client`, so every operation may be called
//! from concurrent tasks without shared mutable token state.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CreatedPlaylist, Session, Track};

pub mod auth;
pub mod gateway;

pub use auth::CredentialProvider;
pub use gateway::SpotifyGateway;

/// Fixed bound applied to every network round trip to the provider.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability interface over the third-party catalog.
///
/// The matcher engine and the web layer consume the catalog exclusively
/// through this trait; [`SpotifyGateway`] is the production implementation
/// and tests substitute in-memory doubles.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Searches the catalog for tracks, preserving the provider's relevance
    /// order. The user session token is preferred when one is present.
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        session: Option<&Session>,
    ) -> Result<Vec<Track>>;

    /// Looks up a single track by its provider id.
    async fn track_by_id(&self, track_id: &str) -> Result<Track>;

    /// Returns the provider's ranked top tracks for an artist, in provider
    /// order.
    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>>;

    /// Creates a playlist in the user's account and adds the given tracks to
    /// it, in order. Requires an authenticated user session.
    async fn create_playlist(
        &self,
        name: &str,
        tracks: &[Track],
        description: Option<&str>,
        session: Option<&Session>,
    ) -> Result<CreatedPlaylist>;
}
