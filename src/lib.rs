//! Musaic Recommendation Core
//!
//! This library is the decision-making core of the Musaic playlist builder.
//! Given a seed track it selects a bounded set of related tracks from the
//! Spotify catalog and can export the assembled playlist back into a user's
//! account. Everything web-facing (routing, cookies, CORS, the OAuth redirect
//! dance) lives in an outer layer that calls into this crate.
//!
//! # Modules
//!
//! - `config` - Environment-backed configuration (client credentials)
//! - `error` - Error taxonomy shared by every core operation
//! - `matcher` - Pluggable track-matching strategies
//! - `spotify` - Spotify Web API access (credentials + catalog gateway)
//! - `types` - Data structures and wire payloads
//!
//! # Example
//!
//! ```
//! use musaic::matcher::{ArtistMatcher, Matcher};
//! use musaic::spotify::{Catalog, SpotifyGateway};
//! use musaic::types::Playlist;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), musaic::error::Error> {
//!     musaic::config::load_env();
//!     let gateway = SpotifyGateway::from_env()?;
//!     let seed = gateway.track_by_id("11dFghVXANMlKmJXsNCbNl").await?;
//!     let matcher = ArtistMatcher::new(gateway);
//!     let matches = matcher.match_tracks(&seed, 9).await?;
//!     let playlist = Playlist::from_seed(seed, matches);
//!     println!("{}: {} tracks", playlist.name, playlist.tracks.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod spotify;
pub mod types;
