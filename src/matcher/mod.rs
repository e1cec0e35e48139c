//! Track-matching strategies.
//!
//! A matcher turns a seed track into a bounded list of related tracks. The
//! trait is the extension seam for alternative strategies (genre affinity,
//! audio-feature similarity, collaborative filtering); the artist-affinity
//! strategy is the one that ships.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Track;

mod artist;

pub use artist::ArtistMatcher;

#[async_trait]
pub trait Matcher: Send + Sync {
    /// Returns up to `n` tracks related to `seed`.
    ///
    /// `n` is a strict upper bound; the result may be shorter or empty and
    /// that is not an error. The seed itself never appears in the result.
    /// Catalog failures propagate unchanged - a matcher performs no recovery
    /// of its own.
    async fn match_tracks(&self, seed: &Track, n: usize) -> Result<Vec<Track>>;
}
