use async_trait::async_trait;
use log::debug;

use crate::error::Result;
use crate::matcher::Matcher;
use crate::spotify::Catalog;
use crate::types::Track;

/// Artist-affinity strategy: recommends the seed artist's other popular
/// tracks.
///
/// The provider's ranked top-tracks order is preserved as-is - no
/// re-ranking, no randomization, no artist deduplication. The only filtering
/// is that the seed track never recommends itself.
pub struct ArtistMatcher<C> {
    catalog: C,
}

impl<C: Catalog> ArtistMatcher<C> {
    pub fn new(catalog: C) -> Self {
        ArtistMatcher { catalog }
    }
}

#[async_trait]
impl<C: Catalog> Matcher for ArtistMatcher<C> {
    async fn match_tracks(&self, seed: &Track, n: usize) -> Result<Vec<Track>> {
        let top_tracks = self.catalog.artist_top_tracks(&seed.artist.id).await?;
        debug!(
            "artist {} has {} top tracks, keeping up to {}",
            seed.artist.id,
            top_tracks.len(),
            n
        );

        Ok(top_tracks
            .into_iter()
            .filter(|track| track.id != seed.id)
            .take(n)
            .collect())
    }
}
