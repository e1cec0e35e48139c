use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A catalog artist. Two artists are the same iff their provider-assigned
/// ids match; the derived equality covers that since ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// An immutable track record as it flows between the gateway and the
/// matcher. `id` and `artist` are always populated when produced by the
/// gateway; the audio-feature fields stay at zero because the catalog
/// responses consumed today never carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: Artist,
    pub genre: Option<String>,
    #[serde(default)]
    pub tempo: f32,
    #[serde(default)]
    pub energy: f32,
    #[serde(default)]
    pub valence: f32,
    #[serde(default)]
    pub danceability: f32,
    pub album_image_url: Option<String>,
}

/// A transient playlist assembled from matcher output. Nothing is persisted
/// locally; the provider owns the playlist once it is exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub description: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Assembles the export playlist for a recommendation: the seed track
    /// first, its matches after it, name and description derived from the
    /// seed.
    pub fn from_seed(seed: Track, matches: Vec<Track>) -> Self {
        let name = format!("Inspired by {}", seed.name);
        let description = format!(
            "A playlist inspired by {} by {}",
            seed.name, seed.artist.name
        );

        let mut tracks = Vec::with_capacity(matches.len() + 1);
        tracks.push(seed);
        tracks.extend(matches);

        Playlist {
            name,
            description,
            tracks,
        }
    }
}

/// An authenticated end-user session as handed over by the web layer.
///
/// The core never stores one of these; every call that needs user scope
/// takes a `Session` explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Session {
    /// Whether the user token is past (or within four minutes of) its
    /// advertised expiry. Advisory for the web layer - the gateway itself
    /// treats a 401 response as the expiry signal.
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= self.obtained_at + self.expires_in.saturating_sub(240)
    }
}

/// Result of exporting a playlist into the user's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub external_url: String,
}

// --- wire payloads -------------------------------------------------------
//
// Response shapes of the Spotify endpoints the gateway talks to. Note the
// asymmetry: search nests tracks under `tracks.items`, while the top-tracks
// endpoint returns a flat `tracks` array.

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub items: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub album: Option<AlbumObject>,
}

impl TrackObject {
    /// Builds the immutable [`Track`] record the rest of the crate consumes.
    ///
    /// The provider orders album art largest-first; the second entry is the
    /// medium size used as the representative image, falling back to the
    /// first (and only) entry, or to none at all. Returns `None` for
    /// malformed objects without a single artist.
    pub fn into_track(self) -> Option<Track> {
        let artist = self.artists.into_iter().next()?;
        let album_image_url = self.album.and_then(|album| {
            let images = album.images;
            let pick = if images.len() > 1 { 1 } else { 0 };
            images.into_iter().nth(pick).map(|image| image.url)
        });

        Some(Track {
            id: self.id,
            name: self.name,
            artist: Artist {
                id: artist.id,
                name: artist.name,
            },
            genre: None,
            tempo: 0.0,
            energy: 0.0,
            valence: 0.0,
            danceability: 0.0,
            album_image_url,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumObject {
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageObject {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}
