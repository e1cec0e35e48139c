use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};

use crate::error::{Error, Result};
use crate::spotify::{Catalog, CredentialProvider, REQUEST_TIMEOUT};
use crate::types::{
    AddTracksRequest, CreatePlaylistRequest, CreatePlaylistResponse, CreatedPlaylist,
    SearchResponse, Session, TopTracksResponse, Track, TrackObject, UserProfile,
};

/// Spotify Web API base URL.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Hard provider limit on track references per add-tracks call.
const TRACK_ADD_BATCH: usize = 50;

const DEFAULT_PLAYLIST_DESCRIPTION: &str = "Created by Musaic";

/// Production [`Catalog`] implementation over the Spotify Web API.
///
/// Upstream bearer tokens expire unpredictably, so each read operation
/// recovers from a single 401 by forcing one credential renewal and retrying
/// exactly once - enough to ride out an expiry without risking a retry loop.
/// Any status other than 401 or success is a hard provider error.
pub struct SpotifyGateway {
    http: Client,
    api_url: String,
    timeout: Duration,
    credentials: CredentialProvider,
}

impl SpotifyGateway {
    pub fn new(credentials: CredentialProvider) -> Self {
        SpotifyGateway {
            http: Client::new(),
            api_url: SPOTIFY_API_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            credentials,
        }
    }

    /// Builds a gateway whose credentials come from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(CredentialProvider::from_env()?))
    }

    /// Points the gateway at a different catalog base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Overrides the per-call timeout bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET with the one-retry-on-401 policy. The first attempt uses whatever
    /// token `acquire` hands out; a 401 forces a renewal and one more
    /// attempt, whose response is returned as-is - a second 401 reaches the
    /// caller as an upstream error.
    async fn get_with_retry(
        &self,
        url: &str,
        query: &[(&str, String)],
        session: Option<&Session>,
    ) -> Result<Response> {
        let token = self.credentials.acquire(session).await?;
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&token)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("catalog call returned 401, retrying once with a fresh token");
        let token = self.credentials.reacquire(session).await?;
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&token)
            .timeout(self.timeout)
            .send()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl Catalog for SpotifyGateway {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        session: Option<&Session>,
    ) -> Result<Vec<Track>> {
        let url = format!("{}/search", self.api_url);
        let params = [
            ("q", query.to_string()),
            ("type", "track".to_string()),
            ("limit", limit.to_string()),
        ];

        let response = self.get_with_retry(&url, &params, session).await?;
        let response = check_status(response).await?;
        let body: SearchResponse = response.json().await?;

        Ok(tracks_from(body.tracks.items))
    }

    async fn track_by_id(&self, track_id: &str) -> Result<Track> {
        let url = format!("{}/tracks/{}", self.api_url, track_id);

        let response = self.get_with_retry(&url, &[], None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("track {track_id}")));
        }
        let response = check_status(response).await?;
        let object: TrackObject = response.json().await?;

        object
            .into_track()
            .ok_or_else(|| Error::Decode(format!("track {track_id} carries no artist")))
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        // Flat `tracks` array on this endpoint, not the `tracks.items` page
        // shape search uses.
        let url = format!("{}/artists/{}/top-tracks", self.api_url, artist_id);
        let params = [("market", "US".to_string())];

        let response = self.get_with_retry(&url, &params, None).await?;
        let response = check_status(response).await?;
        let body: TopTracksResponse = response.json().await?;

        Ok(tracks_from(body.tracks))
    }

    async fn create_playlist(
        &self,
        name: &str,
        tracks: &[Track],
        description: Option<&str>,
        session: Option<&Session>,
    ) -> Result<CreatedPlaylist> {
        let Some(session) = session else {
            return Err(Error::AuthenticationRequired);
        };
        let token = &session.access_token;

        // Three sequential calls: who is the user, create the empty
        // playlist, then fill it. All of them are user-scoped, so they use
        // the session token directly - renewing it here could only degrade
        // to a client-scoped token that cannot perform any of these calls.
        let url = format!("{}/me", self.api_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        let user: UserProfile = response.json().await?;

        let url = format!("{}/users/{}/playlists", self.api_url, user.id);
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.unwrap_or(DEFAULT_PLAYLIST_DESCRIPTION).to_string(),
            public: true,
        };
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        let created: CreatePlaylistResponse = response.json().await?;

        // At most 50 track references per add call, issued in order. A
        // failed batch aborts the remainder and leaves the playlist with the
        // batches added so far - there is no rollback.
        let uris: Vec<String> = tracks
            .iter()
            .map(|track| format!("spotify:track:{}", track.id))
            .collect();
        let url = format!("{}/playlists/{}/tracks", self.api_url, created.id);
        for batch in uris.chunks(TRACK_ADD_BATCH) {
            let request = AddTracksRequest {
                uris: batch.to_vec(),
            };
            let response = self
                .http
                .post(&url)
                .bearer_auth(token)
                .json(&request)
                .timeout(self.timeout)
                .send()
                .await?;
            check_status(response).await?;
        }

        debug!("created playlist {} with {} tracks", created.id, uris.len());
        Ok(CreatedPlaylist {
            id: created.id,
            external_url: created.external_urls.spotify.unwrap_or_default(),
        })
    }
}

/// Maps any non-success status to [`Error::Upstream`], keeping the body for
/// diagnosis.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Upstream {
        status: status.as_u16(),
        body,
    })
}

/// Decodes gateway track objects, dropping malformed entries without an
/// artist rather than failing the whole page.
fn tracks_from(items: Vec<TrackObject>) -> Vec<Track> {
    items
        .into_iter()
        .filter_map(TrackObject::into_track)
        .collect()
}
