use base64::{Engine, engine::general_purpose::STANDARD};
use log::{debug, warn};
use reqwest::Client;

use crate::config;
use crate::error::{Error, Result};
use crate::spotify::REQUEST_TIMEOUT;
use crate::types::{Session, TokenResponse};

/// Spotify accounts endpoint used for the client-credentials exchange.
pub const ACCOUNTS_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Obtains bearer tokens for catalog calls.
///
/// Two modes exist. With an authenticated user session the provider hands
/// out the session's own token; without one it performs the non-interactive
/// client-credentials exchange against the accounts endpoint. The provider
/// keeps no token state of its own - every client-credentials request is a
/// fresh network round trip, which is what makes concurrent use trivially
/// safe.
#[derive(Debug)]
pub struct CredentialProvider {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl CredentialProvider {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        CredentialProvider {
            http: Client::new(),
            token_url: ACCOUNTS_TOKEN_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Builds a provider from `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] when either variable is missing, before
    /// any network call is made.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            config::spotify_client_id()?,
            config::spotify_client_secret()?,
        ))
    }

    /// Points the provider at a different token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Returns the token to use for a catalog call: the user session's
    /// bearer token when a session is present, otherwise a freshly obtained
    /// client-credentials token.
    pub async fn acquire(&self, session: Option<&Session>) -> Result<String> {
        if let Some(session) = session {
            return Ok(session.access_token.clone());
        }
        self.client_token().await
    }

    /// Forced renewal after the catalog rejected the previous token with a
    /// 401.
    ///
    /// Refreshing an expired user token is not implemented: a rejected user
    /// token degrades to a fresh client-scoped token, and user-only
    /// operations then fail upstream with an authentication error.
    pub async fn reacquire(&self, session: Option<&Session>) -> Result<String> {
        if session.is_some() {
            warn!("user token rejected upstream; falling back to client credentials");
        }
        self.client_token().await
    }

    /// Client-credentials exchange: form-encoded `grant_type` with a Basic
    /// authorization header of `base64(client_id:client_secret)`.
    async fn client_token(&self) -> Result<String> {
        debug!("requesting client-credentials token");
        let basic = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));

        let response = self
            .http
            .post(&self.token_url)
            .header("Authorization", format!("Basic {basic}"))
            .form(&[("grant_type", "client_credentials")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Credential(format!(
                "{} - {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}
