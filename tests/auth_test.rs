use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use musaic::error::Error;
use musaic::spotify::CredentialProvider;
use musaic::types::Session;

#[derive(Default)]
struct TokenEndpoint {
    requests: AtomicUsize,
    reject: bool,
    last_auth_header: std::sync::Mutex<Option<String>>,
}

async fn token(State(state): State<Arc<TokenEndpoint>>, headers: HeaderMap) -> Response {
    let n = state.requests.fetch_add(1, Ordering::SeqCst) + 1;
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_auth_header.lock().unwrap() = auth;

    if state.reject {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_client", "error_description": "Invalid client secret"})),
        )
            .into_response();
    }
    Json(json!({"access_token": format!("token-{n}"), "expires_in": 3600})).into_response()
}

async fn serve(state: Arc<TokenEndpoint>) -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/token")
}

fn user_session() -> Session {
    Session {
        access_token: "user-token".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-modify-public".to_string(),
        expires_in: 3600,
        obtained_at: 0,
    }
}

#[tokio::test]
async fn acquire_without_session_exchanges_client_credentials() {
    let state = Arc::new(TokenEndpoint::default());
    let token_url = serve(Arc::clone(&state)).await;

    let provider = CredentialProvider::new("fake_client_id", "fake_client_secret")
        .with_token_url(token_url);
    let token = provider.acquire(None).await.unwrap();

    assert_eq!(token, "token-1");
    assert_eq!(state.requests.load(Ordering::SeqCst), 1);
    // Basic auth header carries base64(client_id:client_secret)
    let auth = state.last_auth_header.lock().unwrap().clone().unwrap();
    assert!(auth.starts_with("Basic "));
}

#[tokio::test]
async fn acquire_with_session_hands_out_the_user_token() {
    let state = Arc::new(TokenEndpoint::default());
    let token_url = serve(Arc::clone(&state)).await;

    let provider = CredentialProvider::new("fake_client_id", "fake_client_secret")
        .with_token_url(token_url);
    let session = user_session();
    let token = provider.acquire(Some(&session)).await.unwrap();

    assert_eq!(token, "user-token");
    assert_eq!(state.requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn reacquire_falls_back_to_client_credentials_even_with_a_session() {
    let state = Arc::new(TokenEndpoint::default());
    let token_url = serve(Arc::clone(&state)).await;

    let provider = CredentialProvider::new("fake_client_id", "fake_client_secret")
        .with_token_url(token_url);
    let session = user_session();
    let token = provider.reacquire(Some(&session)).await.unwrap();

    assert_eq!(token, "token-1");
    assert_eq!(state.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_exchange_is_a_credential_error_with_status_and_body() {
    let state = Arc::new(TokenEndpoint {
        reject: true,
        ..TokenEndpoint::default()
    });
    let token_url = serve(Arc::clone(&state)).await;

    let provider = CredentialProvider::new("fake_client_id", "wrong_secret")
        .with_token_url(token_url);
    let err = provider.acquire(None).await.unwrap_err();

    match err {
        Error::Credential(message) => {
            assert!(message.contains("400"));
            assert!(message.contains("invalid_client"));
        }
        other => panic!("expected Credential error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_client_configuration_is_a_credential_error() {
    // No other test in this binary reads the process environment, so
    // clearing these variables cannot race with them.
    unsafe {
        std::env::remove_var("SPOTIFY_CLIENT_ID");
        std::env::remove_var("SPOTIFY_CLIENT_SECRET");
    }

    let err = CredentialProvider::from_env().unwrap_err();

    assert!(matches!(err, Error::Credential(_)));
}
