//! The HTTP client shared by both stores.
//!
//! [`ApiClient`] holds the base URL and the current bearer token. The token
//! cell is process-wide state: the session store is its only writer, the
//! pairing store only reads it (through the requests it issues).

use std::sync::{PoisonError, RwLock};

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Client for the waveline backend API.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build a client for the given configuration, with no token installed.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install the bearer token used for authenticated calls.
    ///
    /// Only the session store may call this.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Drop the bearer token. Subsequent authenticated calls will be sent
    /// without an `Authorization` header and rejected by the backend.
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.post(self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.delete(self.url(path)))
    }

    /// POST without a token. Only login and signup precede token issuance.
    pub(crate) fn post_anonymous(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }
}

/// Error body shape used by every backend route.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Map a non-2xx response to [`ApiError::Backend`], preferring the server's
/// own `message` over the per-operation `fallback`.
pub(crate) async fn expect_success(resp: Response, fallback: &str) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| fallback.to_string());

    tracing::debug!(status = status.as_u16(), %message, "backend rejected request");

    Err(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}
