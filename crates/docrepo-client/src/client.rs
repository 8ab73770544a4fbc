//! The API gateway client.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use docrepo_core::config::api::ApiConfig;
use docrepo_core::error::{AppError, ErrorKind};
use docrepo_core::result::AppResult;
use docrepo_core::traits::store::{AUTH_TOKEN_KEY, KeyValueStore};

/// Message used when a failed response has an empty body.
pub(crate) const REQUEST_FAILED: &str = "Request failed";

/// Authenticated client for the document-repository API.
///
/// Cloning is cheap; clones share the HTTP connection pool, the store
/// and the in-memory token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Durable store holding the token and last-known profile.
    store: Arc<dyn KeyValueStore>,
    /// Token attached to every request, mirrored from the store.
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client, restoring any token saved by a previous sign-in.
    pub async fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Url::parse(&config.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;

        let token = store.get(AUTH_TOKEN_KEY).await?;
        debug!(authenticated = token.is_some(), "API client initialized");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            token: Arc::new(RwLock::new(token)),
        })
    }

    /// The session store backing this client.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current bearer token.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Whether a token is present. Says nothing about its validity.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Use and persist a new token.
    pub async fn set_token(&self, token: &str) -> AppResult<()> {
        self.store.set(AUTH_TOKEN_KEY, token).await?;
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    /// Forget the token in memory and in the store.
    pub async fn clear_token(&self) -> AppResult<()> {
        *self.token.write().await = None;
        self.store.remove(AUTH_TOKEN_KEY).await
    }

    /// Absolute URL for an endpoint path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL whose last segment is `segment`, percent-encoded as a
    /// single path segment (slashes included).
    pub(crate) fn url_with_segment(&self, path: &str, segment: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| AppError::internal(format!("Invalid endpoint URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| AppError::internal("API base URL cannot carry a path"))?
            .push(segment);
        Ok(url)
    }

    /// Request with the bearer token only.
    pub(crate) async fn authorized(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.token.read().await.as_deref() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Request with the bearer token and a JSON content type.
    pub(crate) async fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.json_request(method, self.url(path)).await
    }

    /// Like [`builder`](Self::builder) for an already-built URL.
    pub(crate) async fn json_request(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        self.authorized(method, url)
            .await
            .header(CONTENT_TYPE, "application/json")
    }

    /// `GET` a JSON endpoint.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let builder = self.builder(Method::GET, path).await;
        execute(builder, REQUEST_FAILED).await
    }

    /// `GET` a JSON endpoint with query parameters.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.builder(Method::GET, path).await.query(query);
        execute(builder, REQUEST_FAILED).await
    }

    /// Send a JSON body and decode the JSON response.
    pub async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.builder(method, path).await.json(body);
        execute(builder, REQUEST_FAILED).await
    }

    /// Send a multipart form. No JSON content type is set so that the
    /// multipart boundary header survives.
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        fallback: &str,
    ) -> AppResult<T> {
        let builder = self
            .authorized(Method::POST, self.url(path))
            .await
            .multipart(form);
        execute(builder, fallback).await
    }

    /// `GET` an endpoint whose body is consumed as a byte stream.
    ///
    /// The status is checked before the response is handed back.
    pub async fn get_stream<Q>(&self, path: &str, query: &Q, fallback: &str) -> AppResult<Response>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self
            .authorized(Method::GET, self.url(path))
            .await
            .query(query);
        let response = builder.send().await.map_err(transport_error)?;
        check_status(response, fallback).await
    }

    /// `PUT` bytes straight to a pre-signed storage URL.
    ///
    /// No bearer token is sent; the signature in the URL is the credential.
    pub async fn put_presigned(&self, url: &str, body: Bytes, content_type: &str) -> AppResult<()> {
        let url = collapse_path_slashes(url)?;
        debug!(host = url.host_str().unwrap_or_default(), bytes = body.len(), "PUT pre-signed URL");
        let response = self
            .http
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response, "File upload failed").await?;
        Ok(())
    }
}

/// Send a request and decode its JSON body.
///
/// An empty 2xx body decodes as `{}`, so message-only responses may be
/// empty.
pub(crate) async fn execute<T: DeserializeOwned>(builder: RequestBuilder, fallback: &str) -> AppResult<T> {
    let response = builder.send().await.map_err(transport_error)?;
    let response = check_status(response, fallback).await?;
    let body = response.bytes().await.map_err(transport_error)?;
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &body
    };
    serde_json::from_slice(body).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Unexpected response body: {e}"),
            e,
        )
    })
}

/// Turn a non-success response into an error carrying its text body.
pub(crate) async fn check_status(response: Response, fallback: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), path = %url, "API request failed");
    Err(AppError::from_response(status.as_u16(), &body, fallback))
}

/// Map a transport-level failure.
pub(crate) fn transport_error(err: reqwest::Error) -> AppError {
    let kind = if err.is_decode() {
        ErrorKind::Serialization
    } else {
        ErrorKind::Network
    };
    AppError::with_source(kind, format!("Request failed: {err}"), err)
}

/// Parse a URL and collapse runs of `/` in its path.
///
/// Pre-signed upload URLs have been issued with `host//key`, which the
/// storage service rejects.
fn collapse_path_slashes(raw: &str) -> AppResult<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| AppError::validation(format!("Invalid upload URL: {e}")))?;
    let mut collapsed = String::with_capacity(url.path().len());
    for ch in url.path().chars() {
        if ch == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(ch);
    }
    url.set_path(&collapsed);
    Ok(url)
}
