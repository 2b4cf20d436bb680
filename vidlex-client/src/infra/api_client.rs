use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use url::Url;

use crate::infra::errors::{ApiError, ApiResult};
use crate::infra::services::auth::Session;

/// HTTP client for the learning API.
///
/// Thin wrapper over `reqwest`: builds endpoint URLs, attaches session
/// headers and maps responses onto [`ApiError`]. Retries are left to the
/// caller.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = normalize_base_url(base_url.into());
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        info!("[ApiClient] Creating new API client with base URL: {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL of an endpoint relative to the API base.
    pub fn endpoint_url(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Url> {
        let raw = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| {
            ApiError::Network(format!("invalid request url '{raw}': {e}"))
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Attach bearer token and user headers of a session.
    fn with_session(builder: RequestBuilder, session: &Session) -> RequestBuilder {
        let builder = builder
            .bearer_auth(session.access_token())
            .header("x-user-id", session.user_id().as_str());
        if session.is_admin() {
            builder.header("x-user-role", "admin")
        } else {
            builder
        }
    }

    /// Authenticated GET
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        session: &Session,
    ) -> ApiResult<T> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!("[ApiClient] GET {}", url.path());
        let request = Self::with_session(self.client.get(url), session);
        self.execute_request(request).await
    }

    /// POST with a JSON body; authenticated when a session is given.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        session: Option<&Session>,
    ) -> ApiResult<T> {
        let url = self.endpoint_url(endpoint, &[])?;
        debug!("[ApiClient] POST {}", url.path());
        let request = self.client.post(url).json(body);
        let request = match session {
            Some(session) => Self::with_session(request, session),
            None => request,
        };
        self.execute_request(request).await
    }

    /// Execute a request and map status codes onto [`ApiError`]
    async fn execute_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = request.send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Err(ApiError::Decode(
                "Empty response from server (204 No Content)".to_string(),
            )),
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                let message = server_error_message(status.as_u16(), &body);
                warn!(
                    "[ApiClient] Request failed with status {}: {}",
                    status, message
                );
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Normalize a user-provided base URL.
///
/// Adds `http://` when the scheme is missing and trims trailing slashes so
/// endpoint joins never produce `//`.
pub fn normalize_base_url(raw: String) -> String {
    let trimmed = raw.trim().trim_end_matches('/').to_string();
    let with_scheme =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed
        } else {
            format!("http://{}", trimmed)
        };
    if with_scheme != raw {
        warn!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, with_scheme
        );
    }
    with_scheme
}

/// Human-readable message of a failed response.
///
/// Prefers the `message` field of a JSON body, then the raw body, then a
/// generic status line.
pub fn server_error_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) =
        serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = map.get("message")
    {
        return match message {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
    }
    if body.trim().is_empty() {
        format!("Request failed with status {status}")
    } else {
        body.to_string()
    }
}
