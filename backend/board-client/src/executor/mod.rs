//! Session-guarded request executor.
//!
//! Every call to the backend goes through [`GuardedExecutor::guarded_request`],
//! which owns the cross-cutting authentication contract:
//!
//! - no token: short-circuit, no network call, `Unauthenticated`
//! - HTTP 401: clear the session unless the token was already replaced,
//!   `Unauthenticated`
//! - HTTP 2xx: decode the body into `T` (an empty body decodes as JSON `null`)
//! - anything else: typed `Failure`
//!
//! Exactly one attempt is made per call. Retry policy belongs to the
//! caller, see [`crate::retry`].

pub mod guard;
pub mod outcome;

pub use guard::SessionGuard;
pub use outcome::GuardedOutcome;

use crate::config::ClientConfig;
use crate::error::{ClientError, ConfigError, RequestError};
use crate::session::Session;

use common::{BearerToken, ErrorLocation, HttpStatusCode};

use std::fmt;
use std::panic::Location;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const CONTENT_TYPE_JSON: &str = "application/json";
const EMPTY_BODY_AS_JSON: &[u8] = b"null";

/// Methods the backend accepts. Reads and writes are both POST in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        };
        write!(f, "{name}")
    }
}

struct RawResponse {
    status: HttpStatusCode,
    body: Vec<u8>,
}

#[derive(Clone)]
pub struct GuardedExecutor {
    base_url: Url,
    client: Client,
}

impl GuardedExecutor {
    pub fn new(base_url_str: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url_str, DEFAULT_TIMEOUT_DURATION)
    }

    #[track_caller]
    pub fn with_timeout(base_url_str: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url_str)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                RequestError::invalid_request(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        Self::with_timeout(&config.api.base_url, config.api.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform one authenticated request.
    ///
    /// # Arguments
    /// * `endpoint_path` - Backend-relative path, e.g. `employer/get-cost-centers`
    /// * `method` - HTTP method
    /// * `body` - Optional JSON body
    /// * `session` - Session providing the bearer token; cleared on 401
    pub async fn guarded_request<B, T>(
        &self,
        endpoint_path: &str,
        method: Method,
        body: Option<&B>,
        session: &Session,
    ) -> GuardedOutcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = match session.bearer_token().await {
            Some(token) if !token.is_empty() => token,
            _ => {
                debug!("No session token for {method} {endpoint_path}, skipping request");
                return GuardedOutcome::Unauthenticated;
            }
        };

        let response = match self.send(endpoint_path, method, body, Some(&token)).await {
            Ok(response) => response,
            Err(error) => {
                debug!(
                    "{method} {endpoint_path} failed before a response ({}): {error}",
                    error.error_category()
                );
                return GuardedOutcome::Failure(error);
            }
        };

        if response.status.is_unauthorized() {
            let cleared = session.invalidate(&token).await;
            warn!(
                "{method} {endpoint_path} returned {}, session invalidated (cleared: {cleared})",
                response.status
            );
            return GuardedOutcome::Unauthenticated;
        }

        match decode_response(endpoint_path, response) {
            Ok(payload) => GuardedOutcome::Success(payload),
            Err(error) => GuardedOutcome::Failure(error),
        }
    }

    /// Perform one request without a session, e.g. sign-in.
    ///
    /// A 401 here is an ordinary `RequestError::Http`, not a session event.
    pub async fn unguarded_request<B, T>(
        &self,
        endpoint_path: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(endpoint_path, method, body, None).await?;
        decode_response(endpoint_path, response)
    }

    async fn send<B>(
        &self,
        endpoint_path: &str,
        method: Method,
        body: Option<&B>,
        token: Option<&BearerToken>,
    ) -> Result<RawResponse, RequestError>
    where
        B: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(endpoint_path.trim_start_matches('/'))
            .map_err(|e| {
                RequestError::invalid_request(format!("Invalid endpoint '{endpoint_path}': {e}"))
            })?;

        let mut request = self
            .client
            .request(method.as_reqwest(), url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON);

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token.header_value());
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|e| {
                RequestError::invalid_request(format!("Failed to serialize request body: {e}"))
            })?;
            request = request.body(payload);
        }

        debug!("{method} {endpoint_path}");

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::from_reqwest(&e))?;

        let status = HttpStatusCode(response.status().as_u16());
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::from_reqwest(&e))?
            .to_vec();

        Ok(RawResponse { status, body })
    }
}

#[track_caller]
fn decode_response<T>(endpoint_path: &str, response: RawResponse) -> Result<T, RequestError>
where
    T: DeserializeOwned,
{
    if !response.status.is_success() {
        return Err(RequestError::from_status(response.status, &response.body));
    }

    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        EMPTY_BODY_AS_JSON
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|e| {
        RequestError::parse(format!("Unexpected response from {endpoint_path}: {e}"))
    })
}

/// Parse the base URL and make sure it ends with `/` so relative joins
/// keep any path prefix (e.g. `https://host/api/`).
#[track_caller]
fn normalize_base_url(base_url_str: &str) -> Result<Url, ConfigError> {
    let mut base_url = Url::parse(base_url_str).map_err(|e| ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("Invalid base URL '{base_url_str}': {e}"),
    })?;

    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Base URL must be http or https: {base_url_str}"),
        });
    }

    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }

    Ok(base_url)
}
