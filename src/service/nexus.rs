//! service::nexus
//!
//! Nexus REST implementation of [`MetadataService`].
//!
//! # Endpoints
//!
//! - `GET  {base}/service/local/status`
//! - `GET  {base}/service/local/index/custom_metadata/releases/{transport_id}`
//! - `POST {base}/service/local/index/custom_metadata/releases/{transport_id}`
//!
//! All requests carry HTTP Basic credentials and `Accept: application/json`.
//!
//! # Connections
//!
//! A `NexusService` owns its own `reqwest::Client`. It is built from a
//! [`ServiceConfig`] for one invocation and dropped afterwards; nothing is
//! pooled across invocations.
//!
//! # Example
//!
//! ```ignore
//! use nexmeta::core::types::ServiceConfig;
//! use nexmeta::service::{nexus::NexusService, MetadataService};
//!
//! let config = ServiceConfig::new("http://nexus:8081/nexus", "admin", "admin123");
//! let service = NexusService::new(&config)?;
//! let status = service.status().await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use super::traits::{MetadataService, ServiceError, ServiceStatus};
use crate::core::types::{MetadataSet, ServiceConfig};

/// Path of the status endpoint below the base URL.
const STATUS_PATH: &[&str] = &["service", "local", "status"];

/// Path of the custom metadata collection below the base URL.
const METADATA_PATH: &[&str] = &["service", "local", "index", "custom_metadata", "releases"];

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("nexmeta/", env!("CARGO_PKG_VERSION"));

/// Nexus service client.
pub struct NexusService {
    /// HTTP client for this invocation
    client: Client,
    /// Base URL, possibly with a context path
    base_url: Url,
    /// HTTP Basic user
    username: String,
    /// HTTP Basic password
    password: String,
}

// Custom Debug to avoid exposing the password
impl std::fmt::Debug for NexusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NexusService")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .finish()
    }
}

impl NexusService {
    /// Build a client for the given configuration.
    ///
    /// Applies the configured timeout to every request.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if the base URL does not parse or is not http(s)
    /// - `Unreachable` if the HTTP client cannot be initialized
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut builder = Client::builder().default_headers(default_headers());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Unreachable(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from path segments.
    ///
    /// Each segment is percent-encoded on its own, so a `/` inside a
    /// transport id does not split it.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the metadata resource for one artifact.
    fn metadata_url(&self, transport_id: &str) -> Result<Url, ServiceError> {
        let mut segments = METADATA_PATH.to_vec();
        segments.push(transport_id);
        self.endpoint(&segments)
    }

    /// Attach credentials to a request.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.password))
    }

    /// Send a request, mapping transport failures.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        self.authorized(request)
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))
    }

    /// Map a non-success response to an error.
    async fn error_from_response(response: Response, transport_id: &str) -> ServiceError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body
        };

        match status {
            StatusCode::NOT_FOUND => {
                ServiceError::NotFound(format!("no metadata resource for {}", transport_id))
            }
            _ => ServiceError::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl MetadataService for NexusService {
    fn name(&self) -> &'static str {
        "nexus"
    }

    async fn status(&self) -> Result<ServiceStatus, ServiceError> {
        let url = self.endpoint(STATUS_PATH)?;
        let response = self.send(self.client.get(url)).await?;

        let http_status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        Ok(ServiceStatus { http_status, body })
    }

    async fn read_metadata(&self, transport_id: &str) -> Result<MetadataSet, ServiceError> {
        let url = self.metadata_url(transport_id)?;
        let response = self.send(self.client.get(url)).await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, transport_id).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }

    async fn write_metadata(
        &self,
        transport_id: &str,
        set: &MetadataSet,
    ) -> Result<(), ServiceError> {
        let url = self.metadata_url(transport_id)?;
        let response = self.send(self.client.post(url).json(set)).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response, transport_id).await)
        }
    }
}

/// Headers sent with every request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}

/// Parse and check a base URL.
///
/// # Example
///
/// ```
/// use nexmeta::service::nexus::parse_base_url;
///
/// assert!(parse_base_url("http://nexus:8081/nexus").is_ok());
/// assert!(parse_base_url("ftp://nexus").is_err());
/// assert!(parse_base_url("not a url").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> Result<Url, ServiceError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ServiceError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw, other
        ))),
    }
}
