//! HTTP client for Parcelbase API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Parcelbase API.

use std::collections::HashMap;

use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ParcelbaseConfig, DEFAULT_API_BASE};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Parcelbase API.
///
/// The client handles:
/// - Base URI selection from configuration (or the production default)
/// - Default headers including User-Agent and the bearer API key
/// - Response buffering and JSON parsing
/// - Classification of non-2xx responses into [`ApiError`]
///
/// Transport concerns (TLS, connection pooling, timeouts) are owned by the
/// underlying `reqwest` client.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use parcelbase_api::{ParcelbaseConfig, ApiKey};
/// use parcelbase_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = ParcelbaseConfig::builder()
///     .api_key(ApiKey::new("pbk_test_key").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "shipments")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI including the version path (e.g., `https://api.parcelbase.com/v2`).
    base_uri: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use parcelbase_api::{ParcelbaseConfig, ApiKey};
    /// use parcelbase_api::clients::HttpClient;
    ///
    /// let config = ParcelbaseConfig::builder()
    ///     .api_key(ApiKey::new("pbk_test_key").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HttpClient::new(&config);
    /// ```
    #[must_use]
    pub fn new(config: &ParcelbaseConfig) -> Self {
        // Use the configured base if present, otherwise the production default
        let base_uri = config
            .api_base()
            .map_or_else(|| DEFAULT_API_BASE.to_string(), |b| b.as_ref().to_string());

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Parcelbase API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        // Build default headers
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.api_key().as_ref()),
        );

        if config.api_key().is_test_key() {
            tracing::debug!("Parcelbase client configured with a test-mode API key");
        }

        // Create reqwest client
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Parcelbase API.
    ///
    /// This method handles request validation, URL construction, header
    /// merging, response buffering, and error classification.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No response is received (`Api` with a `Connection` kind)
    /// - A non-2xx response is received (`Api`, classified by status code)
    /// - A 2xx body cannot be parsed as JSON (`Json`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        // Validate request first
        request.verify()?;

        // Build full URL
        let url = format!("{}/{}", self.base_uri, request.path);

        // Build the reqwest request
        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        // Add headers
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        // Add query params
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        // Add JSON body (sets Content-Type)
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        // Send request; transport failures have no status and classify as Connection
        let res = req_builder
            .send()
            .await
            .map_err(|e| ApiError::connection(e.to_string()))?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_bytes = res
            .bytes()
            .await
            .map_err(|e| ApiError::connection(e.to_string()))?;

        if !(200..=299).contains(&code) {
            let error = ApiError::classify(code, &body_bytes);
            tracing::warn!(
                status = code,
                code = %error.code,
                "Parcelbase API request to {} failed: {}",
                request.path,
                error.message
            );
            return Err(error.into());
        }

        // Parse body as JSON (empty bodies, e.g. from DELETE, become an empty object)
        let body = if body_bytes.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_slice(&body_bytes)?
        };

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for validation, transport, or API failures.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.request(builder.build()?).await
    }

    /// Sends a POST request with a JSON body to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for validation, transport, or API failures.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .build()?;
        self.request(request).await
    }

    /// Sends a PUT request with a JSON body to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for validation, transport, or API failures.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(body)
            .build()?;
        self.request(request).await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for validation, transport, or API failures.
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
        self.request(request).await
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
