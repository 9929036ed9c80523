//! Error types for Parcelbase API communication.
//!
//! This module contains the error classification layer that turns non-2xx
//! HTTP responses into typed errors, plus the unified error type returned
//! by the HTTP client and resource methods.
//!
//! # Classification
//!
//! Every non-2xx response is classified by status code into an
//! [`ApiErrorKind`], so callers can branch on the kind of failure without
//! string-matching messages:
//!
//! ```rust,ignore
//! match Shipment::retrieve(&client, "shp_123").await {
//!     Ok(shipment) => println!("{:?}", shipment),
//!     Err(HttpError::Api(e)) if e.kind == ApiErrorKind::NotFound => {
//!         println!("shipment does not exist");
//!     }
//!     Err(e) => println!("API error: {e}"),
//! }
//! ```
//!
//! # Error Body Shapes
//!
//! The API reports error details as `{"error": {"code", "message", "errors"}}`.
//! The `message` field is usually a string, but some endpoints (notably
//! insurance and claims) return arrays or maps of nested messages instead.
//! [`flatten_message`] collapses every observed shape into one readable
//! string; the raw sub-error structure is preserved on [`ApiError::errors`]
//! for programmatic inspection.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Sentinel error code used when the response body carries no parseable
/// error details (e.g., an HTML 502 page from an intermediate proxy).
pub const UNPARSEABLE_CODE: &str = "UNABLE_TO_PARSE_RESPONSE";

/// Maximum recursion depth when flattening nested error messages.
///
/// The error body is server-controlled input; deeper nesting is ignored.
const MAX_FLATTEN_DEPTH: usize = 32;

/// The kind of failure reported by the API, derived from the HTTP status code.
///
/// Classification is total: every status code maps to exactly one kind, and
/// unrecognized codes map to [`ApiErrorKind::UnknownHttp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No HTTP response was received (transport failure, reported as status 0).
    Connection,
    /// An informational 1xx status, which the API never returns terminally.
    Retry,
    /// A 3xx redirect, which the SDK does not follow.
    Redirect,
    /// The request was malformed (400).
    BadRequest,
    /// The API key is missing or invalid (401).
    Unauthorized,
    /// A payment is required to perform the operation (402).
    PaymentRequired,
    /// The API key is not allowed to perform the operation (403).
    Forbidden,
    /// The requested resource does not exist (404).
    NotFound,
    /// The HTTP method is not supported by the endpoint (405).
    MethodNotAllowed,
    /// Proxy authentication is required (407).
    ProxyAuthRequired,
    /// The request timed out on the server (408).
    Timeout,
    /// The request was well-formed but semantically invalid (422).
    InvalidRequest,
    /// Too many requests were made in a given window (429).
    RateLimit,
    /// The API encountered an internal error (500).
    InternalServer,
    /// An upstream gateway timed out (502 or 504).
    GatewayTimeout,
    /// The API is temporarily unavailable (503).
    ServiceUnavailable,
    /// Any other HTTP status not covered above.
    UnknownHttp,
}

impl ApiErrorKind {
    /// Maps an HTTP status code to its error kind.
    ///
    /// The mapping is exhaustive over `u16`: there is no status code that
    /// fails to classify.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            0 => Self::Connection,
            100..=199 => Self::Retry,
            300..=399 => Self::Redirect,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            402 => Self::PaymentRequired,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            407 => Self::ProxyAuthRequired,
            408 => Self::Timeout,
            422 => Self::InvalidRequest,
            429 => Self::RateLimit,
            500 => Self::InternalServer,
            502 | 504 => Self::GatewayTimeout,
            503 => Self::ServiceUnavailable,
            _ => Self::UnknownHttp,
        }
    }
}

/// A structured field-level validation error.
///
/// This is the primary sub-error shape returned by most endpoints:
/// `{"field": "address.street1", "message": "cannot be blank"}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    /// The field the error applies to, if attributed.
    #[serde(default)]
    pub field: Option<String>,
    /// The human-readable error message.
    pub message: String,
    /// A suggested correction, if the API offers one.
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// One entry of an error response's `errors` array.
///
/// Most endpoints return structured [`FieldError`] pairs, but the insurance
/// and claim endpoints return bare strings and nested maps instead. Both
/// shapes are preserved losslessly; use [`SubError::message`] for a uniform
/// display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubError {
    /// A structured field/message pair.
    Field(FieldError),
    /// Any other JSON fragment, kept verbatim.
    Raw(Value),
}

impl SubError {
    /// Parses a sub-error from a raw JSON value.
    ///
    /// Values matching the `{field, message}` shape become [`SubError::Field`];
    /// everything else is retained as [`SubError::Raw`].
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value::<FieldError>(value.clone()) {
            Ok(field_error) => Self::Field(field_error),
            Err(_) => Self::Raw(value.clone()),
        }
    }

    /// Returns the field this sub-error is attributed to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Field(e) => e.field.as_deref(),
            Self::Raw(_) => None,
        }
    }

    /// Returns a display message for this sub-error.
    ///
    /// Raw fragments are flattened with [`flatten_message`].
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Field(e) => e.message.clone(),
            Self::Raw(value) => flatten_message(value),
        }
    }
}

/// A typed error returned by the Parcelbase API.
///
/// Carries the machine-checkable [`kind`](Self::kind), the original HTTP
/// status, the API error code, a flattened human-readable message, and the
/// full sub-error list for field-level inspection.
///
/// # Example
///
/// ```rust
/// use parcelbase_api::clients::{ApiError, ApiErrorKind};
///
/// let error = ApiError::classify(
///     422,
///     br#"{"error": {"code": "SHIPMENT.INVALID", "message": "Invalid shipment", "errors": []}}"#,
/// );
///
/// assert_eq!(error.kind, ApiErrorKind::InvalidRequest);
/// assert_eq!(error.code, "SHIPMENT.INVALID");
/// assert_eq!(error.message, "Invalid shipment");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// The classified error kind.
    pub kind: ApiErrorKind,
    /// The HTTP status code of the response (0 for transport failures).
    pub http_status: u16,
    /// The API error code (e.g., "SHIPMENT.POSTAGE.FAILURE"), or
    /// [`UNPARSEABLE_CODE`] when no structured details were present.
    pub code: String,
    /// The flattened human-readable error message.
    pub message: String,
    /// Field-level sub-errors, preserved in full.
    pub errors: Vec<SubError>,
}

impl ApiError {
    /// Classifies an HTTP response into a typed error.
    ///
    /// This never fails: if the body is not the expected
    /// `{"error": {"code", "message", "errors"}}` shape (or not JSON at
    /// all), the message degrades to the HTTP reason phrase and the code
    /// to [`UNPARSEABLE_CODE`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use parcelbase_api::clients::{ApiError, ApiErrorKind};
    ///
    /// // A proxy returned an HTML page instead of JSON
    /// let error = ApiError::classify(502, b"<html>Bad Gateway</html>");
    /// assert_eq!(error.kind, ApiErrorKind::GatewayTimeout);
    /// assert_eq!(error.message, "Bad Gateway");
    /// ```
    #[must_use]
    pub fn classify(http_status: u16, body: &[u8]) -> Self {
        let kind = ApiErrorKind::from_status(http_status);

        let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
            return Self {
                kind,
                http_status,
                code: UNPARSEABLE_CODE.to_string(),
                message: status_reason(http_status),
                errors: Vec::new(),
            };
        };

        let code = envelope
            .error
            .code
            .unwrap_or_else(|| UNPARSEABLE_CODE.to_string());

        // A message that flattens to nothing is as useless as no message
        let message = envelope
            .error
            .message
            .as_ref()
            .map(flatten_message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status_reason(http_status));

        let errors = envelope.error.errors.iter().map(SubError::from_value).collect();

        Self {
            kind,
            http_status,
            code,
            message,
            errors,
        }
    }

    /// Creates a connection error for a request that never received a response.
    ///
    /// Transport failures are classified as status 0 so they participate in
    /// the same taxonomy as HTTP errors.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Connection,
            http_status: 0,
            code: UNPARSEABLE_CODE.to_string(),
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

/// Expected JSON shape of an API error response.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    errors: Vec<Value>,
}

/// Flattens a JSON error message of any observed shape into one string.
///
/// Strings are taken as-is; arrays are flattened element by element in
/// order; map values are flattened in key order (keys are discarded);
/// other scalars use their JSON representation. Extracted messages are
/// joined with `", "`.
///
/// # Example
///
/// ```rust
/// use parcelbase_api::clients::flatten_message;
/// use serde_json::json;
///
/// assert_eq!(flatten_message(&json!("Bad format")), "Bad format");
/// assert_eq!(
///     flatten_message(&json!(["Bad format", "Bad format 2"])),
///     "Bad format, Bad format 2"
/// );
/// ```
#[must_use]
pub fn flatten_message(value: &Value) -> String {
    let mut parts = Vec::new();
    collect_messages(value, 0, &mut parts);
    parts.join(", ")
}

/// Depth-first collection of leaf messages, capped at [`MAX_FLATTEN_DEPTH`].
fn collect_messages(value: &Value, depth: usize, out: &mut Vec<String>) {
    if depth > MAX_FLATTEN_DEPTH {
        return;
    }
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                collect_messages(item, depth + 1, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_messages(item, depth + 1, out);
            }
        }
        other => out.push(other.to_string()),
    }
}

/// Returns the canonical reason phrase for a status code.
fn status_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(
            || format!("Unexpected HTTP status {status}"),
            ToString::to_string,
        )
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT, or PATCH request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for all HTTP-level operations.
///
/// This enum provides a single error type for client and resource methods,
/// making it easy to handle failures at API boundaries with pattern matching.
///
/// # Example
///
/// ```rust,ignore
/// match client.get("shipments/shp_123", None).await {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Api(e)) => println!("API error {}: {}", e.http_status, e.message),
///     Err(HttpError::Json(e)) => println!("Bad response body: {e}"),
///     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// A classified API error (non-2xx response or transport failure).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body could not be deserialized into the expected type.
    #[error("Failed to deserialize response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Request validation failed before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl HttpError {
    /// Returns the classified error kind, if this is an API error.
    #[must_use]
    pub const fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(e) => Some(e.kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping_covers_documented_codes() {
        assert_eq!(ApiErrorKind::from_status(0), ApiErrorKind::Connection);
        assert_eq!(ApiErrorKind::from_status(100), ApiErrorKind::Retry);
        assert_eq!(ApiErrorKind::from_status(301), ApiErrorKind::Redirect);
        assert_eq!(ApiErrorKind::from_status(400), ApiErrorKind::BadRequest);
        assert_eq!(ApiErrorKind::from_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_status(402), ApiErrorKind::PaymentRequired);
        assert_eq!(ApiErrorKind::from_status(403), ApiErrorKind::Forbidden);
        assert_eq!(ApiErrorKind::from_status(404), ApiErrorKind::NotFound);
        assert_eq!(
            ApiErrorKind::from_status(405),
            ApiErrorKind::MethodNotAllowed
        );
        assert_eq!(
            ApiErrorKind::from_status(407),
            ApiErrorKind::ProxyAuthRequired
        );
        assert_eq!(ApiErrorKind::from_status(408), ApiErrorKind::Timeout);
        assert_eq!(ApiErrorKind::from_status(422), ApiErrorKind::InvalidRequest);
        assert_eq!(ApiErrorKind::from_status(429), ApiErrorKind::RateLimit);
        assert_eq!(ApiErrorKind::from_status(500), ApiErrorKind::InternalServer);
        assert_eq!(ApiErrorKind::from_status(502), ApiErrorKind::GatewayTimeout);
        assert_eq!(
            ApiErrorKind::from_status(503),
            ApiErrorKind::ServiceUnavailable
        );
        assert_eq!(ApiErrorKind::from_status(504), ApiErrorKind::GatewayTimeout);
        assert_eq!(ApiErrorKind::from_status(9999), ApiErrorKind::UnknownHttp);
    }

    #[test]
    fn test_classify_extracts_structured_details() {
        let body = json!({
            "error": {
                "code": "ADDRESS.VERIFY.FAILURE",
                "message": "Unable to verify address.",
                "errors": [
                    {"field": "street1", "message": "cannot be blank"}
                ]
            }
        });

        let error = ApiError::classify(422, body.to_string().as_bytes());

        assert_eq!(error.kind, ApiErrorKind::InvalidRequest);
        assert_eq!(error.http_status, 422);
        assert_eq!(error.code, "ADDRESS.VERIFY.FAILURE");
        assert_eq!(error.message, "Unable to verify address.");
        assert_eq!(error.errors.len(), 1);
        assert_eq!(error.errors[0].field(), Some("street1"));
        assert_eq!(error.errors[0].message(), "cannot be blank");
    }

    #[test]
    fn test_classify_flattens_array_message() {
        let body = json!({
            "error": {
                "code": "SHIPMENT.INVALID",
                "message": ["Bad format", "Bad format 2"],
                "errors": []
            }
        });

        let error = ApiError::classify(400, body.to_string().as_bytes());
        assert_eq!(error.message, "Bad format, Bad format 2");
    }

    #[test]
    fn test_classify_falls_back_on_non_json_body() {
        let error = ApiError::classify(500, b"<html>oops</html>");

        assert_eq!(error.kind, ApiErrorKind::InternalServer);
        assert_eq!(error.code, UNPARSEABLE_CODE);
        assert_eq!(error.message, "Internal Server Error");
        assert!(error.errors.is_empty());
    }

    #[test]
    fn test_classify_falls_back_on_missing_error_object() {
        let error = ApiError::classify(503, br#"{"status": "down"}"#);

        assert_eq!(error.kind, ApiErrorKind::ServiceUnavailable);
        assert_eq!(error.code, UNPARSEABLE_CODE);
        assert_eq!(error.message, "Service Unavailable");
    }

    #[test]
    fn test_classify_preserves_bare_string_sub_errors() {
        // Insurance/claim endpoints mix bare strings with structured pairs
        let body = json!({
            "error": {
                "code": "INSURANCE.PURCHASE.FAILURE",
                "message": "Insurance could not be purchased.",
                "errors": [
                    "carrier rejected the request",
                    {"field": "amount", "message": "must be positive"}
                ]
            }
        });

        let error = ApiError::classify(422, body.to_string().as_bytes());

        assert_eq!(error.errors.len(), 2);
        assert!(matches!(error.errors[0], SubError::Raw(_)));
        assert_eq!(error.errors[0].message(), "carrier rejected the request");
        assert!(matches!(error.errors[1], SubError::Field(_)));
        assert_eq!(error.errors[1].field(), Some("amount"));
    }

    #[test]
    fn test_connection_error_has_status_zero() {
        let error = ApiError::connection("connection refused");

        assert_eq!(error.kind, ApiErrorKind::Connection);
        assert_eq!(error.http_status, 0);
        assert_eq!(error.message, "connection refused");
    }

    #[test]
    fn test_flatten_message_scalar() {
        assert_eq!(flatten_message(&json!("Bad format")), "Bad format");
    }

    #[test]
    fn test_flatten_message_array() {
        assert_eq!(
            flatten_message(&json!(["Bad format", "Bad format 2"])),
            "Bad format, Bad format 2"
        );
    }

    #[test]
    fn test_flatten_message_nested_map_and_array() {
        let value = json!({
            "errors": [
                {"message1": "message1", "errors": ["message2", "message3"]},
                "message5"
            ]
        });

        let flattened = flatten_message(&value);
        assert!(flattened.contains("message1"));
        assert!(flattened.contains("message2"));
        assert!(flattened.contains("message3"));
        assert!(flattened.contains("message5"));

        // Deterministic across repeated calls on the same input
        assert_eq!(flattened, flatten_message(&value));
    }

    #[test]
    fn test_flatten_message_non_string_scalars() {
        assert_eq!(flatten_message(&json!([1, true, "x"])), "1, true, x");
    }

    #[test]
    fn test_flatten_message_depth_cap_terminates() {
        // Build a value nested well past the cap
        let mut value = json!("deepest");
        for _ in 0..200 {
            value = json!([value]);
        }

        // Must terminate without overflowing; content past the cap is dropped
        let flattened = flatten_message(&value);
        assert!(flattened.is_empty());
    }

    #[test]
    fn test_http_error_api_kind_accessor() {
        let error = HttpError::Api(ApiError::classify(404, b"{}"));
        assert_eq!(error.api_kind(), Some(ApiErrorKind::NotFound));

        let error = HttpError::InvalidRequest(InvalidHttpRequestError::EmptyPath);
        assert_eq!(error.api_kind(), None);
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let api_error: &dyn std::error::Error = &ApiError::connection("test");
        let _ = api_error;

        let invalid_error: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
        let _ = invalid_error;

        let http_error: &dyn std::error::Error = &HttpError::Api(ApiError::connection("test"));
        let _ = http_error;
    }
}
