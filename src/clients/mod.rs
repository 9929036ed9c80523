//! HTTP client types for Parcelbase API communication.
//!
//! This module provides the foundational HTTP client layer for making
//! authenticated requests to the Parcelbase API. It handles request and
//! response processing and classification of error responses.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ApiError`] / [`ApiErrorKind`]: Typed errors classified from non-2xx responses
//! - [`HttpError`]: Unified error type for client and resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use parcelbase_api::{ParcelbaseConfig, ApiKey};
//! use parcelbase_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = ParcelbaseConfig::builder()
//!     .api_key(ApiKey::new("pbk_test_key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(&config);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "shipments")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Error Classification
//!
//! Non-2xx responses never surface as raw status codes. The client
//! classifies each one into an [`ApiError`] whose [`ApiErrorKind`] is
//! derived from a fixed status-code table, so callers branch on the kind
//! rather than string-matching messages. See [`errors`] for the full
//! taxonomy and the message-flattening rules.

pub mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    flatten_message, ApiError, ApiErrorKind, FieldError, HttpError, InvalidHttpRequestError,
    SubError, UNPARSEABLE_CODE,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
