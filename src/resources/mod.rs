//! REST resource infrastructure for the Parcelbase API.
//!
//! This module provides the foundational infrastructure for API resources:
//!
//! - **[`ApiResource`] trait**: A standardized interface for create,
//!   retrieve, and list operations
//! - **[`Page<T>`]**: A page of list results carrying the `has_more` flag
//!   and the cursor computation for the next page
//! - **[`ListParams`]**: Common listing parameters shared by every list
//!   endpoint
//!
//! Individual resources (Shipment, Address, etc.) are implemented in the
//! submodules.
//!
//! # Example: Listing with Pagination
//!
//! ```rust,ignore
//! use parcelbase_api::pagination::EndOfPagination;
//! use parcelbase_api::resources::{ApiResource, ListParams, Shipment};
//!
//! let mut params = ListParams {
//!     page_size: Some(50),
//!     ..Default::default()
//! };
//!
//! loop {
//!     let page = Shipment::all(&client, Some(params.clone())).await?;
//!     for shipment in &page.objects {
//!         println!("{:?}", shipment.id());
//!     }
//!     match page.next_page_params(params.page_size) {
//!         Ok(cursor) => params = params.with_cursor(cursor),
//!         Err(EndOfPagination) => break,
//!     }
//! }
//! ```

mod address;
mod parcel;
mod shipment;
mod tracker;
mod webhook;

pub use address::Address;
pub use parcel::Parcel;
pub use shipment::{PostageLabel, Shipment, ShipmentCreateParams};
pub use tracker::{Tracker, TrackerCreateParams, TrackingDetail, TrackingLocation};
pub use webhook::{Webhook, WebhookCreateParams};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpResponse};
use crate::pagination::{self, EndOfPagination, PageParams};

/// An API resource that can be created, retrieved, and listed.
///
/// This trait provides a standardized interface for the operations shared
/// by every Parcelbase resource. Implementors define the resource's name
/// and plural form and get default implementations for the common methods.
///
/// Create bodies are wrapped under the lowercase resource key
/// (`{"shipment": {...}}`); single resources come back unwrapped; list
/// responses use `{"<plural>": [...], "has_more": bool}`.
#[allow(async_fn_in_trait)]
pub trait ApiResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The singular name of the resource (e.g., "Shipment").
    ///
    /// Lowercased, this is the wrapping key for create request bodies.
    const NAME: &'static str;

    /// The plural name used in URL paths and list response keys
    /// (e.g., "shipments").
    const PLURAL: &'static str;

    /// Returns the resource's server-assigned ID, if it has one.
    fn id(&self) -> Option<&str>;

    /// Returns the lowercase key used to wrap create request bodies.
    #[must_use]
    fn resource_key() -> String {
        Self::NAME.to_lowercase()
    }

    /// Creates a new resource.
    ///
    /// The params are wrapped under the resource key, so
    /// `Shipment::create` sends `{"shipment": {...}}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for serialization, transport, or API failures.
    async fn create<P: Serialize + Sync>(
        client: &HttpClient,
        params: &P,
    ) -> Result<Self, HttpError> {
        let mut body = serde_json::Map::new();
        body.insert(Self::resource_key(), serde_json::to_value(params)?);

        let response = client.post(Self::PLURAL, Value::Object(body)).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Retrieves a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Api`] with a `NotFound` kind when the resource
    /// does not exist.
    async fn retrieve(client: &HttpClient, id: &str) -> Result<Self, HttpError> {
        let response = client.get(&format!("{}/{id}", Self::PLURAL), None).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Lists resources matching the given parameters.
    ///
    /// Returns a [`Page`]; use [`Page::next_page_params`] to advance
    /// through subsequent pages.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport or API failures.
    async fn all(client: &HttpClient, params: Option<ListParams>) -> Result<Page<Self>, HttpError> {
        let query = params
            .map(ListParams::into_query)
            .filter(|q| !q.is_empty());

        let response = client.get(Self::PLURAL, query).await?;
        Page::from_http_response(&response, Self::PLURAL)
    }
}

/// Common parameters accepted by every list endpoint.
///
/// The cursor fields (`after_id`, `page_size`) can be filled from a
/// [`PageParams`] via [`ListParams::with_cursor`], keeping any other
/// active filters intact.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Maximum number of records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Return records created after the record with this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_id: Option<String>,

    /// Return records created before the record with this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_id: Option<String>,

    /// Only return records created at or after this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<DateTime<Utc>>,

    /// Only return records created before this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
}

impl ListParams {
    /// Merges a pagination cursor into these parameters.
    ///
    /// Only the cursor fields are touched; filters such as date ranges
    /// carry over to the next page unchanged.
    #[must_use]
    pub fn with_cursor(mut self, cursor: PageParams) -> Self {
        self.after_id = Some(cursor.after_id);
        if cursor.page_size.is_some() {
            self.page_size = cursor.page_size;
        }
        self
    }

    /// Converts the parameters into a query map.
    #[must_use]
    pub fn into_query(self) -> HashMap<String, String> {
        let mut query = HashMap::new();
        if let Some(page_size) = self.page_size {
            query.insert("page_size".to_string(), page_size.to_string());
        }
        if let Some(after_id) = self.after_id {
            query.insert("after_id".to_string(), after_id);
        }
        if let Some(before_id) = self.before_id {
            query.insert("before_id".to_string(), before_id);
        }
        if let Some(start) = self.start_datetime {
            query.insert("start_datetime".to_string(), start.to_rfc3339());
        }
        if let Some(end) = self.end_datetime {
            query.insert("end_datetime".to_string(), end.to_rfc3339());
        }
        query
    }
}

/// One page of a list response.
///
/// Combines the records with the `has_more` flag and the request ID from
/// the response headers.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The records on this page, in server order.
    pub objects: Vec<T>,
    /// Whether more records exist beyond this page.
    pub has_more: bool,
    /// Request ID from the X-Request-Id header, for debugging.
    request_id: Option<String>,
}

impl<T: ApiResource> Page<T> {
    /// Builds a page from a list response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Json`] when the body is missing the list key
    /// or the records cannot be deserialized.
    pub fn from_http_response(response: &HttpResponse, key: &str) -> Result<Self, HttpError> {
        let objects_value = response.body.get(key).ok_or_else(|| {
            HttpError::Json(serde::de::Error::custom(format!(
                "missing key '{key}' in list response"
            )))
        })?;

        let objects: Vec<T> = serde_json::from_value(objects_value.clone())?;
        let has_more = response
            .body
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            objects,
            has_more,
            request_id: response.request_id().map(ToString::to_string),
        })
    }

    /// Computes the cursor parameters for fetching the next page.
    ///
    /// An empty page always terminates pagination, regardless of what the
    /// server put in `has_more`.
    ///
    /// # Errors
    ///
    /// Returns [`EndOfPagination`] when there is no further page.
    pub fn next_page_params(&self, page_size: Option<u32>) -> Result<PageParams, EndOfPagination> {
        let last_id = self
            .objects
            .last()
            .and_then(|last| last.id())
            .ok_or(EndOfPagination)?;

        pagination::next_page_params(self.has_more, last_id, page_size)
    }

    /// Returns the request ID from the response headers, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}
