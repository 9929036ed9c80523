//! # Parcelbase API Rust SDK
//!
//! A Rust SDK for the Parcelbase shipping API, providing type-safe
//! configuration, an async HTTP client, shipping resources, and rate
//! selection helpers.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ParcelbaseConfig`] and [`ParcelbaseConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - An async HTTP client with typed error classification
//! - Shipping resources: addresses, parcels, shipments, trackers, webhooks
//! - Lowest-rate selection with carrier/service filters via [`rates`]
//! - Smart-rate selection under a delivery-day ceiling via [`rates`]
//! - Cursor pagination helpers via [`pagination`]
//!
//! ## Quick Start
//!
//! ```rust
//! use parcelbase_api::{ParcelbaseConfig, ApiKey};
//!
//! // Create configuration using the builder pattern
//! let config = ParcelbaseConfig::builder()
//!     .api_key(ApiKey::new("pbk_test_abc123").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Creating and Buying a Shipment
//!
//! ```rust,ignore
//! use parcelbase_api::{ParcelbaseConfig, ApiKey, HttpClient};
//! use parcelbase_api::resources::{Address, ApiResource, Parcel, Shipment, ShipmentCreateParams};
//!
//! let config = ParcelbaseConfig::builder()
//!     .api_key(ApiKey::new("pbk_test_abc123").unwrap())
//!     .build()
//!     .unwrap();
//! let client = HttpClient::new(&config);
//!
//! let params = ShipmentCreateParams {
//!     to_address: Some(Address { id: Some("adr_to".into()), ..Default::default() }),
//!     from_address: Some(Address { id: Some("adr_from".into()), ..Default::default() }),
//!     parcel: Some(Parcel { weight: Some(15.4), ..Default::default() }),
//!     ..Default::default()
//! };
//!
//! let shipment = Shipment::create(&client, &params).await?;
//!
//! // Quoted rates are embedded; pick the cheapest Priority rate
//! let rate = shipment.lowest_rate(&[], &["Priority"])?;
//! let purchased = shipment.buy(&client, rate.id.as_deref().unwrap()).await?;
//! ```
//!
//! ## Smart Rates
//!
//! Smart rates annotate each quote with estimated delivery days at named
//! confidence percentiles, so selection can trade price against the
//! carrier's own probabilistic delivery commitment:
//!
//! ```rust,ignore
//! use parcelbase_api::rates::lowest_smart_rate;
//! use parcelbase_api::resources::Shipment;
//!
//! let smart_rates = Shipment::smart_rates(&client, "shp_123").await?;
//!
//! // Cheapest rate that arrives within 3 days at 85% confidence
//! let rate = lowest_smart_rate(&smart_rates, 3, "percentile_85")?;
//! ```
//!
//! ## Listing with Pagination
//!
//! Every list endpoint returns a page of records plus a `has_more` flag;
//! the last record's ID is the cursor for the next page:
//!
//! ```rust,ignore
//! use parcelbase_api::pagination::EndOfPagination;
//! use parcelbase_api::resources::{ApiResource, ListParams, Shipment};
//!
//! let mut params = ListParams { page_size: Some(50), ..Default::default() };
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
//!
//! ## Error Handling
//!
//! Non-2xx responses are classified by status code into a fixed taxonomy,
//! so callers branch on the error kind instead of matching message strings:
//!
//! ```rust,ignore
//! use parcelbase_api::{ApiErrorKind, HttpError};
//! use parcelbase_api::resources::{ApiResource, Shipment};
//!
//! match Shipment::retrieve(&client, "shp_missing").await {
//!     Ok(shipment) => println!("{shipment:?}"),
//!     Err(HttpError::Api(e)) if e.kind == ApiErrorKind::NotFound => {
//!         println!("no such shipment");
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **Exact prices**: Rate prices compare as decimals, never binary floats

pub mod clients;
pub mod config;
pub mod error;
pub mod pagination;
pub mod rates;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{
    ApiBaseUrl, ApiKey, ParcelbaseConfig, ParcelbaseConfigBuilder, DEFAULT_API_BASE,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ApiErrorKind, FieldError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, InvalidHttpRequestError, SubError,
};

// Re-export rate selection and pagination helpers
pub use pagination::{next_page_params, EndOfPagination, PageParams};
pub use rates::{
    lowest_rate, lowest_smart_rate, DeliveryAccuracy, Rate, RateError, SmartRate, TimeInTransit,
};
