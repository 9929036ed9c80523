//! Address resource implementation.
//!
//! Addresses represent the origin or destination of a shipment. They can
//! be created standalone and referenced by ID, or embedded directly in
//! shipment create requests.
//!
//! # Example
//!
//! ```rust,ignore
//! use parcelbase_api::resources::{Address, ApiResource};
//!
//! let params = Address {
//!     street1: Some("417 Montgomery St".to_string()),
//!     city: Some("San Francisco".to_string()),
//!     state: Some("CA".to_string()),
//!     zip: Some("94104".to_string()),
//!     country: Some("US".to_string()),
//!     ..Default::default()
//! };
//!
//! let address = Address::create(&client, &params).await?;
//! println!("Created {}", address.id().unwrap());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::ApiResource;

/// A mailing address used as a shipment origin or destination.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Address {
    /// The unique identifier of the address (e.g., `adr_123`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the address was created in "test" or "production" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// The first line of the street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,

    /// The second line of the street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    /// The city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// The state or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// The postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    /// The ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// The name of the person at this address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The company at this address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// A contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// A contact email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Whether this is a residential address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residential: Option<bool>,

    /// When the address was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the address was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiResource for Address {
    const NAME: &'static str = "Address";
    const PLURAL: &'static str = "addresses";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
