//! Shipment resource implementation.
//!
//! A shipment ties together an origin address, a destination address, and
//! a parcel. Creating a shipment quotes rates from every configured
//! carrier; buying one of those rates purchases a postage label.
//!
//! # Example
//!
//! ```rust,ignore
//! use parcelbase_api::resources::{ApiResource, Shipment, ShipmentCreateParams};
//!
//! let shipment = Shipment::create(&client, &params).await?;
//!
//! // Pick the cheapest UPS or USPS rate and buy it
//! let rate = shipment.lowest_rate(&["UPS", "USPS"], &[])?;
//! let rate_id = rate.id.clone().unwrap();
//! let purchased = shipment.buy(&client, &rate_id).await?;
//!
//! println!("Label: {:?}", purchased.postage_label);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpClient, HttpError};
use crate::rates::{self, Rate, RateError, SmartRate};
use crate::resources::{Address, ApiResource, Parcel};

/// A purchased shipping label.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PostageLabel {
    /// The unique identifier of the label (e.g., `pl_123`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// URL of the label image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_url: Option<String>,

    /// File type of the label image (e.g., "image/png").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_file_type: Option<String>,

    /// When the label was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the label was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A shipment from an origin address to a destination address.
///
/// Rates are quoted on creation and embedded on the shipment; they can be
/// narrowed with [`Shipment::lowest_rate`] before buying.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Shipment {
    /// The unique identifier of the shipment (e.g., `shp_123`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the shipment was created in "test" or "production" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// The destination address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<Address>,

    /// The origin address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<Address>,

    /// The package being shipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel: Option<Parcel>,

    /// Rates quoted for this shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<Vec<Rate>>,

    /// The rate that was purchased, once the shipment is bought.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_rate: Option<Rate>,

    /// The purchased label, once the shipment is bought.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postage_label: Option<PostageLabel>,

    /// The tracking code assigned by the carrier after purchase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,

    /// The current status of the shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// An optional caller-supplied reference string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// When the shipment was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the shipment was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for creating a shipment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShipmentCreateParams {
    /// The destination address, by ID or inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<Address>,

    /// The origin address, by ID or inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<Address>,

    /// The package being shipped, by ID or inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel: Option<Parcel>,

    /// An optional caller-supplied reference string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Restrict quoting to these carrier accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_account_ids: Option<Vec<String>>,
}

impl ApiResource for Shipment {
    const NAME: &'static str = "Shipment";
    const PLURAL: &'static str = "shipments";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Shipment {
    /// Selects the cheapest quoted rate, optionally restricted by carrier
    /// and service.
    ///
    /// This is a pure helper over the embedded [`rates`](Self::rates) list;
    /// see [`rates::lowest_rate`] for the selection rules.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::NoMatchingRates`] when no quoted rate passes
    /// the filters with a positive price.
    pub fn lowest_rate(&self, carriers: &[&str], services: &[&str]) -> Result<&Rate, RateError> {
        rates::lowest_rate(self.rates.as_deref().unwrap_or(&[]), carriers, services)
    }

    /// Fetches smart rates (rates with delivery-day estimates) for a shipment.
    ///
    /// Use [`rates::lowest_smart_rate`] to select from the result under a
    /// delivery-day ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for transport or API failures.
    pub async fn smart_rates(client: &HttpClient, id: &str) -> Result<Vec<SmartRate>, HttpError> {
        let response = client
            .get(&format!("shipments/{id}/smart_rates"), None)
            .await?;

        let value = response
            .body
            .get("smart_rates")
            .cloned()
            .unwrap_or_else(|| json!([]));
        Ok(serde_json::from_value(value)?)
    }

    /// Buys a quoted rate, purchasing a postage label for this shipment.
    ///
    /// Returns the updated shipment with `selected_rate`, `postage_label`,
    /// and `tracking_code` populated.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if this shipment has no ID,
    /// and [`HttpError`] for transport or API failures (a
    /// `PaymentRequired` kind indicates an insufficient balance).
    pub async fn buy(&self, client: &HttpClient, rate_id: &str) -> Result<Self, HttpError> {
        let id = self
            .id()
            .ok_or(crate::clients::InvalidHttpRequestError::EmptyPath)?;

        let body = json!({"rate": {"id": rate_id}});
        let response = client.post(&format!("shipments/{id}/buy"), body).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Re-quotes rates for this shipment.
    ///
    /// Returns the updated shipment with a fresh `rates` list.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if this shipment has no ID,
    /// and [`HttpError`] for transport or API failures.
    pub async fn refresh_rates(&self, client: &HttpClient) -> Result<Self, HttpError> {
        let id = self
            .id()
            .ok_or(crate::clients::InvalidHttpRequestError::EmptyPath)?;

        let response = client
            .post(&format!("shipments/{id}/rerate"), json!({}))
            .await?;
        Ok(serde_json::from_value(response.body)?)
    }
}
