//! Tracker resource implementation.
//!
//! Trackers follow a package through the carrier's network. They are
//! created automatically when a shipment is bought, or manually from a
//! tracking code and carrier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::ApiResource;

/// A location reported in a tracking scan event.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrackingLocation {
    /// The city of the scan event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// The state or province of the scan event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// The country of the scan event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// The postal code of the scan event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// One scan event in a tracker's history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrackingDetail {
    /// The carrier's description of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The tracker status after this event (e.g., "in_transit").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// When the event occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,

    /// Where the event occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_location: Option<TrackingLocation>,
}

/// A package tracker.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Tracker {
    /// The unique identifier of the tracker (e.g., `trk_123`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the tracker was created in "test" or "production" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// The carrier's tracking code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,

    /// The carrier handling the package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// The current status (e.g., "pre_transit", "in_transit", "delivered").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The carrier's current delivery estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_delivery_date: Option<DateTime<Utc>>,

    /// The shipment this tracker belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<String>,

    /// A publicly shareable tracking page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,

    /// The scan-event history, newest last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_details: Option<Vec<TrackingDetail>>,

    /// When the tracker was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the tracker was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for creating a tracker from an existing tracking code.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrackerCreateParams {
    /// The carrier's tracking code.
    pub tracking_code: String,

    /// The carrier handling the package, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
}

impl ApiResource for Tracker {
    const NAME: &'static str = "Tracker";
    const PLURAL: &'static str = "trackers";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
