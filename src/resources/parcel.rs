//! Parcel resource implementation.
//!
//! Parcels describe the physical package being shipped: dimensions in
//! inches and weight in ounces, or a carrier-specific predefined package.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resources::ApiResource;

/// The physical package for a shipment.
///
/// Either the dimensions (`length`/`width`/`height`) or a
/// `predefined_package` should be set, together with the weight.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Parcel {
    /// The unique identifier of the parcel (e.g., `prcl_123`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the parcel was created in "test" or "production" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// The length of the package in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    /// The width of the package in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// The height of the package in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// The weight of the package in ounces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// A carrier-specific predefined package name (e.g., "FlatRateEnvelope").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_package: Option<String>,

    /// When the parcel was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the parcel was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiResource for Parcel {
    const NAME: &'static str = "Parcel";
    const PLURAL: &'static str = "parcels";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_deserializes_from_api_shape() {
        let json = serde_json::json!({
            "id": "prcl_123",
            "length": 20.2,
            "width": 10.9,
            "height": 5.0,
            "weight": 65.9
        });

        let parcel: Parcel = serde_json::from_value(json).unwrap();
        assert_eq!(parcel.id(), Some("prcl_123"));
        assert_eq!(parcel.weight, Some(65.9));
    }

    #[test]
    fn test_parcel_with_predefined_package() {
        let parcel = Parcel {
            predefined_package: Some("FlatRateEnvelope".to_string()),
            weight: Some(10.0),
            ..Default::default()
        };

        let json = serde_json::to_value(&parcel).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(
            object.get("predefined_package").and_then(|v| v.as_str()),
            Some("FlatRateEnvelope")
        );
        assert!(!object.contains_key("length"));
    }
}
