//! Rate types and lowest-rate selection.
//!
//! Carriers return rates in arbitrary order and with inconsistent precision,
//! so prices travel as decimal strings and comparisons go through
//! [`rust_decimal::Decimal`] rather than binary floats.
//!
//! This module provides:
//!
//! - [`Rate`]: a priced shipping option (carrier + service + price)
//! - [`SmartRate`]: a rate annotated with probabilistic delivery-day
//!   estimates at named confidence percentiles
//! - [`lowest_rate`]: cheapest-rate selection with optional carrier and
//!   service allow-lists
//! - [`lowest_smart_rate`]: cheapest-rate selection under a delivery-day
//!   ceiling at a requested confidence percentile
//!
//! # Example
//!
//! ```rust
//! use parcelbase_api::rates::{lowest_rate, Rate};
//!
//! let rates = vec![
//!     Rate { carrier: "USPS".into(), service: "Priority".into(), rate: "7.58".into(), ..Default::default() },
//!     Rate { carrier: "UPS".into(), service: "Ground".into(), rate: "11.40".into(), ..Default::default() },
//! ];
//!
//! let cheapest = lowest_rate(&rates, &[], &[]).unwrap();
//! assert_eq!(cheapest.carrier, "USPS");
//!
//! // Restrict to UPS only
//! let cheapest_ups = lowest_rate(&rates, &["ups"], &[]).unwrap();
//! assert_eq!(cheapest_ups.carrier, "UPS");
//! ```

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during rate selection.
///
/// These are caller-input errors: retrying with identical input would
/// reproduce the identical result, so they are reported, never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    /// No rate passed the filters with a positive price.
    #[error("No rates found.")]
    NoMatchingRates,

    /// The requested delivery accuracy is not a supported percentile label.
    #[error("Invalid delivery accuracy '{value}'. Must be one of: percentile_50, percentile_75, percentile_85, percentile_90, percentile_95, percentile_97, percentile_99.")]
    InvalidDeliveryAccuracy {
        /// The unrecognized label that was provided.
        value: String,
    },
}

/// A confidence percentile for delivery-day estimates.
///
/// Parcelbase reports estimated delivery days at these seven percentiles.
/// The string form matches the wire format (e.g., `percentile_85`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryAccuracy {
    /// 50th percentile (median) delivery estimate.
    Percentile50,
    /// 75th percentile delivery estimate.
    Percentile75,
    /// 85th percentile delivery estimate.
    Percentile85,
    /// 90th percentile delivery estimate.
    Percentile90,
    /// 95th percentile delivery estimate.
    Percentile95,
    /// 97th percentile delivery estimate.
    Percentile97,
    /// 99th percentile delivery estimate.
    Percentile99,
}

impl DeliveryAccuracy {
    /// Returns the wire-format label for this percentile.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentile50 => "percentile_50",
            Self::Percentile75 => "percentile_75",
            Self::Percentile85 => "percentile_85",
            Self::Percentile90 => "percentile_90",
            Self::Percentile95 => "percentile_95",
            Self::Percentile97 => "percentile_97",
            Self::Percentile99 => "percentile_99",
        }
    }
}

impl FromStr for DeliveryAccuracy {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentile_50" => Ok(Self::Percentile50),
            "percentile_75" => Ok(Self::Percentile75),
            "percentile_85" => Ok(Self::Percentile85),
            "percentile_90" => Ok(Self::Percentile90),
            "percentile_95" => Ok(Self::Percentile95),
            "percentile_97" => Ok(Self::Percentile97),
            "percentile_99" => Ok(Self::Percentile99),
            _ => Err(RateError::InvalidDeliveryAccuracy {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for DeliveryAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated delivery-day counts keyed by confidence percentile.
///
/// A missing percentile means the carrier did not report an estimate at
/// that confidence level.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TimeInTransit {
    /// Estimated days at the 50th percentile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_50: Option<u32>,
    /// Estimated days at the 75th percentile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_75: Option<u32>,
    /// Estimated days at the 85th percentile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_85: Option<u32>,
    /// Estimated days at the 90th percentile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_90: Option<u32>,
    /// Estimated days at the 95th percentile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_95: Option<u32>,
    /// Estimated days at the 97th percentile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_97: Option<u32>,
    /// Estimated days at the 99th percentile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile_99: Option<u32>,
}

impl TimeInTransit {
    /// Returns the estimated delivery days at the given percentile, if reported.
    #[must_use]
    pub const fn by_accuracy(&self, accuracy: DeliveryAccuracy) -> Option<u32> {
        match accuracy {
            DeliveryAccuracy::Percentile50 => self.percentile_50,
            DeliveryAccuracy::Percentile75 => self.percentile_75,
            DeliveryAccuracy::Percentile85 => self.percentile_85,
            DeliveryAccuracy::Percentile90 => self.percentile_90,
            DeliveryAccuracy::Percentile95 => self.percentile_95,
            DeliveryAccuracy::Percentile97 => self.percentile_97,
            DeliveryAccuracy::Percentile99 => self.percentile_99,
        }
    }
}

/// A priced shipping option returned by a carrier for a shipment.
///
/// Rates quoted without a shipment ("stateless" rates) carry no
/// server-assigned `id`; they are identified by their
/// `(carrier, service)` pair instead.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Rate {
    /// The unique identifier of the rate (e.g., `rate_123`).
    /// Absent for stateless rates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the rate was quoted in "test" or "production" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// The carrier offering this rate (e.g., "USPS").
    pub carrier: String,

    /// The service level (e.g., "Priority").
    pub service: String,

    /// The price as a decimal string (e.g., "7.58").
    pub rate: String,

    /// The ISO currency code of the price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// The retail (walk-in) price for comparison, as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_rate: Option<String>,

    /// Estimated delivery days for this service, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_days: Option<u32>,

    /// Whether the carrier guarantees the delivery date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date_guaranteed: Option<bool>,

    /// The carrier account this rate was quoted through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_account_id: Option<String>,

    /// The shipment this rate belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<String>,

    /// When the rate was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the rate was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Rate {
    /// Parses the price string into an exact decimal.
    ///
    /// Returns `None` when the price is empty or not a valid decimal.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        Decimal::from_str(self.rate.trim()).ok()
    }
}

/// A rate annotated with probabilistic delivery-day estimates.
///
/// Smart rates are fetched separately from plain rates and carry a
/// [`TimeInTransit`] breakdown used by [`lowest_smart_rate`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SmartRate {
    /// The underlying rate fields.
    #[serde(flatten)]
    pub rate: Rate,

    /// Estimated delivery days by confidence percentile.
    #[serde(default)]
    pub time_in_transit: TimeInTransit,
}

/// Selects the cheapest rate, optionally restricted by carrier and service.
///
/// Allow-list entries are compared case-insensitively; an empty list means
/// no restriction on that axis. Rates with a missing, zero, or negative
/// price are never selected (these are malformed or placeholder quotes).
/// When several eligible rates share the minimal price, the one appearing
/// earliest in `rates` wins.
///
/// The returned reference points into `rates`; no rate is ever synthesized.
///
/// # Errors
///
/// Returns [`RateError::NoMatchingRates`] when no rate passes both filters
/// with a positive price.
pub fn lowest_rate<'a>(
    rates: &'a [Rate],
    carriers: &[&str],
    services: &[&str],
) -> Result<&'a Rate, RateError> {
    let mut lowest: Option<(&Rate, Decimal)> = None;

    for rate in rates {
        if !matches_filter(&rate.carrier, carriers) || !matches_filter(&rate.service, services) {
            continue;
        }
        let Some(price) = rate.price() else {
            continue;
        };
        if price <= Decimal::ZERO {
            continue;
        }
        // Strict comparison keeps the first-seen rate on price ties
        match lowest {
            Some((_, best)) if price >= best => {}
            _ => lowest = Some((rate, price)),
        }
    }

    lowest.map(|(rate, _)| rate).ok_or(RateError::NoMatchingRates)
}

/// Selects the cheapest smart rate that meets a delivery-day ceiling.
///
/// `accuracy` is a wire-format percentile label (e.g., `"percentile_85"`).
/// A candidate is excluded when its delivery-day estimate at that
/// percentile is absent or exceeds `max_delivery_days` — it would arrive
/// too late under the requested confidence level. Among the remaining
/// candidates, price selection follows the same rules as [`lowest_rate`].
///
/// # Errors
///
/// Returns [`RateError::InvalidDeliveryAccuracy`] when `accuracy` is not
/// one of the seven supported percentile labels, and
/// [`RateError::NoMatchingRates`] when no candidate satisfies both the
/// ceiling and the positive-price requirement.
pub fn lowest_smart_rate<'a>(
    smart_rates: &'a [SmartRate],
    max_delivery_days: u32,
    accuracy: &str,
) -> Result<&'a SmartRate, RateError> {
    let accuracy = DeliveryAccuracy::from_str(accuracy)?;
    let mut lowest: Option<(&SmartRate, Decimal)> = None;

    for candidate in smart_rates {
        let Some(days) = candidate.time_in_transit.by_accuracy(accuracy) else {
            continue;
        };
        if days > max_delivery_days {
            continue;
        }
        let Some(price) = candidate.rate.price() else {
            continue;
        };
        if price <= Decimal::ZERO {
            continue;
        }
        match lowest {
            Some((_, best)) if price >= best => {}
            _ => lowest = Some((candidate, price)),
        }
    }

    lowest
        .map(|(candidate, _)| candidate)
        .ok_or(RateError::NoMatchingRates)
}

/// Returns `true` when the allow-list is empty or contains `value`
/// (case-insensitively).
fn matches_filter(value: &str, allowlist: &[&str]) -> bool {
    allowlist.is_empty() || allowlist.iter().any(|entry| entry.eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(carrier: &str, service: &str, price: &str) -> Rate {
        Rate {
            carrier: carrier.to_string(),
            service: service.to_string(),
            rate: price.to_string(),
            ..Default::default()
        }
    }

    fn smart_rate(carrier: &str, price: &str, percentile_85: Option<u32>) -> SmartRate {
        SmartRate {
            rate: rate(carrier, "Ground", price),
            time_in_transit: TimeInTransit {
                percentile_85,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_lowest_rate_picks_minimum_price() {
        let rates = vec![
            rate("UPS", "Ground", "11.40"),
            rate("USPS", "Priority", "7.58"),
            rate("FedEx", "2Day", "25.00"),
        ];

        let cheapest = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(cheapest.carrier, "USPS");
        assert_eq!(cheapest.rate, "7.58");
    }

    #[test]
    fn test_lowest_rate_returns_input_element() {
        let rates = vec![rate("USPS", "Priority", "7.58")];

        let cheapest = lowest_rate(&rates, &[], &[]).unwrap();
        assert!(std::ptr::eq(cheapest, &rates[0]));
    }

    #[test]
    fn test_lowest_rate_first_wins_on_tie() {
        let rates = vec![
            rate("USPS", "Priority", "7.58"),
            rate("UPS", "Ground", "7.58"),
        ];

        let cheapest = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(cheapest.carrier, "USPS");
    }

    #[test]
    fn test_lowest_rate_carrier_filter_is_case_insensitive() {
        let rates = vec![
            rate("USPS", "Priority", "7.58"),
            rate("UPS", "Ground", "11.40"),
        ];

        let cheapest = lowest_rate(&rates, &["ups"], &[]).unwrap();
        assert_eq!(cheapest.carrier, "UPS");
    }

    #[test]
    fn test_lowest_rate_service_filter() {
        let rates = vec![
            rate("USPS", "Priority", "7.58"),
            rate("USPS", "Express", "23.75"),
        ];

        let cheapest = lowest_rate(&rates, &[], &["Express"]).unwrap();
        assert_eq!(cheapest.service, "Express");
    }

    #[test]
    fn test_lowest_rate_no_match_fails() {
        let rates = vec![rate("USPS", "Priority", "7.58")];

        let result = lowest_rate(&rates, &["UPS"], &[]);
        assert_eq!(result.unwrap_err(), RateError::NoMatchingRates);
    }

    #[test]
    fn test_lowest_rate_skips_non_positive_prices() {
        let rates = vec![
            rate("USPS", "Priority", "0"),
            rate("USPS", "Priority", "0.00"),
            rate("USPS", "Priority", "-1.50"),
            rate("UPS", "Ground", "11.40"),
        ];

        let cheapest = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(cheapest.carrier, "UPS");
    }

    #[test]
    fn test_lowest_rate_skips_unparseable_prices() {
        let rates = vec![
            rate("USPS", "Priority", ""),
            rate("USPS", "Priority", "not-a-price"),
            rate("UPS", "Ground", "11.40"),
        ];

        let cheapest = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(cheapest.carrier, "UPS");
    }

    #[test]
    fn test_lowest_rate_all_disqualified_fails() {
        let rates = vec![rate("USPS", "Priority", "0.00")];

        assert_eq!(
            lowest_rate(&rates, &[], &[]).unwrap_err(),
            RateError::NoMatchingRates
        );
    }

    #[test]
    fn test_lowest_rate_empty_input_fails() {
        assert_eq!(
            lowest_rate(&[], &[], &[]).unwrap_err(),
            RateError::NoMatchingRates
        );
    }

    #[test]
    fn test_lowest_rate_decimal_comparison_is_exact() {
        // Values chosen to expose binary-float rounding if it were used
        let rates = vec![
            rate("UPS", "Ground", "10.10"),
            rate("USPS", "Priority", "10.09999999999999999"),
        ];

        let cheapest = lowest_rate(&rates, &[], &[]).unwrap();
        assert_eq!(cheapest.carrier, "USPS");
    }

    #[test]
    fn test_lowest_smart_rate_applies_delivery_ceiling() {
        let smart_rates = vec![
            smart_rate("USPS", "7.58", Some(5)),
            smart_rate("UPS", "11.40", Some(2)),
        ];

        // The cheaper USPS rate arrives too late at the 85th percentile
        let selected = lowest_smart_rate(&smart_rates, 3, "percentile_85").unwrap();
        assert_eq!(selected.rate.carrier, "UPS");
    }

    #[test]
    fn test_lowest_smart_rate_excludes_missing_percentile() {
        let smart_rates = vec![
            smart_rate("USPS", "7.58", None),
            smart_rate("UPS", "11.40", Some(2)),
        ];

        let selected = lowest_smart_rate(&smart_rates, 3, "percentile_85").unwrap();
        assert_eq!(selected.rate.carrier, "UPS");
    }

    #[test]
    fn test_lowest_smart_rate_rejects_unknown_accuracy() {
        let smart_rates = vec![smart_rate("USPS", "7.58", Some(2))];

        let result = lowest_smart_rate(&smart_rates, 3, "percentile_60");
        assert!(matches!(
            result,
            Err(RateError::InvalidDeliveryAccuracy { value }) if value == "percentile_60"
        ));
    }

    #[test]
    fn test_lowest_smart_rate_no_candidate_fails() {
        let smart_rates = vec![smart_rate("USPS", "7.58", Some(9))];

        assert_eq!(
            lowest_smart_rate(&smart_rates, 3, "percentile_85").unwrap_err(),
            RateError::NoMatchingRates
        );
    }

    #[test]
    fn test_delivery_accuracy_round_trips_through_str() {
        for label in [
            "percentile_50",
            "percentile_75",
            "percentile_85",
            "percentile_90",
            "percentile_95",
            "percentile_97",
            "percentile_99",
        ] {
            let accuracy: DeliveryAccuracy = label.parse().unwrap();
            assert_eq!(accuracy.as_str(), label);
        }
    }

    #[test]
    fn test_time_in_transit_by_accuracy() {
        let tit = TimeInTransit {
            percentile_50: Some(1),
            percentile_99: Some(7),
            ..Default::default()
        };

        assert_eq!(tit.by_accuracy(DeliveryAccuracy::Percentile50), Some(1));
        assert_eq!(tit.by_accuracy(DeliveryAccuracy::Percentile99), Some(7));
        assert_eq!(tit.by_accuracy(DeliveryAccuracy::Percentile85), None);
    }

    #[test]
    fn test_smart_rate_deserializes_flattened_fields() {
        let json = serde_json::json!({
            "id": "rate_1",
            "carrier": "USPS",
            "service": "Priority",
            "rate": "7.58",
            "time_in_transit": {"percentile_85": 3}
        });

        let smart: SmartRate = serde_json::from_value(json).unwrap();
        assert_eq!(smart.rate.id.as_deref(), Some("rate_1"));
        assert_eq!(smart.rate.carrier, "USPS");
        assert_eq!(smart.time_in_transit.percentile_85, Some(3));
    }
}
