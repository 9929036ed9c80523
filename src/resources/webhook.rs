//! Webhook resource implementation.
//!
//! Webhooks deliver event notifications (tracker updates, purchased
//! labels) to a caller-owned URL. Signature verification of delivered
//! payloads is out of scope for this SDK.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpClient, HttpError, InvalidHttpRequestError};
use crate::resources::ApiResource;

/// A webhook endpoint registered with the API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Webhook {
    /// The unique identifier of the webhook (e.g., `hook_123`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the webhook was created in "test" or "production" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// The URL events are delivered to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// When the webhook was disabled after repeated delivery failures.
    /// `None` while the webhook is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_at: Option<DateTime<Utc>>,

    /// When the webhook was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the webhook was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for registering a webhook.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WebhookCreateParams {
    /// The URL to deliver events to.
    pub url: String,
}

impl ApiResource for Webhook {
    const NAME: &'static str = "Webhook";
    const PLURAL: &'static str = "webhooks";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Webhook {
    /// Re-enables this webhook after it was disabled for delivery failures.
    ///
    /// Returns the updated webhook with `disabled_at` cleared.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if this webhook has no ID,
    /// and [`HttpError`] for transport or API failures.
    pub async fn enable(&self, client: &HttpClient) -> Result<Self, HttpError> {
        let id = self.id().ok_or(InvalidHttpRequestError::EmptyPath)?;

        let response = client
            .put(&format!("webhooks/{id}"), json!({"webhook": {}}))
            .await?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// Deletes this webhook, stopping all event delivery to its URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if this webhook has no ID,
    /// and [`HttpError`] for transport or API failures.
    pub async fn delete(&self, client: &HttpClient) -> Result<(), HttpError> {
        let id = self.id().ok_or(InvalidHttpRequestError::EmptyPath)?;

        client.delete(&format!("webhooks/{id}")).await?;
        Ok(())
    }
}
