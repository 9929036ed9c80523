//! Configuration types for the Parcelbase API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Parcelbase.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ParcelbaseConfig`]: The main configuration struct holding all SDK settings
//! - [`ParcelbaseConfigBuilder`]: A builder for constructing [`ParcelbaseConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`ApiBaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use parcelbase_api::{ParcelbaseConfig, ApiKey};
//!
//! let config = ParcelbaseConfig::builder()
//!     .api_key(ApiKey::new("pbk_test_abc123").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiBaseUrl, ApiKey};

use crate::error::ConfigError;

/// The default Parcelbase API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.parcelbase.com/v2";

/// Configuration for the Parcelbase API SDK.
///
/// This struct holds all configuration needed for SDK operations, including
/// the API key, API base URL, and User-Agent settings.
///
/// # Thread Safety
///
/// `ParcelbaseConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use parcelbase_api::{ParcelbaseConfig, ApiKey};
///
/// let config = ParcelbaseConfig::builder()
///     .api_key(ApiKey::new("pbk_test_abc123").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert!(config.api_key().is_test_key());
/// ```
#[derive(Clone, Debug)]
pub struct ParcelbaseConfig {
    api_key: ApiKey,
    api_base: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ParcelbaseConfig {
    /// Creates a new builder for constructing a `ParcelbaseConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use parcelbase_api::{ParcelbaseConfig, ApiKey};
    ///
    /// let config = ParcelbaseConfig::builder()
    ///     .api_key(ApiKey::new("pbk_test_key").unwrap())
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> ParcelbaseConfigBuilder {
        ParcelbaseConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL override, if configured.
    #[must_use]
    pub const fn api_base(&self) -> Option<&ApiBaseUrl> {
        self.api_base.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ParcelbaseConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParcelbaseConfig>();
};

/// Builder for constructing [`ParcelbaseConfig`] instances.
///
/// This builder provides a fluent API for configuring the SDK. The only
/// required field is `api_key`; all other fields have sensible defaults.
///
/// # Defaults
///
/// - `api_base`: `None` (requests go to [`DEFAULT_API_BASE`])
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use parcelbase_api::{ParcelbaseConfig, ApiKey, ApiBaseUrl};
///
/// let config = ParcelbaseConfig::builder()
///     .api_key(ApiKey::new("pbk_test_key").unwrap())
///     .api_base(ApiBaseUrl::new("http://localhost:3000").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ParcelbaseConfigBuilder {
    api_key: Option<ApiKey>,
    api_base: Option<ApiBaseUrl>,
    user_agent_prefix: Option<String>,
}

impl ParcelbaseConfigBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the API base URL override.
    ///
    /// Use this to point the SDK at a mock server in tests or a
    /// regional endpoint.
    #[must_use]
    pub fn api_base(mut self, api_base: ApiBaseUrl) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Sets the user agent prefix prepended to the SDK User-Agent header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ParcelbaseConfig`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` was not set.
    pub fn build(self) -> Result<ParcelbaseConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(ParcelbaseConfig {
            api_key,
            api_base: self.api_base,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
