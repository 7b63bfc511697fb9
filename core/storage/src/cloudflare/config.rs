//! Cloudflare Images adapter configuration.

use serde::Deserialize;

use cfimages_common::{ApiKey, Error, Result};

/// Cloudflare REST API base URL.
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Public image delivery base URL.
pub const IMAGE_DELIVERY_BASE: &str = "https://imagedelivery.net";
/// Variant used when none is configured.
pub const DEFAULT_VARIANT: &str = "public";

fn default_variant() -> String {
    DEFAULT_VARIANT.to_string()
}

fn default_api_base() -> String {
    CLOUDFLARE_API_BASE.to_string()
}

fn default_delivery_base() -> String {
    IMAGE_DELIVERY_BASE.to_string()
}

/// Cloudflare Images adapter configuration.
///
/// Built once by the embedding application and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudflareImagesConfig {
    /// API token with Images write permission.
    pub api_key: ApiKey,
    /// Account identifier used in API paths.
    pub account_id: String,
    /// Account hash used in public delivery URLs.
    pub account_hash: String,
    /// Variant embedded in delivery URLs.
    #[serde(default = "default_variant")]
    pub variant: String,
    /// REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Delivery base URL.
    #[serde(default = "default_delivery_base")]
    pub delivery_base: String,
    /// Treat a 404 on delete as an already-deleted asset.
    #[serde(default)]
    pub treat_missing_as_deleted: bool,
}

impl CloudflareImagesConfig {
    /// Create a configuration with default variant and endpoints.
    pub fn new(
        api_key: impl Into<String>,
        account_id: impl Into<String>,
        account_hash: impl Into<String>,
    ) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            account_id: account_id.into(),
            account_hash: account_hash.into(),
            variant: default_variant(),
            api_base: default_api_base(),
            delivery_base: default_delivery_base(),
            treat_missing_as_deleted: false,
        }
    }

    /// Set the delivery variant.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    /// Override the REST API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Override the delivery base URL.
    pub fn with_delivery_base(mut self, delivery_base: impl Into<String>) -> Self {
        self.delivery_base = delivery_base.into();
        self
    }

    /// Enable or disable idempotent delete on 404.
    pub fn with_treat_missing_as_deleted(mut self, enabled: bool) -> Self {
        self.treat_missing_as_deleted = enabled;
        self
    }

    /// Parse a configuration from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::Configuration(format!("Invalid Cloudflare Images config: {}", e)))
    }

    /// Check that every required setting is present.
    ///
    /// # Errors
    /// - Empty api key, account id or account hash
    /// - Empty API or delivery base URL
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.api_key.is_blank() {
            missing.push("api_key");
        }
        if self.account_id.trim().is_empty() {
            missing.push("account_id");
        }
        if self.account_hash.trim().is_empty() {
            missing.push("account_hash");
        }
        if !missing.is_empty() {
            return Err(Error::Configuration(format!(
                "Cloudflare Images adapter requires api_key, account_id, and account_hash \
                 (missing: {})",
                missing.join(", ")
            )));
        }

        if self.api_base.trim().is_empty() || self.delivery_base.trim().is_empty() {
            return Err(Error::Configuration(
                "Cloudflare Images base URLs cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
