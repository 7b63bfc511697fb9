//! Cloudflare Images API client.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::debug;

use cfimages_common::{ApiKey, Error, Result};

use super::config::CloudflareImagesConfig;

/// Join the `errors` entries of a Cloudflare v4 envelope for diagnostics.
///
/// Entries are read loosely: a missing or oddly typed `code` or `message`
/// is printed as-is rather than rejected.
pub fn error_summary(body: &Value) -> String {
    let Some(errors) = body.get("errors").and_then(Value::as_array) else {
        return "no error details".to_string();
    };
    if errors.is_empty() {
        return "no error details".to_string();
    }

    errors
        .iter()
        .map(|entry| {
            let code = entry.get("code").map(plain).unwrap_or_default();
            let message = entry.get("message").map(plain).unwrap_or_default();
            format!("[{}] {}", code, message)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Authenticated caller for the Cloudflare REST API.
pub struct ImagesClient {
    http: Client,
    api_base: String,
    account_id: String,
    api_key: ApiKey,
}

impl ImagesClient {
    /// Create a new client from adapter configuration.
    pub fn new(config: &CloudflareImagesConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("cfimages/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Get authorization header.
    fn auth_header(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret()))
            .map_err(|_| {
                Error::Configuration(
                    "API key contains characters not valid in a header".to_string(),
                )
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Full URL for an endpoint path.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base, endpoint)
    }

    /// Issue an authenticated request.
    ///
    /// Caller headers are sent as given, except `Authorization`, which is
    /// always the configured bearer token.
    ///
    /// # Returns
    /// Parsed JSON for JSON responses, `None` for any other success body.
    ///
    /// # Errors
    /// - `UpstreamApi` for non-success statuses, carrying the raw body
    /// - `Network` for transport failures and unparseable JSON
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        form: Option<Form>,
        headers: Option<HeaderMap>,
    ) -> Result<Option<Value>> {
        let mut merged = headers.unwrap_or_default();
        merged.insert(header::AUTHORIZATION, self.auth_header()?);

        debug!(%method, endpoint, "Calling Cloudflare API");

        let mut request = self
            .http
            .request(method, self.endpoint_url(endpoint))
            .headers(merged);
        if let Some(form) = form {
            request = request.multipart(form);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", endpoint, e)))?;

        Self::handle_response(response).await
    }

    /// Handle API response with error checking.
    async fn handle_response(response: Response) -> Result<Option<Value>> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamApi {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            return Ok(None);
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| Error::Network(format!("Failed to parse response: {}", e)))
    }

    /// Upload an image (multipart form with a `file` part).
    pub async fn upload_image(&self, form: Form) -> Result<Option<Value>> {
        let endpoint = format!("/accounts/{}/images/v1", self.account_id);
        self.call(Method::POST, &endpoint, Some(form), None).await
    }

    /// Delete an image by ID.
    pub async fn delete_image(&self, image_id: &str) -> Result<Option<Value>> {
        let endpoint = format!("/accounts/{}/images/v1/{}", self.account_id, image_id);
        self.call(Method::DELETE, &endpoint, None, None).await
    }
}
