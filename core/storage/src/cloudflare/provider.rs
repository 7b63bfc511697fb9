//! Cloudflare Images storage adapter implementation.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{error, info, warn};

use cfimages_common::{Error, Result};

use crate::document::{Document, UploadedFile};
use crate::field::{is_truthy, DisplayCondition, FieldDescriptor};
use crate::provider::{Next, StaticRequest, StaticResponse, StorageAdapter};

use super::client::{error_summary, ImagesClient};
use super::config::CloudflareImagesConfig;

/// Name the adapter registers under.
pub const ADAPTER_NAME: &str = "cloudflare-images";
/// Document attribute holding the Cloudflare image id.
pub const REMOTE_ID_FIELD: &str = "cloudflareId";

/// Cloudflare Images storage adapter.
///
/// Uploads go to the Images API, deletes remove the remote image, and
/// URLs point at the imagedelivery.net CDN.
pub struct CloudflareImagesAdapter {
    config: CloudflareImagesConfig,
    client: ImagesClient,
}

impl CloudflareImagesAdapter {
    /// Create a new adapter.
    ///
    /// # Errors
    /// - `Configuration` if api key, account id or account hash is missing
    pub fn new(config: CloudflareImagesConfig) -> Result<Self> {
        config.validate()?;
        let client = ImagesClient::new(&config)?;

        info!(
            account_id = %config.account_id,
            variant = %config.variant,
            "Cloudflare Images adapter configured"
        );

        Ok(Self { config, client })
    }

    /// Adapter configuration.
    pub fn config(&self) -> &CloudflareImagesConfig {
        &self.config
    }

    /// Delivery URL for an image in a given variant.
    pub fn url_for_variant(&self, image_id: &str, variant: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.delivery_base.trim_end_matches('/'),
            self.config.account_hash,
            image_id,
            variant
        )
    }

    fn upload_form(file: &UploadedFile) -> Result<Form> {
        let mut part = Part::bytes(file.buffer.to_vec()).file_name(file.filename.clone());
        if let Some(mime) = &file.mime_type {
            part = part
                .mime_str(mime)
                .map_err(|e| Error::InvalidInput(format!("Invalid MIME type '{}': {}", mime, e)))?;
        }
        Ok(Form::new().part("file", part))
    }
}

/// Validate an upload response and extract the new image id.
///
/// Only a truthy `success` and a non-empty string `result.id` are
/// required. Every other field of the response is ignored.
fn parse_upload_response(body: Option<Value>) -> Result<String> {
    let body = body.ok_or_else(|| {
        Error::UploadFailed("Cloudflare returned no JSON body for the upload".to_string())
    })?;

    if !body.get("success").is_some_and(is_truthy) {
        return Err(Error::UploadFailed(format!(
            "Cloudflare rejected the upload: {}",
            error_summary(&body)
        )));
    }

    match body.pointer("/result/id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(Error::UploadFailed(
            "Cloudflare upload response is missing result.id".to_string(),
        )),
    }
}

#[async_trait]
impl StorageAdapter for CloudflareImagesAdapter {
    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::text(REMOTE_ID_FIELD, "Cloudflare Image ID")
            .read_only()
            .with_condition(DisplayCondition::WhenPresent)]
    }

    async fn handle_upload<'a>(
        &self,
        doc: &'a mut Document,
        file: &UploadedFile,
    ) -> Result<&'a mut Document> {
        let form = Self::upload_form(file)?;

        let uploaded = self
            .client
            .upload_image(form)
            .await
            .and_then(parse_upload_response);

        let image_id = match uploaded {
            Ok(image_id) => image_id,
            Err(e) => {
                error!(
                    document = %doc.id,
                    filename = %file.filename,
                    "Cloudflare upload error: {}", e
                );
                return Err(e);
            }
        };

        info!(
            document = %doc.id,
            image_id = %image_id,
            size = file.size(),
            "Uploaded image to Cloudflare"
        );
        doc.cloudflare_id = Some(image_id);

        Ok(doc)
    }

    async fn handle_delete(&self, doc: &Document) -> Result<()> {
        let Some(image_id) = doc.remote_id() else {
            warn!("No Cloudflare ID found for document {}, skipping delete", doc.id);
            return Ok(());
        };

        match self.client.delete_image(image_id).await {
            Ok(_) => {
                info!("Deleted Cloudflare image: {}", image_id);
                Ok(())
            }
            Err(Error::UpstreamApi { status: 404, .. }) if self.config.treat_missing_as_deleted => {
                warn!("Cloudflare image {} was already gone, treating as deleted", image_id);
                Ok(())
            }
            Err(e) => {
                error!("Cloudflare delete error for ID {}: {}", image_id, e);
                Err(e)
            }
        }
    }

    fn generate_url(&self, data: &Document, filename: &str) -> String {
        match data.remote_id() {
            Some(image_id) => self.url_for_variant(image_id, &self.config.variant),
            None => {
                warn!(
                    "Cloudflare ID missing on document {} for filename {}, no URL generated",
                    data.id, filename
                );
                String::new()
            }
        }
    }

    // Images are served by the Cloudflare CDN through generate_url, so the
    // host's own serving path is always skipped.
    fn static_handler(
        &self,
        _request: &StaticRequest,
        _response: &mut StaticResponse,
        next: Next<'_>,
    ) {
        next();
    }
}
