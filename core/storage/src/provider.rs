//! Storage adapter trait definition.

use async_trait::async_trait;
use bytes::Bytes;

use cfimages_common::Result;

use crate::document::{Document, UploadedFile};
use crate::field::FieldDescriptor;

/// Request the host routes through an adapter's static handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRequest {
    /// Request path as seen by the host.
    pub path: String,
    /// Filename the host resolved from the path.
    pub filename: String,
}

/// Response the host would send if a handler chose to answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticResponse {
    pub status: Option<u16>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

/// Continuation to the next handler in the host chain.
pub type Next<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Storage adapter trait for host cloud-storage integration.
///
/// Each hook call is independent. Implementations hold only immutable
/// configuration, so one instance may serve concurrent calls.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Adapter name (e.g., "cloudflare-images").
    fn name(&self) -> &str;

    /// Attributes the host attaches to every managed document.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Store a file remotely and record the remote id on the document.
    ///
    /// # Postconditions
    /// - On success the document carries the remote id and is returned
    /// - On failure the document is left untouched
    ///
    /// # Errors
    /// - Upstream rejection or unexpected response shape
    /// - Network errors
    async fn handle_upload<'a>(
        &self,
        doc: &'a mut Document,
        file: &UploadedFile,
    ) -> Result<&'a mut Document>;

    /// Remove the remote asset referenced by the document.
    ///
    /// A document without a remote id is a no-op.
    async fn handle_delete(&self, doc: &Document) -> Result<()>;

    /// Public URL for the document's asset, or an empty string if none exists yet.
    fn generate_url(&self, data: &Document, filename: &str) -> String;

    /// Serve or pass on a request for stored bytes.
    fn static_handler(
        &self,
        request: &StaticRequest,
        response: &mut StaticResponse,
        next: Next<'_>,
    );
}
