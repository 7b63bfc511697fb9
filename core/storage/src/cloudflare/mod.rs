//! Cloudflare Images storage adapter.
//!
//! This module provides the adapter backed by the Cloudflare Images API:
//! - Bearer-token authenticated API calls
//! - Multipart uploads recording the image id on the host document
//! - Remote deletes keyed by that id
//! - Delivery URLs on the imagedelivery.net CDN

pub mod client;
pub mod config;
pub mod provider;

pub use client::{error_summary, ImagesClient};
pub use config::{
    CloudflareImagesConfig, CLOUDFLARE_API_BASE, DEFAULT_VARIANT, IMAGE_DELIVERY_BASE,
};
pub use provider::{CloudflareImagesAdapter, ADAPTER_NAME, REMOTE_ID_FIELD};
