//! Common utilities and types shared across the Cloudflare Images adapter crates.
//!
//! This module provides the error type used by every hook and the small value
//! types that cross the host boundary (document identifiers, secrets).

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ApiKey, DocumentId};
