//! Storage adapter abstraction for host cloud-storage integration.
//!
//! This module provides the hook interface a host framework drives
//! (upload, delete, URL generation, static serving, schema fields) and
//! the Cloudflare Images adapter.
//!
//! # Design Principles
//! - Stateless hooks: adapters hold only immutable configuration
//! - Host-owned persistence: the remote id lives on the host document
//! - Async I/O: network hooks are async, URL and static hooks are not
//! - Unified error semantics: one error type across hooks

pub mod cloudflare;
pub mod document;
pub mod field;
pub mod provider;

pub use cloudflare::{CloudflareImagesAdapter, CloudflareImagesConfig};
pub use document::{Document, UploadedFile};
pub use field::{DisplayCondition, FieldAdmin, FieldDescriptor, FieldKind};
pub use provider::{Next, StaticRequest, StaticResponse, StorageAdapter};
