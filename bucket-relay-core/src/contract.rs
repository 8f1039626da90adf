//! # contract: gateway interface to the remote object store
//!
//! This module defines a single trait ([`BlobStore`]) and its supporting
//! request and error types for putting named blobs into a remote storage
//! container via an API client, a local fake, or a mock implementation.
//!
//! ## Interface & Extensibility
//! - Implement the [`BlobStore`] trait to create new store clients.
//! - The method is async and returns a typed [`StoreError`], so callers can
//!   tell a per-blob rejection apart from a dead session.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests.

use async_trait::async_trait;
use thiserror::Error;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// The bare minimum data needed to put one blob.
pub struct NewBlob<'a> {
    /// The container (bucket) the blob is stored in.
    pub container: &'a str,
    /// Blob name; by convention the candidate file's base name.
    pub name: &'a str,
    /// Raw file contents, treated as opaque bytes.
    pub content: &'a [u8],
}

/// Error surface of a single put attempt.
///
/// `Rejected` is scoped to the one blob and leaves the session usable.
/// `SessionLost` means no further put through this session can succeed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("upload of blob {name} rejected: {reason}")]
    Rejected { name: String, reason: String },
    #[error("remote store session lost: {reason}")]
    SessionLost { reason: String },
}

/// Trait for putting named blobs into a remote container.
///
/// The implementor owns the live session, endpoint and credentials; the trait
/// is agnostic of authentication and transport details. A put is
/// overwrite-capable: re-uploading a name replaces the remote content, which
/// makes re-attempting after a crash safe. No retry policy lives behind this
/// trait; a single failed attempt is reported upward as-is.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store one blob in the given container.
    async fn put_blob<'a>(&self, req: NewBlob<'a>) -> Result<(), StoreError>;
}
