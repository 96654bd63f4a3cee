//! Release repository abstraction and its GitHub implementation.
//!
//! The webhook handler only ever talks to a [`manager::ForgeManager`], which
//! bounds calls to any [`traits::ReleaseRepository`] by a timeout.

/// GitHub API client implementation.
pub mod github;

/// Timeout and dry-run wrapper around a release repository.
pub mod manager;

/// Common traits for release repository abstraction.
pub mod traits;

/// Shared data types for releases.
pub mod types;
