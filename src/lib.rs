//! Keeps a running draft GitHub release whose notes accumulate one line per
//! pull request merged into the default branch.
//!
//! Deliveries flow through [`webhook::signature`], [`webhook::payload`] and
//! [`release::decision`], orchestrated by [`handler`]. Releases are read and
//! written through a [`forge::traits::ReleaseRepository`].

pub mod cli;
pub mod config;
pub mod error;
pub mod forge;
pub mod handler;
pub mod release;
pub mod result;
pub mod secret;
pub mod server;
pub mod webhook;

pub use error::{ReleaseNotesError, Result};

#[cfg(test)]
pub mod test_helpers;
