//! Result type used at the binary edge.
//!
//! Library code returns [`crate::error::Result`] so callers can match on
//! [`crate::error::ReleaseNotesError`]. Startup code in `main` only needs to
//! report failures, so it uses `color-eyre` for colorized output with context.
//!
//! ```rust,ignore
//! use auto_release_notes::result::Result;
//! use color_eyre::eyre::WrapErr;
//!
//! fn load() -> Result<Config> {
//!     let config = Config::load(path).wrap_err("failed to load configuration")?;
//!     Ok(config)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type for startup and wiring code.
pub type Result<T> = EyreResult<T>;
