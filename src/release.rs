//! Release note accumulation: version tags, note lines and the decision of
//! what to do with the latest release.

/// Decides between appending to a draft and cutting a new release.
pub mod decision;

/// Single-line release note format.
pub mod note;

/// `{prefix}{major}.{minor}.{patch}` release tags.
pub mod version;
