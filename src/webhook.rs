//! Inbound GitHub webhook deliveries: request shape, signature
//! verification and pull request payload parsing.

/// Pull request event payload parsing.
pub mod payload;

/// Transport independent webhook request.
pub mod request;

/// HMAC-SHA1 signature verification.
pub mod signature;
