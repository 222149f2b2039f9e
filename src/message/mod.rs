//! Canonical message format and per-message validation.
//!
//! This module implements the canonical message types produced by the
//! provider converters, the tiered issue model, and the validator that
//! classifies a single raw message.
//!
//! # Architecture
//!
//! - **Domain**: Pure domain types ([`domain::CanonicalMessage`], [`domain::ContentBlock`], [`domain::ValidationIssue`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::validator::MessageValidator`]) and [`ports::validator::ValidationConfig`]
//! - **Validation**: Structural schema walking and semantic rules
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sessioncheck::message::ports::validator::MessageValidator;
//! use sessioncheck::message::validation::service::DefaultMessageValidator;
//!
//! let raw = json!({
//!     "uuid": "m-1",
//!     "timestamp": "2025-03-01T10:00:00.000Z",
//!     "type": "assistant",
//!     "sessionId": "s-1",
//!     "provider": "codex",
//!     "message": { "role": "assistant", "content": "Done." }
//! });
//!
//! let validator = DefaultMessageValidator::new();
//! let result = validator.validate(&raw, Some(1));
//! assert!(result.valid);
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

#[cfg(test)]
pub(crate) mod tests;
