//! Session-wide validation.
//!
//! A session is the ordered list of canonical messages from one
//! transcript. Validating it runs per-message validation on every entry
//! and then checks properties that only hold across messages:
//!
//! - every tool result answers a tool invocation somewhere in the session
//! - message uuids are unique
//! - timestamps do not run backwards or jump by large gaps
//!
//! Entries are read through [`entry::SessionEntry`], implemented for raw
//! [`serde_json::Value`]s and for typed
//! [`CanonicalMessage`](crate::message::domain::CanonicalMessage)s.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sessioncheck::message::domain::IssueCode;
//! use sessioncheck::session::validate_session;
//!
//! let messages = vec![
//!     json!({
//!         "uuid": "m-1",
//!         "timestamp": "2025-03-01T10:00:00.000Z",
//!         "type": "assistant",
//!         "sessionId": "s-1",
//!         "provider": "claude-code",
//!         "message": {
//!             "role": "assistant",
//!             "content": [{ "type": "tool_use", "id": "t1", "name": "Bash", "input": {} }]
//!         }
//!     }),
//!     json!({
//!         "uuid": "m-2",
//!         "timestamp": "2025-03-01T10:00:05.000Z",
//!         "type": "user",
//!         "sessionId": "s-1",
//!         "provider": "claude-code",
//!         "message": {
//!             "role": "user",
//!             "content": [{ "type": "tool_result", "tool_use_id": "t1", "content": "ok" }]
//!         }
//!     }),
//! ];
//!
//! let report = validate_session(&messages);
//! assert!(report.valid);
//! assert_eq!(report.duration_ms, Some(5_000));
//! assert!(report.tool_chain_issues.is_empty());
//! assert!(!report.has_code(IssueCode::OrphanToolResult));
//! ```

pub mod analyzers;
pub mod entry;
pub mod result;
pub mod service;

pub use entry::SessionEntry;
pub use result::SessionValidationResult;
pub use service::{SessionValidator, validate_session};

#[cfg(test)]
mod tests;
