//! Sessioncheck: validation for canonical AI coding-assistant transcripts.
//!
//! Transcripts produced by different coding assistants are converted
//! upstream into one canonical message stream. This crate checks that
//! stream before it is used for analytics, billing, or display.
//!
//! # Architecture
//!
//! The crate follows the same layering as the rest of our services:
//!
//! - **Domain**: Pure value types with no infrastructure dependencies
//! - **Ports**: Trait seams and configuration for validation behaviour
//! - **Validation**: Rule implementations and default services
//!
//! # Modules
//!
//! - [`message`]: Canonical message schema and per-message validation
//! - [`session`]: Session-wide consistency analysis and orchestration
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sessioncheck::session::validate_session;
//!
//! let messages = vec![json!({
//!     "uuid": "m-1",
//!     "timestamp": "2025-03-01T10:00:00.000Z",
//!     "type": "user",
//!     "sessionId": "s-1",
//!     "provider": "claude-code",
//!     "message": { "role": "user", "content": "Fix the failing test" }
//! })];
//!
//! let report = validate_session(&messages);
//! assert!(report.valid);
//! assert_eq!(report.session_id, "s-1");
//! ```

pub mod message;
pub mod session;
