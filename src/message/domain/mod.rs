//! Domain types for the message subsystem.
//!
//! This module contains pure domain types with no infrastructure dependencies.
//! All types are immutable after construction and serialisable via serde.

mod content;
mod issue;
mod message;
mod timestamp;

pub use content::{
    BlockView, ContentBlock, ContentValue, TextBlock, ThinkingBlock, ToolResultBlock, ToolUseBlock,
};
pub use issue::{IssueCode, Severity, ValidationIssue, ValidationResult};
pub use message::{CanonicalMessage, MessageBody, MessageType, TokenUsage};
pub use timestamp::parse_timestamp;
