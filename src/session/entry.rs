//! Read-only view of a session entry.
//!
//! Session analysis runs over input that may not have passed schema
//! validation. [`SessionEntry`] gives the analyzers the handful of fields
//! they need without assuming the rest of the message is well formed.

use crate::message::domain::{BlockView, CanonicalMessage};
use serde_json::Value;
use std::borrow::Cow;
use tracing::warn;

/// Fields of a message that session-wide analysis depends on.
///
/// Accessors return `None` (or no blocks) for anything missing or of the
/// wrong type; such defects are reported by per-message validation.
pub trait SessionEntry {
    /// Returns the message identifier.
    fn uuid(&self) -> Option<&str>;

    /// Returns the owning session identifier.
    fn session_id(&self) -> Option<&str>;

    /// Returns the provider slug.
    fn provider(&self) -> Option<&str>;

    /// Returns the raw timestamp string.
    fn timestamp(&self) -> Option<&str>;

    /// Returns the tool-chain view of each content block, in order.
    ///
    /// Plain-text content yields no blocks.
    fn content_blocks(&self) -> Vec<BlockView<'_>>;

    /// Returns the entry as a raw JSON value for per-message validation.
    fn to_raw(&self) -> Cow<'_, Value>;
}

impl SessionEntry for Value {
    fn uuid(&self) -> Option<&str> {
        self.get("uuid").and_then(Value::as_str)
    }

    fn session_id(&self) -> Option<&str> {
        self.get("sessionId").and_then(Value::as_str)
    }

    fn provider(&self) -> Option<&str> {
        self.get("provider").and_then(Value::as_str)
    }

    fn timestamp(&self) -> Option<&str> {
        self.get("timestamp").and_then(Value::as_str)
    }

    fn content_blocks(&self) -> Vec<BlockView<'_>> {
        self.pointer("/message/content")
            .and_then(Value::as_array)
            .map(|blocks| blocks.iter().filter_map(raw_block_view).collect())
            .unwrap_or_default()
    }

    fn to_raw(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

impl SessionEntry for CanonicalMessage {
    fn uuid(&self) -> Option<&str> {
        Some(&self.uuid)
    }

    fn session_id(&self) -> Option<&str> {
        Some(&self.session_id)
    }

    fn provider(&self) -> Option<&str> {
        Some(&self.provider)
    }

    fn timestamp(&self) -> Option<&str> {
        Some(&self.timestamp)
    }

    fn content_blocks(&self) -> Vec<BlockView<'_>> {
        self.message
            .content
            .blocks()
            .iter()
            .map(|block| block.view())
            .collect()
    }

    fn to_raw(&self) -> Cow<'_, Value> {
        match serde_json::to_value(self) {
            Ok(value) => Cow::Owned(value),
            Err(error) => {
                warn!(uuid = %self.uuid, %error, "failed to serialise canonical message");
                Cow::Owned(Value::Null)
            }
        }
    }
}

/// Reads a raw block, skipping tool blocks whose identifier is unreadable.
fn raw_block_view(block: &Value) -> Option<BlockView<'_>> {
    match str_field(block, "type") {
        Some("tool_use") => Some(BlockView::ToolUse {
            id: str_field(block, "id")?,
            name: str_field(block, "name").unwrap_or_default(),
        }),
        Some("tool_result") => Some(BlockView::ToolResult {
            tool_use_id: str_field(block, "tool_use_id")?,
        }),
        _ => Some(BlockView::Other),
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}
