//! Session-wide consistency analyzers.
//!
//! Each analyzer is a pure function over the ordered entries of one session
//! and returns its issues in a deterministic order. Analyzers read entries
//! through [`SessionEntry`](crate::session::entry::SessionEntry), so they
//! also run over entries that failed per-message validation.

pub mod ordering;
pub mod tool_chain;
pub mod uniqueness;

pub use ordering::check_timestamp_ordering;
pub use tool_chain::{ToolUseIndex, ToolUseOrigin, check_tool_chain};
pub use uniqueness::check_uuid_uniqueness;

/// Returns the issue path naming a message by position.
fn message_path(index: usize) -> String {
    format!("messages[{index}]")
}

/// Returns the 1-based line of a message.
const fn message_line(index: usize) -> Option<usize> {
    Some(index.saturating_add(1))
}
