//! Tool-chain consistency.
//!
//! Every `tool_result` must answer a `tool_use` found somewhere in the same
//! session. A `tool_use` without a result is never flagged: the tool may
//! still be running when the transcript was captured.

use super::{message_line, message_path};
use crate::message::domain::{BlockView, IssueCode, ValidationIssue};
use crate::session::entry::SessionEntry;
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// Where a tool invocation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolUseOrigin<'a> {
    /// Zero-based index of the message holding the invocation.
    pub message_index: usize,
    /// Name of the invoked tool.
    pub name: &'a str,
}

/// Index of every tool invocation in a session, keyed by invocation id.
///
/// The index is order-independent: a result may precede its invocation.
/// When two invocations share an id, the later one wins.
#[derive(Debug, Clone, Default)]
pub struct ToolUseIndex<'a> {
    origins: HashMap<&'a str, ToolUseOrigin<'a>>,
}

impl<'a> ToolUseIndex<'a> {
    /// Collects every `tool_use` block of the given entries.
    #[must_use]
    pub fn build<M: SessionEntry>(messages: &'a [M]) -> Self {
        let mut origins = HashMap::new();
        for (message_index, message) in messages.iter().enumerate() {
            for block in message.content_blocks() {
                if let BlockView::ToolUse { id, name } = block {
                    origins.insert(id, ToolUseOrigin {
                        message_index,
                        name,
                    });
                }
            }
        }
        Self { origins }
    }

    /// Returns where the invocation with the given id was found.
    #[must_use]
    pub fn get(&self, tool_use_id: &str) -> Option<&ToolUseOrigin<'a>> {
        self.origins.get(tool_use_id)
    }

    /// Returns `true` if an invocation with the given id exists.
    #[must_use]
    pub fn contains(&self, tool_use_id: &str) -> bool {
        self.origins.contains_key(tool_use_id)
    }

    /// Returns the number of distinct invocation ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns `true` if the session has no invocations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Checks that tool results pair with tool invocations.
///
/// Emits an `ORPHAN_TOOL_RESULT` error for each result whose id matches no
/// invocation, and a `DUPLICATE_TOOL_RESULT` warning for each result after
/// the first that answers the same id. Issues follow message order, then
/// block order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sessioncheck::message::domain::IssueCode;
/// use sessioncheck::session::analyzers::check_tool_chain;
///
/// let messages = vec![json!({
///     "uuid": "m-1",
///     "message": {
///         "role": "user",
///         "content": [{ "type": "tool_result", "tool_use_id": "t9", "content": "ok" }]
///     }
/// })];
///
/// let issues = check_tool_chain(&messages);
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues[0].code, IssueCode::OrphanToolResult);
/// ```
#[must_use]
pub fn check_tool_chain<M: SessionEntry>(messages: &[M]) -> Vec<ValidationIssue> {
    let index = ToolUseIndex::build(messages);
    let mut answered = HashSet::new();
    let mut issues = Vec::new();

    for (message_index, message) in messages.iter().enumerate() {
        for block in message.content_blocks() {
            let BlockView::ToolResult { tool_use_id } = block else {
                continue;
            };
            let origin = index.get(tool_use_id);

            if origin.is_none() {
                issues.push(
                    ValidationIssue::new(
                        IssueCode::OrphanToolResult,
                        format!(
                            "tool_result references tool_use_id \"{tool_use_id}\" which doesn't exist"
                        ),
                    )
                    .with_path(message_path(message_index))
                    .with_line(message_line(message_index))
                    .with_details(json!({
                        "messageIndex": message_index,
                        "toolUseId": tool_use_id,
                        "uuid": message.uuid(),
                    })),
                );
            }

            if !answered.insert(tool_use_id) {
                issues.push(
                    ValidationIssue::new(
                        IssueCode::DuplicateToolResult,
                        format!("Multiple tool_result blocks for tool_use_id \"{tool_use_id}\""),
                    )
                    .with_path(message_path(message_index))
                    .with_line(message_line(message_index))
                    .with_details(json!({
                        "messageIndex": message_index,
                        "toolUseId": tool_use_id,
                        "toolName": origin.map(|found| found.name),
                        "uuid": message.uuid(),
                    })),
                );
            }
        }
    }

    issues
}
