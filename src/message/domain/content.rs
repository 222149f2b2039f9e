//! Content types representing the polymorphic body of canonical messages.
//!
//! A message body is either a plain string or an ordered list of typed
//! blocks. This module defines the typed representation of both shapes and
//! the helpers converters and analyzers use to inspect them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The content of a message body.
///
/// # Serialisation
///
/// Plain text serialises as a JSON string; structured content serialises as
/// an array of blocks, each carrying a `type` tag:
///
/// ```json
/// "Fix the failing test"
/// [{ "type": "text", "text": "Reading the file" }, { "type": "tool_use", "id": "t1", "name": "Read", "input": {} }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentValue {
    /// Unstructured text content.
    Text(String),
    /// Ordered structured content blocks.
    Blocks(Vec<ContentBlock>),
}

impl ContentValue {
    /// Returns the structured blocks, or an empty slice for plain text.
    #[must_use]
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            Self::Text(_) => &[],
            Self::Blocks(blocks) => blocks,
        }
    }

    /// Returns the readable text of the content.
    ///
    /// Plain text is returned as-is; structured content yields its text
    /// blocks joined by newlines.
    ///
    /// # Examples
    ///
    /// ```
    /// use sessioncheck::message::domain::{ContentBlock, ContentValue, TextBlock};
    ///
    /// let content = ContentValue::Blocks(vec![
    ///     ContentBlock::Text(TextBlock::new("first")),
    ///     ContentBlock::Text(TextBlock::new("second")),
    /// ]);
    /// assert_eq!(content.text(), "first\nsecond");
    /// ```
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text(text) => Some(text.text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Returns `true` if any block is a tool invocation.
    #[must_use]
    pub fn has_tool_uses(&self) -> bool {
        self.blocks()
            .iter()
            .any(|block| matches!(block, ContentBlock::ToolUse(_)))
    }

    /// Returns `true` if any block is a tool result.
    #[must_use]
    pub fn has_tool_results(&self) -> bool {
        self.blocks()
            .iter()
            .any(|block| matches!(block, ContentBlock::ToolResult(_)))
    }

    /// Returns the identifiers of every tool invocation, in block order.
    #[must_use]
    pub fn tool_use_ids(&self) -> Vec<&str> {
        self.blocks()
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse(tool_use) => Some(tool_use.id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the `tool_use_id` of every tool result, in block order.
    #[must_use]
    pub fn tool_result_ids(&self) -> Vec<&str> {
        self.blocks()
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolResult(result) => Some(result.tool_use_id.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl From<&str> for ContentValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<ContentBlock>> for ContentValue {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

/// A single typed block within structured content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text.
    Text(TextBlock),
    /// Model reasoning, possibly encrypted.
    Thinking(ThinkingBlock),
    /// A request to invoke a named tool.
    ToolUse(ToolUseBlock),
    /// The outcome of a tool invocation.
    ToolResult(ToolResultBlock),
}

impl ContentBlock {
    /// Returns the borrowed view analyzers use to reason about tool chains.
    #[must_use]
    pub fn view(&self) -> BlockView<'_> {
        match self {
            Self::ToolUse(tool_use) => BlockView::ToolUse {
                id: &tool_use.id,
                name: &tool_use.name,
            },
            Self::ToolResult(result) => BlockView::ToolResult {
                tool_use_id: &result.tool_use_id,
            },
            Self::Text(_) | Self::Thinking(_) => BlockView::Other,
        }
    }
}

/// Text content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The text content.
    pub text: String,
}

impl TextBlock {
    /// Creates a new text block.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Reasoning content block.
///
/// Some providers expose plain reasoning text; others only an opaque
/// signature over encrypted reasoning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingBlock {
    /// Plain reasoning text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    /// Signature over encrypted reasoning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Tool invocation block.
///
/// # Examples
///
/// ```
/// use serde_json::{Map, json};
/// use sessioncheck::message::domain::ToolUseBlock;
///
/// let mut input = Map::new();
/// input.insert("path".to_owned(), json!("src/main.rs"));
/// let block = ToolUseBlock::new("toolu_01", "Read", input);
/// assert_eq!(block.name, "Read");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUseBlock {
    /// Identifier linking this invocation to its result.
    pub id: String,
    /// The name of the tool being invoked.
    pub name: String,
    /// Tool parameters.
    pub input: Map<String, Value>,
}

impl ToolUseBlock {
    /// Creates a new tool invocation block.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// Tool result block, matched to its invocation by `tool_use_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResultBlock {
    /// The invocation this result answers.
    pub tool_use_id: String,
    /// The result content.
    pub content: String,
    /// Explicit failure flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResultBlock {
    /// Creates a successful tool result block.
    #[must_use]
    pub fn new(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: None,
        }
    }

    /// Marks the result as a failed invocation.
    #[must_use]
    pub const fn failed(mut self) -> Self {
        self.is_error = Some(true);
        self
    }
}

/// A borrowed, tool-chain-relevant view of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockView<'a> {
    /// A tool invocation.
    ToolUse {
        /// Invocation identifier.
        id: &'a str,
        /// Tool name.
        name: &'a str,
    },
    /// A tool result.
    ToolResult {
        /// Identifier of the invocation being answered.
        tool_use_id: &'a str,
    },
    /// Any block irrelevant to tool chains.
    Other,
}
