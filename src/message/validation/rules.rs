//! Individual semantic rule implementations.
//!
//! Each rule is a pure function over a structurally valid message that
//! returns the issues it found, in block order. Rules never fail: anything
//! they cannot evaluate becomes an issue.

use crate::message::{
    domain::{
        CanonicalMessage, ContentBlock, ContentValue, IssueCode, MessageType, ValidationIssue,
        parse_timestamp,
    },
    ports::validator::ValidationConfig,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::borrow::Cow;

/// Validates that tool results sit in user messages and roles match types.
///
/// A `tool_result` block outside a user message, or under a non-user role,
/// is an error. A user or assistant message whose role disagrees with its
/// type is only a warning.
///
/// # Examples
///
/// ```rust
/// use sessioncheck::message::domain::{
///     CanonicalMessage, ContentBlock, IssueCode, MessageBody, MessageType, ToolResultBlock,
/// };
/// use sessioncheck::message::validation::rules::validate_type_role_consistency;
///
/// let message = CanonicalMessage::new(
///     "m-2",
///     "2025-03-01T10:00:00.000Z",
///     MessageType::Assistant,
///     "s-1",
///     "claude-code",
///     MessageBody::new(
///         "assistant",
///         vec![ContentBlock::ToolResult(ToolResultBlock::new("t1", "ok"))],
///     ),
/// );
///
/// let issues = validate_type_role_consistency(&message, None);
/// assert_eq!(issues[0].code, IssueCode::InvalidToolResultMessageType);
/// assert_eq!(issues[1].code, IssueCode::InvalidToolResultRole);
/// ```
#[must_use]
pub fn validate_type_role_consistency(
    message: &CanonicalMessage,
    line: Option<usize>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let message_type = message.message_type;
    let role = message.message.role.as_str();

    if message.message.content.has_tool_results() {
        if message_type != MessageType::User {
            issues.push(
                ValidationIssue::new(
                    IssueCode::InvalidToolResultMessageType,
                    format!(
                        "tool_result blocks must be in user messages, found in {} message",
                        message_type.as_str()
                    ),
                )
                .with_path("type")
                .with_line(line)
                .with_details(json!({ "type": message_type, "role": role })),
            );
        }

        if role != "user" {
            issues.push(
                ValidationIssue::new(
                    IssueCode::InvalidToolResultRole,
                    format!("tool_result messages must have role \"user\", found \"{role}\""),
                )
                .with_path("message.role")
                .with_line(line)
                .with_details(json!({ "role": role })),
            );
        }
    }

    match message_type {
        MessageType::User if role != "user" => issues.push(
            ValidationIssue::new(
                IssueCode::MisalignedUserRole,
                format!("User message type should have role \"user\", found \"{role}\""),
            )
            .with_path("message.role")
            .with_line(line),
        ),
        MessageType::Assistant if role != "assistant" => issues.push(
            ValidationIssue::new(
                IssueCode::MisalignedAssistantRole,
                format!("Assistant message type should have role \"assistant\", found \"{role}\""),
            )
            .with_path("message.role")
            .with_line(line),
        ),
        _ => {}
    }

    issues
}

/// Validates that the timestamp parses and lies inside the plausible window.
///
/// The window spans from `now - config.max_age` to
/// `now + config.future_tolerance`; timestamps outside it are warnings.
#[must_use]
pub fn validate_timestamp(
    message: &CanonicalMessage,
    line: Option<usize>,
    config: &ValidationConfig,
    now: DateTime<Utc>,
) -> Vec<ValidationIssue> {
    let raw = message.timestamp.as_str();
    let timestamp = match parse_timestamp(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(error) => {
            return vec![
                ValidationIssue::new(
                    IssueCode::InvalidTimestampFormat,
                    "Timestamp is not a valid date",
                )
                .with_path("timestamp")
                .with_line(line)
                .with_details(json!({ "timestamp": error.value(), "error": error.to_string() })),
            ];
        }
    };

    let (Some(horizon), Some(cutoff)) = (
        now.checked_add_signed(config.future_tolerance),
        now.checked_sub_signed(config.max_age),
    ) else {
        return vec![
            ValidationIssue::new(
                IssueCode::TimestampParseError,
                "Failed to place timestamp on the validation window",
            )
            .with_path("timestamp")
            .with_line(line)
            .with_details(json!({ "timestamp": raw, "now": now.to_rfc3339() })),
        ];
    };

    let mut issues = Vec::new();

    if timestamp > horizon {
        issues.push(
            ValidationIssue::new(
                IssueCode::FutureTimestamp,
                format!(
                    "Timestamp is more than {} hours in the future",
                    config.future_tolerance.num_hours()
                ),
            )
            .with_path("timestamp")
            .with_line(line)
            .with_details(json!({ "timestamp": raw })),
        );
    }

    if timestamp < cutoff {
        issues.push(
            ValidationIssue::new(
                IssueCode::OldTimestamp,
                format!(
                    "Timestamp is more than {} days in the past",
                    config.max_age.num_days()
                ),
            )
            .with_path("timestamp")
            .with_line(line)
            .with_details(json!({ "timestamp": raw })),
        );
    }

    issues
}

/// Validates tool invocation and result blocks.
///
/// Plain-text content has no blocks and always passes.
#[must_use]
pub fn validate_content_blocks(
    message: &CanonicalMessage,
    line: Option<usize>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (index, block) in message.message.content.blocks().iter().enumerate() {
        match block {
            ContentBlock::ToolUse(tool_use) => {
                if let Err(error) = serde_json::to_string(&tool_use.input) {
                    issues.push(
                        ValidationIssue::new(
                            IssueCode::InvalidToolUseInput,
                            format!("tool_use input is not valid JSON: {error}"),
                        )
                        .with_path(format!("message.content[{index}].input"))
                        .with_line(line)
                        .with_details(json!({ "blockIndex": index, "error": error.to_string() })),
                    );
                }

                if tool_use.id.trim().is_empty() {
                    issues.push(
                        ValidationIssue::new(IssueCode::EmptyToolUseId, "tool_use block has empty ID")
                            .with_path(format!("message.content[{index}].id"))
                            .with_line(line)
                            .with_details(json!({ "blockIndex": index })),
                    );
                }
            }
            ContentBlock::ToolResult(result) => {
                if result.tool_use_id.trim().is_empty() {
                    issues.push(
                        ValidationIssue::new(
                            IssueCode::EmptyToolUseId,
                            "tool_result block has empty tool_use_id",
                        )
                        .with_path(format!("message.content[{index}].tool_use_id"))
                        .with_line(line)
                        .with_details(json!({ "blockIndex": index })),
                    );
                }

                if result.content.trim().is_empty() {
                    issues.push(
                        ValidationIssue::new(
                            IssueCode::EmptyToolResultContent,
                            "tool_result block has empty content",
                        )
                        .with_path(format!("message.content[{index}].content"))
                        .with_line(line)
                        .with_details(json!({ "blockIndex": index })),
                    );
                }
            }
            ContentBlock::Text(_) | ContentBlock::Thinking(_) => {}
        }
    }

    issues
}

/// Validates that provider metadata does not repeat the message content.
///
/// The check probes the serialised metadata for the first
/// `config.metadata_probe_chars` characters of the content, and only runs
/// when the content is longer than the probe.
#[must_use]
pub fn validate_provider_metadata(
    message: &CanonicalMessage,
    line: Option<usize>,
    config: &ValidationConfig,
) -> Vec<ValidationIssue> {
    let Some(metadata) = message.provider_metadata.as_ref() else {
        return Vec::new();
    };

    let content: Cow<'_, str> = match &message.message.content {
        ContentValue::Text(text) => Cow::Borrowed(text),
        ContentValue::Blocks(blocks) => match serde_json::to_string(blocks) {
            Ok(serialised) => Cow::Owned(serialised),
            Err(_) => return Vec::new(),
        },
    };
    let Ok(metadata_json) = serde_json::to_string(metadata) else {
        return Vec::new();
    };

    let content_size = content.chars().count();
    if content_size <= config.metadata_probe_chars {
        return Vec::new();
    }

    let probe: String = content.chars().take(config.metadata_probe_chars).collect();
    if !metadata_json.contains(&probe) {
        return Vec::new();
    }

    vec![
        ValidationIssue::new(
            IssueCode::DuplicateContentInMetadata,
            "Content appears to be duplicated in providerMetadata",
        )
        .with_path("providerMetadata")
        .with_line(line)
        .with_details(json!({
            "metadataSize": metadata_json.chars().count(),
            "contentSize": content_size,
        })),
    ]
}
