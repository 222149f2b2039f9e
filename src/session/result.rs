//! The session-level report.

use crate::message::domain::{IssueCode, ValidationIssue};
use serde::{Deserialize, Serialize};

/// Outcome of validating every message of a session together.
///
/// `errors` and `warnings` hold per-message issues first, in message order,
/// followed by session-wide issues. `tool_chain_issues` repeats the
/// tool-chain subset so callers can surface it separately.
///
/// # Serialisation
///
/// Field names use camelCase; `duration` is in milliseconds and is omitted
/// when either boundary timestamp cannot be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionValidationResult {
    /// `true` when no source reported an error.
    pub valid: bool,
    /// Every error-severity issue.
    pub errors: Vec<ValidationIssue>,
    /// Every warning-severity issue.
    pub warnings: Vec<ValidationIssue>,
    /// Number of messages examined.
    pub message_count: usize,
    /// Number of messages without per-message errors.
    pub valid_count: usize,
    /// Session identifier of the first message.
    pub session_id: String,
    /// Provider of the first message.
    pub provider: String,
    /// Timestamp of the first message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Timestamp of the last message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Milliseconds between the first and last timestamps.
    #[serde(
        default,
        rename = "duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<i64>,
    /// Issues raised by the tool-chain analyzer.
    pub tool_chain_issues: Vec<ValidationIssue>,
}

impl SessionValidationResult {
    /// The report for a session with no messages.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    /// Returns `true` if any error or warning has the given code.
    #[must_use]
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues().any(|issue| issue.code == code)
    }

    /// Returns the issues with the given code, errors before warnings.
    pub fn issues_with_code(&self, code: IssueCode) -> impl Iterator<Item = &ValidationIssue> {
        self.issues().filter(move |issue| issue.code == code)
    }

    fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }
}
