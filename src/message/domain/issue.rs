//! Tiered validation issues and per-message validation reports.
//!
//! Every rule in the crate reports through [`ValidationIssue`]. Rule codes
//! form a closed set ([`IssueCode`]) whose string forms are stable: callers
//! branch on them, so a code never changes meaning.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How serious an issue is.
///
/// Errors invalidate the message or session; warnings are advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocking violation.
    Error,
    /// Non-blocking signal.
    Warning,
}

impl Severity {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of the rule that produced an issue.
///
/// Each code has exactly one severity; see [`IssueCode::severity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// The value does not match the canonical message schema.
    SchemaValidationError,
    /// A `tool_result` block appears in a non-user message.
    InvalidToolResultMessageType,
    /// A `tool_result` block appears under a non-user role.
    InvalidToolResultRole,
    /// A user message carries a different role.
    MisalignedUserRole,
    /// An assistant message carries a different role.
    MisalignedAssistantRole,
    /// The timestamp does not follow the RFC 3339 grammar.
    InvalidTimestampFormat,
    /// The timestamp could not be placed on the validation window.
    TimestampParseError,
    /// The timestamp lies beyond the future tolerance.
    FutureTimestamp,
    /// The timestamp is older than the maximum age.
    OldTimestamp,
    /// A `tool_use` input cannot be serialised.
    InvalidToolUseInput,
    /// A tool invocation or result has a blank identifier.
    EmptyToolUseId,
    /// A tool result has blank content.
    EmptyToolResultContent,
    /// Provider metadata repeats the message content.
    DuplicateContentInMetadata,
    /// A tool result references no known invocation.
    OrphanToolResult,
    /// Several tool results answer the same invocation.
    DuplicateToolResult,
    /// Several messages share a uuid.
    DuplicateUuid,
    /// A timestamp is earlier than its predecessor's.
    OutOfOrderTimestamp,
    /// Consecutive messages are far apart in time.
    LargeTimeGap,
}

impl IssueCode {
    /// Every code, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::SchemaValidationError,
        Self::InvalidToolResultMessageType,
        Self::InvalidToolResultRole,
        Self::MisalignedUserRole,
        Self::MisalignedAssistantRole,
        Self::InvalidTimestampFormat,
        Self::TimestampParseError,
        Self::FutureTimestamp,
        Self::OldTimestamp,
        Self::InvalidToolUseInput,
        Self::EmptyToolUseId,
        Self::EmptyToolResultContent,
        Self::DuplicateContentInMetadata,
        Self::OrphanToolResult,
        Self::DuplicateToolResult,
        Self::DuplicateUuid,
        Self::OutOfOrderTimestamp,
        Self::LargeTimeGap,
    ];

    /// Returns the stable wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SchemaValidationError => "SCHEMA_VALIDATION_ERROR",
            Self::InvalidToolResultMessageType => "INVALID_TOOL_RESULT_MESSAGE_TYPE",
            Self::InvalidToolResultRole => "INVALID_TOOL_RESULT_ROLE",
            Self::MisalignedUserRole => "MISALIGNED_USER_ROLE",
            Self::MisalignedAssistantRole => "MISALIGNED_ASSISTANT_ROLE",
            Self::InvalidTimestampFormat => "INVALID_TIMESTAMP_FORMAT",
            Self::TimestampParseError => "TIMESTAMP_PARSE_ERROR",
            Self::FutureTimestamp => "FUTURE_TIMESTAMP",
            Self::OldTimestamp => "OLD_TIMESTAMP",
            Self::InvalidToolUseInput => "INVALID_TOOL_USE_INPUT",
            Self::EmptyToolUseId => "EMPTY_TOOL_USE_ID",
            Self::EmptyToolResultContent => "EMPTY_TOOL_RESULT_CONTENT",
            Self::DuplicateContentInMetadata => "DUPLICATE_CONTENT_IN_METADATA",
            Self::OrphanToolResult => "ORPHAN_TOOL_RESULT",
            Self::DuplicateToolResult => "DUPLICATE_TOOL_RESULT",
            Self::DuplicateUuid => "DUPLICATE_UUID",
            Self::OutOfOrderTimestamp => "OUT_OF_ORDER_TIMESTAMP",
            Self::LargeTimeGap => "LARGE_TIME_GAP",
        }
    }

    /// Returns the severity every issue with this code carries.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::MisalignedUserRole
            | Self::MisalignedAssistantRole
            | Self::FutureTimestamp
            | Self::OldTimestamp
            | Self::DuplicateContentInMetadata
            | Self::DuplicateToolResult
            | Self::OutOfOrderTimestamp
            | Self::LargeTimeGap => Severity::Warning,
            Self::SchemaValidationError
            | Self::InvalidToolResultMessageType
            | Self::InvalidToolResultRole
            | Self::InvalidTimestampFormat
            | Self::TimestampParseError
            | Self::InvalidToolUseInput
            | Self::EmptyToolUseId
            | Self::EmptyToolResultContent
            | Self::OrphanToolResult
            | Self::DuplicateUuid => Severity::Error,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding produced by a validation rule.
///
/// # Examples
///
/// ```
/// use sessioncheck::message::domain::{IssueCode, Severity, ValidationIssue};
///
/// let issue = ValidationIssue::new(IssueCode::FutureTimestamp, "too far ahead")
///     .with_path("timestamp")
///     .with_line(Some(3));
/// assert_eq!(issue.severity, Severity::Warning);
/// assert_eq!(issue.line, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Blocking or advisory.
    pub severity: Severity,
    /// The rule that produced the issue.
    pub code: IssueCode,
    /// Human-readable description.
    pub message: String,
    /// Dotted path of the offending field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// 1-based position of the message within its session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Rule-specific structured context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ValidationIssue {
    /// Creates an issue whose severity is derived from its code.
    #[must_use]
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            path: None,
            line: None,
            details: None,
        }
    }

    /// Sets the field path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the line number, if known.
    #[must_use]
    pub const fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Attaches structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Returns `true` for error-severity issues.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Outcome of validating one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` when no errors were found; warnings never affect this.
    pub valid: bool,
    /// Error-severity issues, in rule order.
    pub errors: Vec<ValidationIssue>,
    /// Warning-severity issues, in rule order.
    pub warnings: Vec<ValidationIssue>,
    /// Always 1 for a single message.
    pub message_count: usize,
    /// 1 when the message is valid, otherwise 0.
    pub valid_count: usize,
}

impl ValidationResult {
    /// Builds a report by partitioning issues on severity, preserving order.
    #[must_use]
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ValidationIssue::is_error);
        let valid = errors.is_empty();
        Self {
            valid,
            errors,
            warnings,
            message_count: 1,
            valid_count: usize::from(valid),
        }
    }

    /// Builds the report for a message that failed structural validation.
    #[must_use]
    pub const fn rejected(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: false,
            errors,
            warnings: Vec::new(),
            message_count: 1,
            valid_count: 0,
        }
    }

    /// Returns `true` if any issue carries the given code.
    #[must_use]
    pub fn has_code(&self, code: IssueCode) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.code == code)
    }
}
