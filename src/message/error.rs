//! Domain error types for canonical message parsing.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants
//! that can be inspected by callers. None of these escape the validator:
//! each is converted into a [`ValidationIssue`](super::domain::ValidationIssue).

use thiserror::Error;

/// A single structural mismatch between a raw value and the canonical schema.
///
/// Every variant carries the dotted path of the offending field; the empty
/// path denotes the message root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// A required field is absent.
    #[error("Required")]
    Missing {
        /// Field path.
        path: String,
    },

    /// A field holds the wrong JSON type.
    #[error("Expected {expected}, received {received}")]
    WrongType {
        /// Field path.
        path: String,
        /// The JSON type the schema requires.
        expected: &'static str,
        /// The JSON type found.
        received: &'static str,
    },

    /// A string that must be non-empty is empty.
    #[error("Must not be empty")]
    EmptyString {
        /// Field path.
        path: String,
    },

    /// A string is outside its enumeration.
    #[error("Must be {allowed}, received '{received}'")]
    InvalidEnum {
        /// Field path.
        path: String,
        /// Human-readable list of accepted values.
        allowed: String,
        /// The value found.
        received: String,
    },

    /// A content block carries an unknown or missing `type` tag.
    #[error("Invalid discriminator value. Expected {allowed}")]
    InvalidDiscriminator {
        /// Path of the `type` field.
        path: String,
        /// Human-readable list of accepted tags.
        allowed: String,
    },

    /// A timestamp does not follow RFC 3339.
    #[error("Must be a valid RFC3339/ISO 8601 timestamp")]
    InvalidTimestamp {
        /// Field path.
        path: String,
    },

    /// A token count is not a non-negative integer.
    #[error("Expected a non-negative integer, received {received}")]
    InvalidTokenCount {
        /// Field path.
        path: String,
        /// The value found.
        received: String,
    },

    /// Message content is neither a string nor a block array.
    #[error("Expected string or array of content blocks, received {received}")]
    InvalidContent {
        /// Field path.
        path: String,
        /// The JSON type found.
        received: &'static str,
    },

    /// The value passed every field check but could not be materialised.
    #[error("failed to construct canonical message: {reason}")]
    Construction {
        /// Field path.
        path: String,
        /// Deserialiser error text.
        reason: String,
    },
}

impl SchemaViolation {
    /// Returns the dotted path of the offending field.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Missing { path }
            | Self::WrongType { path, .. }
            | Self::EmptyString { path }
            | Self::InvalidEnum { path, .. }
            | Self::InvalidDiscriminator { path, .. }
            | Self::InvalidTimestamp { path }
            | Self::InvalidTokenCount { path, .. }
            | Self::InvalidContent { path, .. }
            | Self::Construction { path, .. } => path,
        }
    }

    /// Returns a stable tag naming the violation kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::WrongType { .. } => "wrong_type",
            Self::EmptyString { .. } => "empty_string",
            Self::InvalidEnum { .. } => "invalid_enum",
            Self::InvalidDiscriminator { .. } => "invalid_discriminator",
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
            Self::InvalidTokenCount { .. } => "invalid_token_count",
            Self::InvalidContent { .. } => "invalid_content",
            Self::Construction { .. } => "construction",
        }
    }
}

/// A timestamp that does not follow the RFC 3339 grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid RFC 3339 timestamp '{value}': {source}")]
pub struct TimestampError {
    value: String,
    #[source]
    source: chrono::ParseError,
}

impl TimestampError {
    /// Creates a timestamp error for the given raw value.
    #[must_use]
    pub fn new(value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    /// Returns the rejected raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
