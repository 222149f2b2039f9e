//! Validator port for canonical message validation.
//!
//! Defines the abstract interface for validating messages at different layers.

use crate::message::domain::{CanonicalMessage, ValidationIssue, ValidationResult};
use chrono::TimeDelta;
use serde_json::Value;

/// Port for message validation operations.
///
/// Validation occurs in layers:
/// 1. Structure validation (required fields, types, enumerations)
/// 2. Semantic validation (type/role alignment, timestamps, content, metadata)
///
/// Semantic validation only runs on values that passed structure validation.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Never panic; every failure is reported as a [`ValidationIssue`]
/// - Collect every issue of a layer before returning (not fail-fast)
/// - Be stateless and thread-safe
pub trait MessageValidator: Send + Sync {
    /// Returns the thresholds the validator applies.
    fn config(&self) -> &ValidationConfig;

    /// Validates the structural shape of a raw value.
    ///
    /// Checks:
    /// - Required fields are present and non-empty
    /// - Field types and enumerations match the canonical schema
    /// - Content blocks carry a known `type` tag
    ///
    /// # Errors
    ///
    /// Returns one `SCHEMA_VALIDATION_ERROR` issue per violated field.
    fn validate_structure(
        &self,
        value: &Value,
        line: Option<usize>,
    ) -> Result<CanonicalMessage, Vec<ValidationIssue>>;

    /// Validates the domain rules of a structurally valid message.
    ///
    /// Checks:
    /// - Tool results live in user messages with a user role
    /// - Roles align with message types
    /// - Timestamps fall inside the plausible window
    /// - Tool blocks carry identifiers and content
    /// - Provider metadata does not duplicate the content
    fn validate_semantics(
        &self,
        message: &CanonicalMessage,
        line: Option<usize>,
    ) -> Vec<ValidationIssue>;

    /// Validates a raw value, short-circuiting on structural failure.
    fn validate(&self, value: &Value, line: Option<usize>) -> ValidationResult {
        match self.validate_structure(value, line) {
            Ok(message) => ValidationResult::from_issues(self.validate_semantics(&message, line)),
            Err(errors) => ValidationResult::rejected(errors),
        }
    }
}

/// Configuration for validation rules.
///
/// The defaults are the policy constants the rest of the platform relies
/// on; only override them for tenant-level tuning.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use sessioncheck::message::ports::validator::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.large_gap, TimeDelta::hours(1));
///
/// let relaxed = ValidationConfig::default().with_large_gap(TimeDelta::hours(8));
/// assert_eq!(relaxed.large_gap, TimeDelta::hours(8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// How far past "now" a timestamp may lie before it is flagged.
    pub future_tolerance: TimeDelta,
    /// How far before "now" a timestamp may lie before it is flagged.
    pub max_age: TimeDelta,
    /// Gap between consecutive messages above which a warning is raised.
    pub large_gap: TimeDelta,
    /// Number of leading content characters probed for in provider metadata.
    pub metadata_probe_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            future_tolerance: TimeDelta::hours(24),
            max_age: TimeDelta::days(5 * 365),
            large_gap: TimeDelta::hours(1),
            metadata_probe_chars: 50,
        }
    }
}

impl ValidationConfig {
    /// Sets the future tolerance.
    #[must_use]
    pub const fn with_future_tolerance(mut self, tolerance: TimeDelta) -> Self {
        self.future_tolerance = tolerance;
        self
    }

    /// Sets the maximum timestamp age.
    #[must_use]
    pub const fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = max_age;
        self
    }

    /// Sets the large-gap threshold.
    #[must_use]
    pub const fn with_large_gap(mut self, large_gap: TimeDelta) -> Self {
        self.large_gap = large_gap;
        self
    }

    /// Sets the metadata probe length.
    #[must_use]
    pub const fn with_metadata_probe_chars(mut self, chars: usize) -> Self {
        self.metadata_probe_chars = chars;
        self
    }
}
