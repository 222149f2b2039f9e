//! Validation service implementation.
//!
//! Provides the default implementation of the `MessageValidator` port,
//! combining the schema walker and the semantic rules into one validator.

use crate::message::{
    domain::{CanonicalMessage, IssueCode, ValidationIssue, ValidationResult},
    error::SchemaViolation,
    ports::validator::{MessageValidator, ValidationConfig},
    validation::{rules, schema},
};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use tracing::trace;

/// Default implementation of the message validator.
///
/// Structural validation collects every schema violation; semantic rules
/// then run in a fixed order: type/role consistency, timestamp window,
/// content blocks, metadata duplication. "Now" comes from the injected
/// clock.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sessioncheck::message::domain::IssueCode;
/// use sessioncheck::message::ports::validator::MessageValidator;
/// use sessioncheck::message::validation::service::DefaultMessageValidator;
///
/// let validator = DefaultMessageValidator::new();
/// let result = validator.validate(&json!({ "uuid": "m-1" }), Some(1));
///
/// assert!(!result.valid);
/// assert!(result.has_code(IssueCode::SchemaValidationError));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultMessageValidator<C = DefaultClock> {
    config: ValidationConfig,
    clock: C,
}

impl DefaultMessageValidator {
    /// Creates a new validator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Creates a new validator with custom configuration.
    #[must_use]
    pub const fn with_config(config: ValidationConfig) -> Self {
        Self {
            config,
            clock: DefaultClock,
        }
    }
}

impl Default for DefaultMessageValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DefaultMessageValidator<C> {
    /// Creates a validator reading "now" from the given clock.
    #[must_use]
    pub const fn with_clock(config: ValidationConfig, clock: C) -> Self {
        Self { config, clock }
    }
}

impl<C: Clock> MessageValidator for DefaultMessageValidator<C> {
    fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn validate_structure(
        &self,
        value: &Value,
        line: Option<usize>,
    ) -> Result<CanonicalMessage, Vec<ValidationIssue>> {
        schema::parse_canonical_message(value).map_err(|violations| {
            trace!(
                line,
                violations = violations.len(),
                "message failed schema validation"
            );
            violations
                .iter()
                .map(|violation| schema_issue(violation, line))
                .collect()
        })
    }

    fn validate_semantics(
        &self,
        message: &CanonicalMessage,
        line: Option<usize>,
    ) -> Vec<ValidationIssue> {
        let now = self.clock.utc();
        let mut issues = rules::validate_type_role_consistency(message, line);
        issues.extend(rules::validate_timestamp(message, line, &self.config, now));
        issues.extend(rules::validate_content_blocks(message, line));
        issues.extend(rules::validate_provider_metadata(
            message,
            line,
            &self.config,
        ));
        issues
    }
}

/// Validates one raw value with the default validator.
///
/// `line` is the 1-based position of the message within its session, if
/// known, and is copied onto every issue.
#[must_use]
pub fn validate_canonical_message(value: &Value, line: Option<usize>) -> ValidationResult {
    DefaultMessageValidator::new().validate(value, line)
}

fn schema_issue(violation: &SchemaViolation, line: Option<usize>) -> ValidationIssue {
    ValidationIssue::new(IssueCode::SchemaValidationError, violation.to_string())
        .with_path(violation.path())
        .with_line(line)
        .with_details(json!({ "kind": violation.kind() }))
}

// Note: Unit tests for DefaultMessageValidator are located in
// src/message/tests/validation_tests.rs with rstest fixtures.
