//! Session validation service.
//!
//! Runs per-message validation over each entry, then the session-wide
//! analyzers, and folds everything into one [`SessionValidationResult`].

use crate::message::{
    domain::parse_timestamp,
    ports::validator::MessageValidator,
    validation::service::DefaultMessageValidator,
};
use crate::session::{
    analyzers::{check_timestamp_ordering, check_tool_chain, check_uuid_uniqueness},
    entry::SessionEntry,
    result::SessionValidationResult,
};
use tracing::{debug, debug_span};

/// Validates whole sessions with a pluggable per-message validator.
///
/// Session-wide analyzers run in a fixed order (uuid uniqueness, tool
/// chain, timestamp ordering) and use the message validator's
/// configuration for their thresholds.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sessioncheck::message::domain::IssueCode;
/// use sessioncheck::session::service::SessionValidator;
///
/// let message = |uuid: &str| json!({
///     "uuid": uuid,
///     "timestamp": "2025-03-01T10:00:00.000Z",
///     "type": "user",
///     "sessionId": "s-1",
///     "provider": "opencode",
///     "message": { "role": "user", "content": "hi" }
/// });
///
/// let report = SessionValidator::new().validate(&[message("a"), message("a")]);
/// assert!(!report.valid);
/// assert_eq!(report.valid_count, 2);
/// assert!(report.has_code(IssueCode::DuplicateUuid));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionValidator<V = DefaultMessageValidator> {
    validator: V,
}

impl SessionValidator {
    /// Creates a session validator backed by the default message validator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_validator(DefaultMessageValidator::new())
    }
}

impl<V: MessageValidator> SessionValidator<V> {
    /// Creates a session validator backed by the given message validator.
    #[must_use]
    pub const fn with_validator(validator: V) -> Self {
        Self { validator }
    }

    /// Validates the ordered entries of one session.
    ///
    /// Line numbers on per-message issues are the 1-based position of the
    /// entry. Never panics; malformed entries are reported as issues.
    #[must_use]
    pub fn validate<M: SessionEntry>(&self, messages: &[M]) -> SessionValidationResult {
        let (Some(first), Some(last)) = (messages.first(), messages.last()) else {
            return SessionValidationResult::empty();
        };

        let span = debug_span!(
            "validate_session",
            session_id = first.session_id().unwrap_or_default(),
            messages = messages.len()
        );
        let _entered = span.enter();

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut valid_count = 0_usize;

        for (index, message) in messages.iter().enumerate() {
            let line = Some(index.saturating_add(1));
            let result = self.validator.validate(&message.to_raw(), line);
            if result.valid {
                valid_count = valid_count.saturating_add(1);
            } else {
                debug!(line, errors = result.errors.len(), "message rejected");
            }
            errors.extend(result.errors);
            warnings.extend(result.warnings);
        }

        let uuid_issues = check_uuid_uniqueness(messages);
        let tool_chain_issues = check_tool_chain(messages);
        let ordering_issues = check_timestamp_ordering(messages, self.validator.config());

        for issue in uuid_issues
            .into_iter()
            .chain(tool_chain_issues.iter().cloned())
            .chain(ordering_issues)
        {
            if issue.is_error() {
                errors.push(issue);
            } else {
                warnings.push(issue);
            }
        }

        let start_time = first.timestamp();
        let end_time = last.timestamp();
        let report = SessionValidationResult {
            valid: errors.is_empty(),
            message_count: messages.len(),
            valid_count,
            session_id: first.session_id().unwrap_or_default().to_owned(),
            provider: first.provider().unwrap_or_default().to_owned(),
            start_time: start_time.map(ToOwned::to_owned),
            end_time: end_time.map(ToOwned::to_owned),
            duration_ms: duration_ms(start_time, end_time),
            errors,
            warnings,
            tool_chain_issues,
        };

        debug!(
            valid = report.valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            valid_count = report.valid_count,
            "session validated"
        );
        report
    }
}

/// Validates one session with the default validators.
///
/// # Examples
///
/// ```
/// use sessioncheck::session::validate_session;
///
/// let report = validate_session::<serde_json::Value>(&[]);
/// assert!(report.valid);
/// assert_eq!(report.message_count, 0);
/// assert!(report.session_id.is_empty());
/// ```
#[must_use]
pub fn validate_session<M: SessionEntry>(messages: &[M]) -> SessionValidationResult {
    SessionValidator::new().validate(messages)
}

fn duration_ms(start: Option<&str>, end: Option<&str>) -> Option<i64> {
    let start_time = parse_timestamp(start?).ok()?;
    let end_time = parse_timestamp(end?).ok()?;
    Some(end_time.signed_duration_since(start_time).num_milliseconds())
}

