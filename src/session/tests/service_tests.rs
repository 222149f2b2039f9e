//! Unit tests for the session validation service.

use super::session_fixtures::{
    TestSessionValidator, message_at, session_validator, text_at, tool_result, tool_use,
};
use crate::message::{
    domain::{CanonicalMessage, IssueCode, MessageBody, MessageType, ValidationIssue},
    tests::validation_fixtures::{raw_message, set_field},
};
use crate::session::{SessionValidationResult, validate_session};
use rstest::rstest;
use serde_json::{Value, json};

fn codes(issues: &[ValidationIssue]) -> Vec<IssueCode> {
    issues.iter().map(|issue| issue.code).collect()
}

// ============================================================================
// Report shape
// ============================================================================

#[rstest]
fn empty_session_is_trivially_valid(session_validator: TestSessionValidator) {
    let report = session_validator.validate::<Value>(&[]);

    assert_eq!(report, SessionValidationResult::empty());
    assert!(report.valid);
    assert_eq!(report.message_count, 0);
    assert_eq!(report.valid_count, 0);
    assert_eq!(
        serde_json::to_value(&report).expect("serialise"),
        json!({
            "valid": true,
            "errors": [],
            "warnings": [],
            "messageCount": 0,
            "validCount": 0,
            "sessionId": "",
            "provider": "",
            "toolChainIssues": [],
        })
    );
}

#[rstest]
fn session_metadata_comes_from_boundary_messages(session_validator: TestSessionValidator) {
    let messages = vec![
        text_at("m-1", "2025-06-01T10:00:00.000Z"),
        text_at("m-2", "2025-06-01T10:20:00.000Z"),
        text_at("m-3", "2025-06-01T10:45:30.500Z"),
    ];
    let report = session_validator.validate(&messages);

    assert!(report.valid);
    assert_eq!(report.message_count, 3);
    assert_eq!(report.valid_count, 3);
    assert_eq!(report.session_id, "session-1");
    assert_eq!(report.provider, "claude-code");
    assert_eq!(report.start_time.as_deref(), Some("2025-06-01T10:00:00.000Z"));
    assert_eq!(report.end_time.as_deref(), Some("2025-06-01T10:45:30.500Z"));
    assert_eq!(report.duration_ms, Some(2_730_500));
    assert_eq!(
        serde_json::to_value(&report).expect("serialise").get("duration"),
        Some(&json!(2_730_500))
    );
}

#[rstest]
fn duration_is_omitted_when_a_boundary_is_unparsable(session_validator: TestSessionValidator) {
    let messages = vec![
        text_at("m-1", "2025-06-01T10:00:00Z"),
        text_at("m-2", "not a time"),
    ];
    let report = session_validator.validate(&messages);

    assert_eq!(report.end_time.as_deref(), Some("not a time"));
    assert_eq!(report.duration_ms, None);
    assert!(
        serde_json::to_value(&report)
            .expect("serialise")
            .get("duration")
            .is_none()
    );
}

// ============================================================================
// Per-message validation
// ============================================================================

#[rstest]
fn assistant_tool_result_invalidates_the_session(session_validator: TestSessionValidator) {
    let messages = vec![
        tool_use("m-1", "t1", "Read"),
        set_field(tool_result("m-2", "t1"), &["type"], json!("assistant")),
    ];
    let report = session_validator.validate(&messages);

    assert!(!report.valid);
    assert_eq!(report.valid_count, 1);
    assert!(report.has_code(IssueCode::InvalidToolResultMessageType));
    assert!(
        report
            .issues_with_code(IssueCode::InvalidToolResultMessageType)
            .all(|issue| issue.line == Some(2))
    );
}

#[rstest]
fn malformed_entries_are_reported_not_fatal(session_validator: TestSessionValidator) {
    let messages = vec![
        json!(null),
        json!({ "uuid": "m-2" }),
        text_at("m-3", "2025-06-01T10:00:00Z"),
    ];
    let report = session_validator.validate(&messages);

    assert!(!report.valid);
    assert_eq!(report.message_count, 3);
    assert_eq!(report.valid_count, 1);
    assert_eq!(report.session_id, "");
    assert!(
        report
            .errors
            .iter()
            .all(|issue| issue.code == IssueCode::SchemaValidationError)
    );
    assert!(report.errors.iter().any(|issue| issue.line == Some(1)));
    assert!(report.errors.iter().any(|issue| issue.line == Some(2)));
}

#[rstest]
fn old_timestamp_is_only_a_warning(session_validator: TestSessionValidator) {
    let report = session_validator.validate(&[text_at("m-1", "2015-06-01T12:00:00Z")]);

    assert!(report.valid);
    assert_eq!(codes(&report.warnings), vec![IssueCode::OldTimestamp]);
}

// ============================================================================
// Session-wide analysis
// ============================================================================

#[rstest]
fn paired_tool_chain_is_clean(session_validator: TestSessionValidator) {
    let messages = vec![tool_use("m-1", "t1", "Bash"), tool_result("m-2", "t1")];
    let report = session_validator.validate(&messages);

    assert!(report.valid);
    assert!(report.tool_chain_issues.is_empty());
    assert!(report.warnings.is_empty());
}

#[rstest]
fn orphan_result_is_kept_in_both_lists(session_validator: TestSessionValidator) {
    let report = session_validator.validate(&[tool_result("m-1", "orphan")]);

    assert!(!report.valid);
    assert_eq!(report.valid_count, 1);
    assert_eq!(codes(&report.errors), vec![IssueCode::OrphanToolResult]);
    assert_eq!(report.tool_chain_issues, report.errors);
}

#[rstest]
fn reused_uuid_is_one_error(session_validator: TestSessionValidator) {
    let messages = vec![
        text_at("a", "2025-06-01T10:00:00Z"),
        text_at("a", "2025-06-01T10:01:00Z"),
    ];
    let report = session_validator.validate(&messages);

    assert!(!report.valid);
    assert_eq!(report.valid_count, 2);
    let duplicates: Vec<_> = report.issues_with_code(IssueCode::DuplicateUuid).collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(
        duplicates[0].details.as_ref().and_then(|d| d.get("messageIndices")),
        Some(&json!([0, 1]))
    );
}

#[rstest]
fn out_of_order_timestamps_keep_the_session_valid(session_validator: TestSessionValidator) {
    let messages = vec![
        text_at("m-1", "2025-06-01T10:05:00Z"),
        text_at("m-2", "2025-06-01T10:00:00Z"),
    ];
    let report = session_validator.validate(&messages);

    assert!(report.valid);
    assert_eq!(codes(&report.warnings), vec![IssueCode::OutOfOrderTimestamp]);
}

#[rstest]
fn issues_are_merged_in_analyzer_order(session_validator: TestSessionValidator) {
    let messages = vec![
        set_field(
            raw_message("dup", "user", json!("hi")),
            &["message", "role"],
            json!("human"),
        ),
        message_at(
            "dup",
            "user",
            "2025-06-01T09:00:00Z",
            json!([
                { "type": "tool_result", "tool_use_id": "x", "content": "a" },
                { "type": "tool_result", "tool_use_id": "x", "content": "b" },
            ]),
        ),
        text_at("m-3", "2025-06-01T10:30:00Z"),
    ];
    let report = session_validator.validate(&messages);

    assert_eq!(
        codes(&report.errors),
        vec![
            IssueCode::DuplicateUuid,
            IssueCode::OrphanToolResult,
            IssueCode::OrphanToolResult,
        ]
    );
    assert_eq!(
        codes(&report.warnings),
        vec![
            IssueCode::MisalignedUserRole,
            IssueCode::DuplicateToolResult,
            IssueCode::OutOfOrderTimestamp,
            IssueCode::LargeTimeGap,
        ]
    );
    assert_eq!(
        codes(&report.tool_chain_issues),
        vec![
            IssueCode::OrphanToolResult,
            IssueCode::OrphanToolResult,
            IssueCode::DuplicateToolResult,
        ]
    );
}

#[rstest]
fn typed_messages_validate_like_raw_ones(session_validator: TestSessionValidator) {
    let typed = vec![
        CanonicalMessage::new(
            "m-1",
            "2025-06-01T10:00:00.000Z",
            MessageType::User,
            "session-1",
            "claude-code",
            MessageBody::new("user", "hello"),
        ),
        CanonicalMessage::new(
            "m-1",
            "2025-06-01T10:00:10.000Z",
            MessageType::Assistant,
            "session-1",
            "claude-code",
            MessageBody::new("assistant", "hi"),
        ),
    ];
    let raw: Vec<Value> = typed
        .iter()
        .map(|message| serde_json::to_value(message).expect("serialise"))
        .collect();

    assert_eq!(session_validator.validate(&typed), session_validator.validate(&raw));
}

#[rstest]
fn repeated_validation_is_byte_identical(session_validator: TestSessionValidator) {
    let messages = vec![
        tool_result("m-1", "orphan"),
        text_at("m-1", "2025-06-01T08:00:00Z"),
    ];
    let first = serde_json::to_string(&session_validator.validate(&messages)).expect("serialise");
    let second = serde_json::to_string(&session_validator.validate(&messages)).expect("serialise");

    assert_eq!(first, second);
}

#[rstest]
fn convenience_function_validates_with_defaults() {
    let report = validate_session(&[tool_result("m-1", "t1"), tool_use("m-2", "t1", "Read")]);

    assert!(report.tool_chain_issues.is_empty());
    assert_eq!(report.message_count, 2);
}
