//! Unit tests for tool-chain analysis.

use super::session_fixtures::{tool_result, tool_use};
use crate::message::{
    domain::{IssueCode, Severity},
    tests::validation_fixtures::raw_message,
};
use crate::session::analyzers::{ToolUseIndex, ToolUseOrigin, check_tool_chain};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn result_after_invocation_is_paired() {
    let messages = vec![tool_use("m-1", "t1", "Read"), tool_result("m-2", "t1")];
    assert!(check_tool_chain(&messages).is_empty());
}

#[rstest]
fn result_before_invocation_is_paired() {
    let messages = vec![tool_result("m-1", "t1"), tool_use("m-2", "t1", "Read")];
    assert!(check_tool_chain(&messages).is_empty());
}

#[rstest]
fn unanswered_invocation_is_not_flagged() {
    let messages = vec![tool_use("m-1", "t1", "Bash"), tool_use("m-2", "t2", "Bash")];
    assert!(check_tool_chain(&messages).is_empty());
}

#[rstest]
fn orphan_result_is_an_error() {
    let messages = vec![
        raw_message("m-1", "user", json!("start")),
        tool_result("m-2", "orphan"),
    ];
    let issues = check_tool_chain(&messages);

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.code, IssueCode::OrphanToolResult);
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.path.as_deref(), Some("messages[1]"));
    assert_eq!(issue.line, Some(2));
    assert_eq!(
        issue.message,
        "tool_result references tool_use_id \"orphan\" which doesn't exist"
    );
    assert_eq!(
        issue.details,
        Some(json!({ "messageIndex": 1, "toolUseId": "orphan", "uuid": "m-2" }))
    );
}

#[rstest]
fn each_orphan_is_reported_once() {
    let messages = vec![
        raw_message(
            "m-1",
            "user",
            json!([
                { "type": "tool_result", "tool_use_id": "a", "content": "x" },
                { "type": "tool_result", "tool_use_id": "b", "content": "y" },
            ]),
        ),
        tool_use("m-2", "c", "Grep"),
    ];
    let orphans: Vec<_> = check_tool_chain(&messages)
        .into_iter()
        .filter(|issue| issue.code == IssueCode::OrphanToolResult)
        .collect();

    assert_eq!(orphans.len(), 2);
}

#[rstest]
fn repeated_result_is_a_warning_naming_the_tool() {
    let messages = vec![
        tool_use("m-1", "t1", "Write"),
        tool_result("m-2", "t1"),
        tool_result("m-3", "t1"),
    ];
    let issues = check_tool_chain(&messages);

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.code, IssueCode::DuplicateToolResult);
    assert_eq!(issue.severity, Severity::Warning);
    assert_eq!(issue.line, Some(3));
    assert_eq!(
        issue.details.as_ref().and_then(|details| details.get("toolName")),
        Some(&json!("Write"))
    );
}

#[rstest]
fn repeated_orphan_reports_both_codes() {
    let messages = vec![
        raw_message(
            "m-1",
            "user",
            json!([
                { "type": "tool_result", "tool_use_id": "ghost", "content": "x" },
                { "type": "tool_result", "tool_use_id": "ghost", "content": "y" },
            ]),
        ),
    ];
    let codes: Vec<_> = check_tool_chain(&messages)
        .iter()
        .map(|issue| issue.code)
        .collect();

    assert_eq!(
        codes,
        vec![
            IssueCode::OrphanToolResult,
            IssueCode::OrphanToolResult,
            IssueCode::DuplicateToolResult,
        ]
    );
}

#[rstest]
fn later_invocation_with_same_id_wins() {
    let messages = vec![
        tool_use("m-1", "t1", "Read"),
        tool_use("m-2", "t1", "Edit"),
    ];
    let index = ToolUseIndex::build(&messages);

    assert_eq!(index.len(), 1);
    assert_eq!(
        index.get("t1"),
        Some(&ToolUseOrigin {
            message_index: 1,
            name: "Edit"
        })
    );
    assert!(!index.contains("t2"));
}
