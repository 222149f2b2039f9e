//! Message identifier uniqueness.

use crate::message::domain::{IssueCode, ValidationIssue};
use crate::session::entry::SessionEntry;
use serde_json::json;
use std::collections::HashMap;

/// Checks that no uuid is shared by several messages.
///
/// Emits one `DUPLICATE_UUID` error per shared uuid, citing every index
/// that carries it. Issues are ordered by the first occurrence of each
/// uuid. Entries without a readable uuid are skipped.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sessioncheck::session::analyzers::check_uuid_uniqueness;
///
/// let messages = vec![json!({ "uuid": "a" }), json!({ "uuid": "b" }), json!({ "uuid": "a" })];
/// let issues = check_uuid_uniqueness(&messages);
///
/// assert_eq!(issues.len(), 1);
/// assert_eq!(issues[0].message, "UUID \"a\" appears in 2 messages (indices: 0, 2)");
/// ```
#[must_use]
pub fn check_uuid_uniqueness<M: SessionEntry>(messages: &[M]) -> Vec<ValidationIssue> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::new();

    for (index, uuid) in messages
        .iter()
        .enumerate()
        .filter_map(|(index, message)| message.uuid().map(|uuid| (index, uuid)))
    {
        occurrences
            .entry(uuid)
            .or_insert_with(|| {
                first_seen.push(uuid);
                Vec::new()
            })
            .push(index);
    }

    first_seen
        .into_iter()
        .filter_map(|uuid| {
            let indices = occurrences.get(uuid)?;
            (indices.len() > 1).then(|| duplicate_issue(uuid, indices))
        })
        .collect()
}

fn duplicate_issue(uuid: &str, indices: &[usize]) -> ValidationIssue {
    let listed = indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    ValidationIssue::new(
        IssueCode::DuplicateUuid,
        format!(
            "UUID \"{uuid}\" appears in {} messages (indices: {listed})",
            indices.len()
        ),
    )
    .with_path("uuid")
    .with_details(json!({
        "uuid": uuid,
        "messageIndices": indices,
        "count": indices.len(),
    }))
}
