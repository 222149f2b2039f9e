//! Timestamp ordering across consecutive messages.

use super::{message_line, message_path};
use crate::message::{
    domain::{IssueCode, ValidationIssue, parse_timestamp},
    ports::validator::ValidationConfig,
};
use crate::session::entry::SessionEntry;
use chrono::TimeDelta;
use serde_json::json;

/// Checks consecutive message timestamps.
///
/// For each adjacent pair, a timestamp earlier than its predecessor's is an
/// `OUT_OF_ORDER_TIMESTAMP` warning and a forward gap above
/// [`ValidationConfig::large_gap`] is a `LARGE_TIME_GAP` warning. Pairs with
/// a missing or unparsable timestamp are skipped.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sessioncheck::message::domain::IssueCode;
/// use sessioncheck::message::ports::validator::ValidationConfig;
/// use sessioncheck::session::analyzers::check_timestamp_ordering;
///
/// let messages = vec![
///     json!({ "uuid": "a", "timestamp": "2025-03-01T10:00:00Z" }),
///     json!({ "uuid": "b", "timestamp": "2025-03-01T09:59:00Z" }),
/// ];
/// let issues = check_timestamp_ordering(&messages, &ValidationConfig::default());
///
/// assert_eq!(issues[0].code, IssueCode::OutOfOrderTimestamp);
/// ```
#[must_use]
pub fn check_timestamp_ordering<M: SessionEntry>(
    messages: &[M],
    config: &ValidationConfig,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (offset, pair) in messages.windows(2).enumerate() {
        let [previous, current] = pair else {
            continue;
        };
        let (Some(previous_raw), Some(current_raw)) = (previous.timestamp(), current.timestamp())
        else {
            continue;
        };
        let (Ok(previous_time), Ok(current_time)) =
            (parse_timestamp(previous_raw), parse_timestamp(current_raw))
        else {
            continue;
        };

        let index = offset.saturating_add(1);
        let gap = current_time.signed_duration_since(previous_time);

        if gap < TimeDelta::zero() {
            issues.push(
                ValidationIssue::new(
                    IssueCode::OutOfOrderTimestamp,
                    "Message timestamp is earlier than previous message",
                )
                .with_path(message_path(index))
                .with_line(message_line(index))
                .with_details(json!({
                    "messageIndex": index,
                    "timestamp": current_raw,
                    "previousTimestamp": previous_raw,
                    "uuid": current.uuid(),
                })),
            );
        }

        if gap > config.large_gap {
            let minutes = rounded_minutes(gap);
            issues.push(
                ValidationIssue::new(
                    IssueCode::LargeTimeGap,
                    format!("Large time gap ({minutes} minutes) between messages"),
                )
                .with_path(message_path(index))
                .with_line(message_line(index))
                .with_details(json!({
                    "messageIndex": index,
                    "gapMs": gap.num_milliseconds(),
                    "gapMinutes": minutes,
                    "uuid": current.uuid(),
                })),
            );
        }
    }

    issues
}

/// Rounds a positive gap to the nearest whole minute, halves up.
const fn rounded_minutes(gap: TimeDelta) -> i64 {
    match gap.checked_add(&TimeDelta::seconds(30)) {
        Some(rounded) => rounded.num_minutes(),
        None => gap.num_minutes(),
    }
}
