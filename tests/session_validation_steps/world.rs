//! Shared world state for session validation BDD scenarios.

use chrono::{SecondsFormat, TimeDelta, Utc};
use rstest::fixture;
use serde_json::{Value, json};
use sessioncheck::session::{SessionValidationResult, SessionValidator};

/// Scenario world for session validation behaviour tests.
#[derive(Default)]
pub struct SessionWorld {
    /// The validator under test.
    pub validator: SessionValidator,
    /// Messages making up the session.
    pub messages: Vec<Value>,
    /// Report from the last validation.
    pub report: Option<SessionValidationResult>,
}

impl SessionWorld {
    /// Returns the report, failing the step if validation has not run.
    pub fn report(&self) -> Result<&SessionValidationResult, eyre::Report> {
        self.report
            .as_ref()
            .ok_or_else(|| eyre::eyre!("session has not been validated"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SessionWorld {
    SessionWorld::default()
}

/// Returns an RFC 3339 timestamp the given number of minutes before now.
pub fn minutes_ago(minutes: i64) -> String {
    (Utc::now() - TimeDelta::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds a canonical message with the given identity, time, and content.
pub fn message(uuid: &str, message_type: &str, timestamp: &str, content: Value) -> Value {
    json!({
        "uuid": uuid,
        "timestamp": timestamp,
        "type": message_type,
        "sessionId": "bdd-session",
        "provider": "claude-code",
        "message": { "role": message_type, "content": content },
    })
}
