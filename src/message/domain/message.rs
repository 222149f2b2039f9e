//! The canonical message: one provider-agnostic turn of a coding session.
//!
//! Provider converters emit this shape; validation consumes it read-only.

use super::ContentValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single message in canonical form.
///
/// # Invariants
///
/// - `uuid`, `session_id`, and `provider` are non-empty
/// - `timestamp` follows RFC 3339 with a `Z` or numeric offset
/// - `message.role` is non-empty
///
/// These hold for values produced by the schema validator; values built by
/// hand are checked by the semantic rules without assuming them.
///
/// # Serialisation
///
/// Field names use the camelCase wire form (`sessionId`, `gitBranch`, ...).
/// Keys outside the canonical schema are kept in [`CanonicalMessage::extra`]
/// so that messages round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMessage {
    /// Session-unique message identifier.
    pub uuid: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Message kind.
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Identifier of the owning session.
    pub session_id: String,
    /// Slug of the provider the message was converted from.
    pub provider: String,
    /// The message body.
    pub message: MessageBody,

    /// Working directory at the time of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    /// Checked-out git branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    /// Version of the producing tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Parent message in the thread.
    ///
    /// `Some(None)` is an explicit `null` on the wire, which thread roots
    /// carry; it is kept distinct from an absent key.
    #[serde(
        default,
        deserialize_with = "wire::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_uuid: Option<Option<String>>,
    /// Logical parent across compaction boundaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_parent_uuid: Option<String>,
    /// Whether the message belongs to a side conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sidechain: Option<bool>,
    /// Kind of user that produced the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Provider-specific extras.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_metadata: Option<Map<String, Value>>,
    /// Whether the message is injected bookkeeping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_meta: Option<bool>,
    /// Upstream API request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Structured tool output kept by some providers.
    ///
    /// An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "wire::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub tool_use_result: Option<Value>,
    /// Log level of system messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Subtype of system messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Top-level text of system messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Compaction bookkeeping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact_metadata: Option<Map<String, Value>>,
    /// Tool invocation a system message refers to.
    #[serde(
        default,
        rename = "toolUseID",
        skip_serializing_if = "Option::is_none"
    )]
    pub tool_use_id: Option<String>,

    /// Keys outside the canonical schema.
    ///
    /// **Warning:** Due to `#[serde(flatten)]`, any key not matching a known
    /// field is captured here, so an extension key that later becomes a
    /// canonical field changes meaning.
    ///
    /// Entries named like a canonical field (see [`CanonicalMessage::FIELDS`])
    /// are not serialised, so they can never shadow the typed value.
    #[serde(flatten, serialize_with = "wire::extra")]
    pub extra: Map<String, Value>,
}

impl CanonicalMessage {
    /// Every canonical top-level key as it appears on the wire.
    pub const FIELDS: [&'static str; 22] = [
        "uuid",
        "timestamp",
        "type",
        "sessionId",
        "provider",
        "message",
        "cwd",
        "gitBranch",
        "version",
        "parentUuid",
        "logicalParentUuid",
        "isSidechain",
        "userType",
        "providerMetadata",
        "isMeta",
        "requestId",
        "toolUseResult",
        "level",
        "subtype",
        "content",
        "compactMetadata",
        "toolUseID",
    ];

    /// Creates a message with the required fields and no optional context.
    ///
    /// # Examples
    ///
    /// ```
    /// use sessioncheck::message::domain::{CanonicalMessage, MessageBody, MessageType};
    ///
    /// let message = CanonicalMessage::new(
    ///     "m-1",
    ///     "2025-03-01T10:00:00.000Z",
    ///     MessageType::User,
    ///     "s-1",
    ///     "gemini",
    ///     MessageBody::new("user", "hello"),
    /// );
    /// assert_eq!(message.message.content.text(), "hello");
    /// ```
    #[must_use]
    pub fn new(
        uuid: impl Into<String>,
        timestamp: impl Into<String>,
        message_type: MessageType,
        session_id: impl Into<String>,
        provider: impl Into<String>,
        message: MessageBody,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            timestamp: timestamp.into(),
            message_type,
            session_id: session_id.into(),
            provider: provider.into(),
            message,
            cwd: None,
            git_branch: None,
            version: None,
            parent_uuid: None,
            logical_parent_uuid: None,
            is_sidechain: None,
            user_type: None,
            provider_metadata: None,
            is_meta: None,
            request_id: None,
            tool_use_result: None,
            level: None,
            subtype: None,
            content: None,
            compact_metadata: None,
            tool_use_id: None,
            extra: Map::new(),
        }
    }

    /// Sets the provider metadata.
    #[must_use]
    pub fn with_provider_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.provider_metadata = Some(metadata);
        self
    }

    /// Sets the parent message identifier.
    #[must_use]
    pub fn with_parent_uuid(mut self, parent_uuid: impl Into<String>) -> Self {
        self.parent_uuid = Some(Some(parent_uuid.into()));
        self
    }
}

/// Kind of canonical message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Input from the human or tool results fed back to the model.
    User,
    /// Output from the model.
    Assistant,
    /// Bookkeeping emitted by the tool itself.
    Meta,
}

impl MessageType {
    /// Every accepted wire value, in schema order.
    pub const VALUES: [&'static str; 3] = ["user", "assistant", "meta"];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Meta => "meta",
        }
    }
}

/// Role, content, and model accounting of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Free-form role reported by the provider.
    pub role: String,
    /// Message content.
    pub content: ContentValue,
    /// Model that produced the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Token accounting for the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl MessageBody {
    /// Creates a body without model or usage information.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<ContentValue>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            model: None,
            usage: None,
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens.
    #[serde(
        default,
        deserialize_with = "wire::token_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_tokens: Option<u64>,
    /// Completion tokens.
    #[serde(
        default,
        deserialize_with = "wire::token_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_tokens: Option<u64>,
    /// Tokens written to the prompt cache.
    #[serde(
        default,
        deserialize_with = "wire::token_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_creation_input_tokens: Option<u64>,
    /// Tokens served from the prompt cache.
    #[serde(
        default,
        deserialize_with = "wire::token_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_read_input_tokens: Option<u64>,
}

impl TokenUsage {
    /// Field names as they appear on the wire.
    pub const FIELDS: [&'static str; 4] = [
        "input_tokens",
        "output_tokens",
        "cache_creation_input_tokens",
        "cache_read_input_tokens",
    ];

    /// Reads a token count from a JSON number.
    ///
    /// JSON does not distinguish integers from floats, so whole-valued
    /// floats such as `12.0` are accepted alongside `12`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use sessioncheck::message::domain::TokenUsage;
    ///
    /// assert_eq!(TokenUsage::count_from_json(&json!(12)), Some(12));
    /// assert_eq!(TokenUsage::count_from_json(&json!(12.0)), Some(12));
    /// assert_eq!(TokenUsage::count_from_json(&json!(1.5)), None);
    /// assert_eq!(TokenUsage::count_from_json(&json!(-1)), None);
    /// ```
    #[must_use]
    pub fn count_from_json(value: &Value) -> Option<u64> {
        if let Some(count) = value.as_u64() {
            return Some(count);
        }
        let float = value.as_f64()?;
        if !(float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float < U64_LIMIT) {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is a non-negative whole number below 2^64"
        )]
        let count = float as u64;
        Some(count)
    }
}

/// 2^64, the first whole float a `u64` cannot hold.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Serde helpers for the canonical wire format.
mod wire {
    use super::{CanonicalMessage, TokenUsage};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use serde_json::{Map, Value};

    /// Wraps any present value, including `null`, in `Some`.
    pub(super) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        T::deserialize(deserializer).map(Some)
    }

    pub(super) fn token_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        TokenUsage::count_from_json(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid token count {value}")))
    }

    pub(super) fn extra<S>(extra: &Map<String, Value>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            extra
                .iter()
                .filter(|(key, _)| !CanonicalMessage::FIELDS.contains(&key.as_str())),
        )
    }
}
