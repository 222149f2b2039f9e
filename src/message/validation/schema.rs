//! Structural validation of raw values against the canonical message schema.
//!
//! The walker visits every field the schema declares and records one
//! [`SchemaViolation`] per offending field, so callers see all structural
//! problems at once. Only values with no violations are materialised into a
//! [`CanonicalMessage`].

use crate::message::{
    domain::{CanonicalMessage, MessageType, TokenUsage, parse_timestamp},
    error::SchemaViolation,
};
use serde::Deserialize;
use serde_json::{Map, Value};

const BLOCK_TAGS: &str = "'text' | 'thinking' | 'tool_use' | 'tool_result'";
const MESSAGE_TYPES: &str = "'user', 'assistant', or 'meta'";

/// Shape accepted for an optional field.
#[derive(Debug, Clone, Copy)]
enum FieldShape {
    String,
    NullableString,
    Bool,
    Object,
    Any,
}

impl FieldShape {
    const fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => matches!(value, Value::String(_)),
            Self::NullableString => matches!(value, Value::String(_) | Value::Null),
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Object => matches!(value, Value::Object(_)),
            Self::Any => true,
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::NullableString => "string or null",
            Self::Bool => "boolean",
            Self::Object => "object",
            Self::Any => "any",
        }
    }
}

const OPTIONAL_MESSAGE_FIELDS: [(&str, FieldShape); 16] = [
    ("cwd", FieldShape::String),
    ("gitBranch", FieldShape::String),
    ("version", FieldShape::String),
    ("parentUuid", FieldShape::NullableString),
    ("logicalParentUuid", FieldShape::String),
    ("isSidechain", FieldShape::Bool),
    ("userType", FieldShape::String),
    ("providerMetadata", FieldShape::Object),
    ("isMeta", FieldShape::Bool),
    ("requestId", FieldShape::String),
    ("toolUseResult", FieldShape::Any),
    ("level", FieldShape::String),
    ("subtype", FieldShape::String),
    ("content", FieldShape::String),
    ("compactMetadata", FieldShape::Object),
    ("toolUseID", FieldShape::String),
];

/// Parses a raw value into a canonical message.
///
/// # Errors
///
/// Returns every structural violation found when the value does not match
/// the canonical schema.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sessioncheck::message::validation::schema::parse_canonical_message;
///
/// let violations = parse_canonical_message(&json!({ "uuid": "" }))
///     .expect_err("incomplete message");
/// assert!(violations.iter().any(|v| v.path() == "uuid"));
/// assert!(violations.iter().any(|v| v.path() == "message"));
/// ```
pub fn parse_canonical_message(value: &Value) -> Result<CanonicalMessage, Vec<SchemaViolation>> {
    let mut walker = SchemaWalker::default();
    walker.message(value);
    if !walker.violations.is_empty() {
        return Err(walker.violations);
    }

    CanonicalMessage::deserialize(value).map_err(|error| {
        vec![SchemaViolation::Construction {
            path: String::new(),
            reason: error.to_string(),
        }]
    })
}

/// Returns the JSON type name of a value as reported in violations.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[derive(Debug, Default)]
struct SchemaWalker {
    violations: Vec<SchemaViolation>,
}

impl SchemaWalker {
    fn message(&mut self, value: &Value) {
        let Some(fields) = self.object(value, "") else {
            return;
        };

        self.non_empty_string(fields, "", "uuid");
        self.timestamp(fields, "timestamp");
        self.message_type(fields);
        self.non_empty_string(fields, "", "sessionId");
        self.non_empty_string(fields, "", "provider");

        match fields.get("message") {
            Some(body) => self.body(body, "message"),
            None => self.violations.push(SchemaViolation::Missing {
                path: "message".to_owned(),
            }),
        }

        for (key, shape) in OPTIONAL_MESSAGE_FIELDS {
            self.optional(fields, "", key, shape);
        }
    }

    fn body(&mut self, value: &Value, path: &str) {
        let Some(fields) = self.object(value, path) else {
            return;
        };

        self.non_empty_string(fields, path, "role");

        let content_path = join(path, "content");
        match fields.get("content") {
            Some(content) => self.content(content, &content_path),
            None => self
                .violations
                .push(SchemaViolation::Missing { path: content_path }),
        }

        self.optional(fields, path, "model", FieldShape::String);
        if let Some(usage) = fields.get("usage") {
            self.usage(usage, &join(path, "usage"));
        }
    }

    fn content(&mut self, value: &Value, path: &str) {
        match value {
            Value::String(_) => {}
            Value::Array(blocks) => {
                for (index, block) in blocks.iter().enumerate() {
                    self.block(block, &join(path, &index.to_string()));
                }
            }
            other => self.violations.push(SchemaViolation::InvalidContent {
                path: path.to_owned(),
                received: json_type_name(other),
            }),
        }
    }

    fn block(&mut self, value: &Value, path: &str) {
        let Some(fields) = self.object(value, path) else {
            return;
        };

        match fields.get("type").and_then(Value::as_str) {
            Some("text") => self.non_empty_string(fields, path, "text"),
            Some("thinking") => {
                self.optional(fields, path, "thinking", FieldShape::String);
                self.optional(fields, path, "signature", FieldShape::String);
            }
            Some("tool_use") => {
                self.non_empty_string(fields, path, "id");
                self.non_empty_string(fields, path, "name");
                self.required_object(fields, path, "input");
            }
            Some("tool_result") => {
                self.non_empty_string(fields, path, "tool_use_id");
                self.non_empty_string(fields, path, "content");
                self.optional(fields, path, "is_error", FieldShape::Bool);
            }
            _ => self.violations.push(SchemaViolation::InvalidDiscriminator {
                path: join(path, "type"),
                allowed: BLOCK_TAGS.to_owned(),
            }),
        }
    }

    fn usage(&mut self, value: &Value, path: &str) {
        let Some(fields) = self.object(value, path) else {
            return;
        };

        for key in TokenUsage::FIELDS {
            if let Some(count) = fields.get(key)
                && TokenUsage::count_from_json(count).is_none()
            {
                self.violations.push(SchemaViolation::InvalidTokenCount {
                    path: join(path, key),
                    received: count.to_string(),
                });
            }
        }
    }

    fn timestamp(&mut self, fields: &Map<String, Value>, key: &str) {
        if let Some(raw) = self.required_string(fields, key, key)
            && parse_timestamp(raw).is_err()
        {
            self.violations.push(SchemaViolation::InvalidTimestamp {
                path: key.to_owned(),
            });
        }
    }

    fn message_type(&mut self, fields: &Map<String, Value>) {
        if let Some(raw) = self.required_string(fields, "type", "type")
            && !MessageType::VALUES.contains(&raw)
        {
            self.violations.push(SchemaViolation::InvalidEnum {
                path: "type".to_owned(),
                allowed: MESSAGE_TYPES.to_owned(),
                received: raw.to_owned(),
            });
        }
    }

    fn non_empty_string(&mut self, fields: &Map<String, Value>, prefix: &str, key: &str) {
        let path = join(prefix, key);
        if let Some(raw) = self.required_string(fields, key, &path)
            && raw.is_empty()
        {
            self.violations.push(SchemaViolation::EmptyString { path });
        }
    }

    fn required_string<'a>(
        &mut self,
        fields: &'a Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<&'a str> {
        match fields.get(key) {
            Some(Value::String(raw)) => Some(raw),
            Some(other) => {
                self.violations.push(SchemaViolation::WrongType {
                    path: path.to_owned(),
                    expected: "string",
                    received: json_type_name(other),
                });
                None
            }
            None => {
                self.violations.push(SchemaViolation::Missing {
                    path: path.to_owned(),
                });
                None
            }
        }
    }

    fn required_object(&mut self, fields: &Map<String, Value>, prefix: &str, key: &str) {
        let path = join(prefix, key);
        match fields.get(key) {
            Some(value) => {
                self.object(value, &path);
            }
            None => self.violations.push(SchemaViolation::Missing { path }),
        }
    }

    fn optional(
        &mut self,
        fields: &Map<String, Value>,
        prefix: &str,
        key: &str,
        shape: FieldShape,
    ) {
        if let Some(value) = fields.get(key)
            && !shape.accepts(value)
        {
            self.violations.push(SchemaViolation::WrongType {
                path: join(prefix, key),
                expected: shape.expected(),
                received: json_type_name(value),
            });
        }
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        if let Value::Object(fields) = value {
            Some(fields)
        } else {
            self.violations.push(SchemaViolation::WrongType {
                path: path.to_owned(),
                expected: "object",
                received: json_type_name(value),
            });
            None
        }
    }
}
