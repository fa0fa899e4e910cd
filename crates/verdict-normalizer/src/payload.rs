//! Classification of raw analysis payloads

use crate::error::NormalizerError;
use serde_json::{Map, Value};

/// Fields that identify the analysed resource
pub const RESOURCE_FIELDS: &[&str] = &["resource_name", "resource_id"];

/// Fields that carry a verdict in structured payloads
pub const STATUS_FIELDS: &[&str] = &["eligibility_status", "guardrail_status"];

/// Shape of a payload, decided once before extraction
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape<'a> {
    /// Direct fields at the top level
    Structured(&'a Map<String, Value>),
    /// Chat completion whose first message invokes a tool
    ToolCall {
        /// JSON-encoded arguments of the invocation
        arguments: &'a str,
        /// Sibling free-text content of the same message, if any
        content: Option<&'a str>,
    },
    /// Model prose, either a message's content or a bare string
    FreeText(&'a str),
    /// Anything else
    Unknown(&'a Value),
}

impl<'a> PayloadShape<'a> {
    /// Classify a payload
    pub fn classify(payload: &'a Value) -> Self {
        if let Some(map) = payload.as_object().filter(|map| is_structured(map)) {
            return PayloadShape::Structured(map);
        }

        let message = first_message(payload);
        let content = message.and_then(message_content);

        if let Some(arguments) = message.and_then(tool_arguments) {
            return PayloadShape::ToolCall { arguments, content };
        }
        if let Some(content) = content {
            return PayloadShape::FreeText(content);
        }
        if let Some(text) = payload.as_str() {
            return PayloadShape::FreeText(text);
        }
        PayloadShape::Unknown(payload)
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            PayloadShape::Structured(_) => "structured",
            PayloadShape::ToolCall { .. } => "tool_call",
            PayloadShape::FreeText(_) => "free_text",
            PayloadShape::Unknown(_) => "unknown",
        }
    }
}

/// Parse caller input into a payload value
///
/// Text that is not valid JSON is kept as a raw string payload.
pub fn parse_raw(input: &str) -> Value {
    serde_json::from_str(input.trim()).unwrap_or_else(|_| Value::String(input.to_string()))
}

/// Both a resource identifier and a recognized status field at the top level
pub fn is_structured(map: &Map<String, Value>) -> bool {
    RESOURCE_FIELDS.iter().any(|f| map.contains_key(*f))
        && STATUS_FIELDS.iter().any(|f| map.contains_key(*f))
}

/// Unwrap a `{ resource_id, analysis: ... }` response envelope
///
/// Returns the inner payload and the envelope's resource id. Payloads that
/// are already structured are returned untouched.
pub fn unwrap_envelope(payload: &Value) -> (&Value, Option<&str>) {
    let Some(map) = payload.as_object() else {
        return (payload, None);
    };
    if is_structured(map) {
        return (payload, None);
    }
    match map.get("analysis") {
        Some(inner) if !inner.is_null() => {
            let resource = RESOURCE_FIELDS
                .iter()
                .find_map(|f| map.get(*f).and_then(Value::as_str));
            (inner, resource)
        }
        _ => (payload, None),
    }
}

/// `choices[0].message`
fn first_message(payload: &Value) -> Option<&Map<String, Value>> {
    payload
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .as_object()
}

/// `tool_calls[0].function.arguments`, or the older `function_call.arguments`
fn tool_arguments(message: &Map<String, Value>) -> Option<&str> {
    let from_tool_calls = message
        .get("tool_calls")
        .and_then(Value::as_array)
        .and_then(|calls| calls.first())
        .and_then(|call| call.get("function"))
        .and_then(|function| function.get("arguments"))
        .and_then(Value::as_str);

    from_tool_calls.or_else(|| {
        message
            .get("function_call")
            .and_then(|call| call.get("arguments"))
            .and_then(Value::as_str)
    })
}

fn message_content(message: &Map<String, Value>) -> Option<&str> {
    message
        .get("content")
        .and_then(Value::as_str)
        .filter(|content| !content.trim().is_empty())
}

/// Parse tool-call arguments into an object
///
/// Models sometimes wrap the arguments in a markdown code block; the fence is
/// stripped before parsing.
pub fn parse_arguments(arguments: &str) -> Result<Map<String, Value>, NormalizerError> {
    let json_str = strip_code_fence(arguments)?;
    let value: Value = serde_json::from_str(&json_str)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(NormalizerError::InvalidFormat(format!(
            "Expected JSON object in tool arguments, found {}",
            json_type(&other)
        ))),
    }
}

/// Text the free-text strategy should read
///
/// Message content first, then a bare string, then the payload rendered as
/// JSON.
pub fn displayable_text(payload: &Value) -> Result<String, NormalizerError> {
    let text = match PayloadShape::classify(payload) {
        PayloadShape::ToolCall {
            content: Some(content),
            ..
        } => content.to_string(),
        PayloadShape::FreeText(text) => text.to_string(),
        _ if payload.is_null() => String::new(),
        _ => serde_json::to_string(payload)?,
    };

    if text.trim().is_empty() {
        return Err(NormalizerError::EmptyPayload);
    }
    Ok(text)
}

/// Extract JSON from a response, handling markdown code blocks
fn strip_code_fence(response: &str) -> Result<String, NormalizerError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(NormalizerError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
