//! Response envelope decoding and per-field normalization
//!
//! The service bundles every stage into one JSON object. `tokens`, `ast` and
//! `bytecode` may arrive either as native JSON structures or as strings holding
//! JSON text; [`normalize_tokens`], [`normalize_tree`] and [`normalize_bytecode`]
//! resolve each field independently into one canonical shape. A missing field
//! stays `None` and is never turned into an empty collection.

use super::errors::{ClientError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A lexical token as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: String,
    pub lexeme: String,
    /// 1-based
    pub line: u32,
    /// 1-based
    pub column: u32,
}

/// One decoded bytecode entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub address: u32,
    pub opcode: String,
    /// `Some` whenever the key was present, including an explicit `null`
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub operand: Option<Value>,
}

/// Normalized compile report.
///
/// Each optional field is `Some` only if the matching stage ran on the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompileResult {
    pub success: bool,
    pub error: Option<String>,
    pub tokens: Option<Vec<Token>>,
    pub ast: Option<Value>,
    pub semantic: Option<String>,
    pub optimization: Option<String>,
    pub bytecode: Option<Vec<Instruction>>,
    pub output: Option<String>,
}

impl CompileResult {
    /// Decode and normalize a response body
    pub fn from_body(body: &str) -> Result<Self> {
        let raw: RawEnvelope = serde_json::from_str(body)?;

        Ok(CompileResult {
            success: raw.success,
            error: raw.error,
            tokens: normalize_tokens(raw.tokens)?,
            ast: normalize_tree(raw.ast)?,
            semantic: raw.semantic,
            optimization: raw.optimization,
            bytecode: normalize_bytecode(raw.bytecode)?,
            output: raw.output,
        })
    }
}

/// The envelope as it comes off the wire, before normalization
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    success: bool,
    error: Option<String>,
    tokens: Option<Value>,
    ast: Option<Value>,
    semantic: Option<String>,
    optimization: Option<String>,
    bytecode: Option<Value>,
    output: Option<String>,
}

/// How a dual-shape field actually arrived
#[derive(Debug, PartialEq)]
enum FieldShape {
    Absent,
    Structured(Value),
    Encoded(String),
}

impl FieldShape {
    fn of(raw: Option<Value>, field: &str) -> Result<Self> {
        match raw {
            None | Some(Value::Null) => Ok(FieldShape::Absent),
            // An empty payload means the stage produced nothing
            Some(Value::String(text)) if text.is_empty() => Ok(FieldShape::Absent),
            Some(Value::String(text)) => Ok(FieldShape::Encoded(text)),
            Some(value @ (Value::Array(_) | Value::Object(_))) => {
                Ok(FieldShape::Structured(value))
            }
            Some(other) => Err(ClientError::Protocol(format!(
                "field `{}` must be an array, an object or JSON text, got {}",
                field,
                json_kind(&other)
            ))),
        }
    }

    fn resolve(self, field: &str) -> Result<Option<Value>> {
        match self {
            FieldShape::Absent => Ok(None),
            FieldShape::Structured(value) => Ok(Some(value)),
            FieldShape::Encoded(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| ClientError::Protocol(format!("field `{}`: {}", field, e))),
        }
    }
}

fn decode_field(raw: Option<Value>, field: &str) -> Result<Option<Value>> {
    FieldShape::of(raw, field)?.resolve(field)
}

fn typed_field<T: serde::de::DeserializeOwned>(
    raw: Option<Value>,
    field: &str,
) -> Result<Option<T>> {
    decode_field(raw, field)?
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|e| ClientError::Protocol(format!("field `{}`: {}", field, e)))
        })
        .transpose()
}

/// Resolve the `tokens` field into a token list
pub fn normalize_tokens(raw: Option<Value>) -> Result<Option<Vec<Token>>> {
    typed_field(raw, "tokens")
}

/// Resolve the `ast` field; the tree itself stays opaque
pub fn normalize_tree(raw: Option<Value>) -> Result<Option<Value>> {
    decode_field(raw, "ast")
}

/// Resolve the `bytecode` field into an instruction list
pub fn normalize_bytecode(raw: Option<Value>) -> Result<Option<Vec<Instruction>>> {
    typed_field(raw, "bytecode")
}

fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_and_encoded_tokens_agree() {
        let native = json!([{"type": "NUMBER", "lexeme": "42", "line": 1, "column": 7}]);
        let encoded = Value::String(native.to_string());

        let a = normalize_tokens(Some(native)).unwrap();
        let b = normalize_tokens(Some(encoded)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.unwrap()[0].kind, "NUMBER");
    }

    #[test]
    fn test_absent_field_stays_absent() {
        assert_eq!(normalize_tokens(None).unwrap(), None);
        assert_eq!(normalize_tree(Some(Value::Null)).unwrap(), None);
        assert_eq!(normalize_bytecode(Some(json!(""))).unwrap(), None);
    }

    #[test]
    fn test_blank_json_text_is_protocol_error() {
        let err = normalize_tokens(Some(json!("   "))).unwrap_err();
        assert!(matches!(err, ClientError::Protocol(ref m) if m.contains("tokens")));
        assert!(normalize_tree(Some(json!("\n"))).is_err());
    }

    #[test]
    fn test_empty_array_is_not_absent() {
        assert_eq!(normalize_tokens(Some(json!([]))).unwrap(), Some(vec![]));
        assert_eq!(normalize_bytecode(Some(json!("[]"))).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_scalar_field_is_protocol_error() {
        let err = normalize_tree(Some(json!(17))).unwrap_err();
        assert!(matches!(err, ClientError::Protocol(ref m) if m.contains("ast")));
    }

    #[test]
    fn test_bad_json_text_is_protocol_error() {
        let err = normalize_bytecode(Some(json!("[{\"address\": 0,"))).unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)));
    }

    #[test]
    fn test_operand_presence() {
        let bytecode = normalize_bytecode(Some(json!([
            {"address": 0, "opcode": "PUSH", "operand": 0},
            {"address": 1, "opcode": "PUSH", "operand": null},
            {"address": 2, "opcode": "HALT"}
        ])))
        .unwrap()
        .unwrap();

        assert_eq!(bytecode[0].operand, Some(json!(0)));
        assert_eq!(bytecode[1].operand, Some(Value::Null));
        assert_eq!(bytecode[2].operand, None);
    }

    #[test]
    fn test_envelope_requires_success() {
        let err = CompileResult::from_body(r#"{"output": "42"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)));
    }

    #[test]
    fn test_envelope_ignores_unknown_fields() {
        let result =
            CompileResult::from_body(r#"{"success": true, "bytecodeText": "x", "output": "42"}"#)
                .unwrap();
        assert!(result.success);
        assert_eq!(result.output.as_deref(), Some("42"));
        assert_eq!(result.tokens, None);
        assert_eq!(result.semantic, None);
    }

    #[test]
    fn test_tree_keeps_key_order() {
        let tree = normalize_tree(Some(json!("{\"type\": \"Program\", \"body\": []}")))
            .unwrap()
            .unwrap();
        let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["type", "body"]);
    }
}
