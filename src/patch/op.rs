//! Patch operation wire types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Value;

/// The kind of a patch operation.
///
/// The differ only emits `add`, `remove`, and `replace`. Anything else a
/// patch document carries is kept as [`OpKind::Other`] and skipped by the
/// applier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpKind {
    Add,
    Remove,
    Replace,
    Other(String),
}

impl OpKind {
    /// Returns the wire form of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            OpKind::Add => "add",
            OpKind::Remove => "remove",
            OpKind::Replace => "replace",
            OpKind::Other(other) => other,
        }
    }
}

impl From<&str> for OpKind {
    fn from(s: &str) -> Self {
        match s {
            "add" => OpKind::Add,
            "remove" => OpKind::Remove,
            "replace" => OpKind::Replace,
            other => OpKind::Other(other.to_string()),
        }
    }
}

impl From<String> for OpKind {
    fn from(s: String) -> Self {
        OpKind::from(s.as_str())
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for OpKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OpKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(OpKind::from(s))
    }
}

/// One entry of a patch: an operation kind, a target address, and the
/// value the operation carries.
///
/// The address is either a `pointer` or a `pathExpr`, never both. `remove`
/// operations carry no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: OpKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,

    #[serde(rename = "pathExpr", default, skip_serializing_if = "Option::is_none")]
    pub path_expr: Option<String>,

    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

/// An explicit `value: null` on the wire is a present null, not an
/// absent field.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl PatchOperation {
    /// Creates an `add` operation at a pointer address.
    pub fn add(pointer: impl Into<String>, value: Value) -> Self {
        PatchOperation {
            op: OpKind::Add,
            pointer: Some(pointer.into()),
            path_expr: None,
            value: Some(value),
        }
    }

    /// Creates a `remove` operation at a pointer address.
    pub fn remove(pointer: impl Into<String>) -> Self {
        PatchOperation {
            op: OpKind::Remove,
            pointer: Some(pointer.into()),
            path_expr: None,
            value: None,
        }
    }

    /// Creates a `replace` operation at a pointer address.
    pub fn replace(pointer: impl Into<String>, value: Value) -> Self {
        PatchOperation {
            op: OpKind::Replace,
            pointer: Some(pointer.into()),
            path_expr: None,
            value: Some(value),
        }
    }

    /// Creates a `replace` operation addressed by a path expression.
    pub fn replace_expr(path_expr: impl Into<String>, value: Value) -> Self {
        PatchOperation {
            op: OpKind::Replace,
            pointer: None,
            path_expr: Some(path_expr.into()),
            value: Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_kind_strings() {
        assert_eq!(OpKind::Add.as_str(), "add");
        assert_eq!(OpKind::Remove.as_str(), "remove");
        assert_eq!(OpKind::Replace.as_str(), "replace");
        assert_eq!(OpKind::from("replace"), OpKind::Replace);
        assert_eq!(OpKind::from("move"), OpKind::Other("move".into()));
        assert_eq!(OpKind::Other("move".into()).to_string(), "move");
    }

    #[test]
    fn test_operation_yaml_roundtrip() {
        let ops = vec![
            PatchOperation::replace("/spec/replicas", Value::Int(3)),
            PatchOperation::remove("/metadata"),
        ];
        let text = serde_yaml::to_string(&ops).unwrap();
        let back: Vec<PatchOperation> = serde_yaml::from_str(&text).unwrap();
        assert_eq!(ops, back);
    }

    #[test]
    fn test_operation_wire_field_names() {
        let op = PatchOperation::replace_expr("$..image", Value::String("nginx".into()));
        let text = serde_json::to_string(&op).unwrap();
        assert!(text.contains("\"pathExpr\""));
        assert!(!text.contains("\"pointer\""));
        assert!(!text.contains("path_expr"));
    }

    #[test]
    fn test_explicit_null_value_survives_the_wire() {
        let op = PatchOperation::add("/x", Value::Null);
        let text = serde_yaml::to_string(&op).unwrap();
        assert_eq!(text, "op: add\npointer: /x\nvalue: null\n");
        let back: PatchOperation = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back.value, Some(Value::Null));
        assert_eq!(back, op);
    }

    #[test]
    fn test_remove_serializes_without_value() {
        let text = serde_yaml::to_string(&PatchOperation::remove("/a")).unwrap();
        assert!(!text.contains("value"));
        assert!(!text.contains("pathExpr"));
    }

    #[test]
    fn test_unknown_op_kind_preserved() {
        let text = "op: test\npointer: /a\n";
        let op: PatchOperation = serde_yaml::from_str(text).unwrap();
        assert_eq!(op.op, OpKind::Other("test".into()));
        assert_eq!(serde_yaml::to_string(&op).unwrap(), text);
    }

    #[test]
    fn test_json_patch_file_parses() {
        let text = r#"[{"op": "add", "pointer": "/a", "value": 1}]"#;
        let ops: Vec<PatchOperation> = serde_yaml::from_str(text).unwrap();
        assert_eq!(ops, vec![PatchOperation::add("/a", Value::Int(1))]);
    }
}
