//! Conversions between parsed document trees and the generic value model.

use super::{Mapping, Value};

impl From<serde_yaml::Value> for Value {
    fn from(node: serde_yaml::Value) -> Self {
        match node {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let mut fields = Mapping::new();
                // later entries win when distinct keys stringify alike
                for (key, value) in map {
                    fields.set(key_string(&key), Value::from(value));
                }
                Value::Mapping(fields)
            }
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

impl From<Value> for serde_yaml::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_yaml::Value::Null,
            Value::Bool(b) => serde_yaml::Value::Bool(b),
            Value::Int(i) => serde_yaml::Value::Number(i.into()),
            Value::Float(f) => serde_yaml::Value::Number(f.into()),
            Value::String(s) => serde_yaml::Value::String(s),
            Value::Sequence(seq) => {
                serde_yaml::Value::Sequence(seq.into_iter().map(serde_yaml::Value::from).collect())
            }
            Value::Mapping(map) => {
                let mut out = serde_yaml::Mapping::new();
                for (key, value) in map.fields {
                    out.insert(serde_yaml::Value::String(key), serde_yaml::Value::from(value));
                }
                serde_yaml::Value::Mapping(out)
            }
        }
    }
}

/// Renders a mapping key in the string form used by pointer segments and
/// path expressions. Non-string scalar keys keep their scalar rendering.
pub fn key_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Parses a YAML string into a Value.
pub fn from_yaml(yaml: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Serializes a Value to a YAML string.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

/// Parses a JSON string into a Value.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serializes a Value to a JSON string.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversion() {
        let value = from_yaml("42").unwrap();
        assert_eq!(value, Value::Int(42));

        let value = from_yaml("2.5").unwrap();
        assert_eq!(value, Value::Float(2.5));

        let value = from_yaml("true").unwrap();
        assert_eq!(value, Value::Bool(true));

        let value = from_yaml("hello").unwrap();
        assert_eq!(value, Value::String("hello".into()));

        let value = from_yaml("null").unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_mapping_conversion() {
        let value = from_yaml("name: nginx\nreplicas: 2\n").unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.get("name"), Some(&Value::String("nginx".into())));
        assert_eq!(map.get("replicas"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_non_string_keys_stringified() {
        let value = from_yaml("2: two\ntrue: yes\nnull: nothing\n").unwrap();
        let map = value.as_mapping().unwrap();
        assert!(map.has("2"));
        assert!(map.has("true"));
        assert!(map.has("null"));
    }

    #[test]
    fn test_tagged_nodes_unwrapped() {
        let value = from_yaml("port: !Port 80\n").unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.get("port"), Some(&Value::Int(80)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let value = from_yaml("name: test\nitems:\n- 1\n- 2\n").unwrap();
        let text = to_yaml(&value).unwrap();
        let back = from_yaml(&text).unwrap();
        assert_eq!(value, back);
    }

    #[test]
    fn test_json_input() {
        let value = from_json(r#"{"name": "test", "count": 3}"#).unwrap();
        let map = value.as_mapping().unwrap();
        assert_eq!(map.get("count"), Some(&Value::Int(3)));

        let text = to_json(&value).unwrap();
        let back = from_json(&text).unwrap();
        assert_eq!(value, back);
    }

    #[test]
    fn test_key_string_forms() {
        assert_eq!(key_string(&serde_yaml::Value::String("a".into())), "a");
        assert_eq!(key_string(&serde_yaml::Value::Number(7.into())), "7");
        assert_eq!(key_string(&serde_yaml::Value::Bool(false)), "false");
        assert_eq!(key_string(&serde_yaml::Value::Null), "null");
    }
}
