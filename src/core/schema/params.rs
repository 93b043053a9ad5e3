//! core::schema::params
//!
//! Open parameter maps attached to processing steps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A string-keyed map of heterogeneous parameter values.
pub type Params = BTreeMap<String, ParamValue>;

/// One parameter value: a scalar or a nested map.
///
/// Lists and `null` are not representable; the validator rejects them
/// before deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Nested(Params),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Params> for ParamValue {
    fn from(value: Params) -> Self {
        ParamValue::Nested(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_keeps_integers_and_floats_apart() {
        let params: Params =
            serde_json::from_str(r#"{"a": 3, "b": 3.5, "c": "x", "d": {"e": true}}"#).unwrap();
        assert_eq!(params["a"], ParamValue::Integer(3));
        assert_eq!(params["b"], ParamValue::Number(3.5));
        assert_eq!(params["c"], ParamValue::Text("x".into()));

        let mut nested = Params::new();
        nested.insert("e".into(), true.into());
        assert_eq!(params["d"], ParamValue::Nested(nested));
    }

    #[test]
    fn serializes_back_to_plain_json() {
        let mut params = Params::new();
        params.insert("chunk".into(), 128i64.into());
        params.insert("method".into(), "stitch".into());
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"chunk": 128, "method": "stitch"})
        );
    }
}
