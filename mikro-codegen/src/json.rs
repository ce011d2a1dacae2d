//! TOML to JSON conversion for values emitted into generated code.

use serde_json::{Map, Number, Value};

/// Convert a TOML value into a JSON value, keeping table key order.
pub(crate) fn to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(Number::from(*i)),
        toml::Value::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(to_json).collect()),
        toml::Value::Table(table) => table_to_json(table),
    }
}

pub(crate) fn table_to_json(table: &toml::Table) -> Value {
    let map: Map<String, Value> = table
        .iter()
        .map(|(key, value)| (key.clone(), to_json(value)))
        .collect();
    Value::Object(map)
}

/// Pretty JSON with two-space indentation.
pub(crate) fn pretty(value: &Value) -> String {
    format!("{:#}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_order() {
        let table: toml::Table = toml::from_str("as = \"comments\"\nforeignKey = \"post_id\"").unwrap();
        assert_eq!(
            pretty(&table_to_json(&table)),
            "{\n  \"as\": \"comments\",\n  \"foreignKey\": \"post_id\"\n}"
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(pretty(&table_to_json(&toml::Table::new())), "{}");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_json(&toml::Value::Integer(3)), Value::from(3));
        assert_eq!(to_json(&toml::Value::Boolean(false)), Value::Bool(false));
        assert_eq!(to_json(&toml::Value::Float(f64::NAN)), Value::Null);
    }
}
