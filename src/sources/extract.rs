//! JSON field extraction helpers
//!
//! Paths are dot-separated object keys. Series are always read by array
//! position: the last element is the latest point.

use crate::error::CollectionError;
use serde_json::Value;

/// Follow a dot-separated key path
pub fn field<'a>(value: &'a Value, path: &str) -> Result<&'a Value, CollectionError> {
    if path.is_empty() {
        return Ok(value);
    }
    path.split('.').try_fold(value, |current, key| {
        current
            .get(key)
            .ok_or_else(|| CollectionError::MissingField(path.to_string()))
    })
}

/// Last element of the array at `path`
pub fn last<'a>(value: &'a Value, path: &str) -> Result<&'a Value, CollectionError> {
    let name = if path.is_empty() { "<root>" } else { path };
    field(value, path)?
        .as_array()
        .ok_or_else(|| CollectionError::MalformedField {
            field: name.to_string(),
            value: "not an array".to_string(),
        })?
        .last()
        .ok_or_else(|| CollectionError::EmptySeries(name.to_string()))
}

/// Interpret a JSON number or numeric string as f64
pub fn number(value: &Value, name: &str) -> Result<f64, CollectionError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| CollectionError::MalformedField {
            field: name.to_string(),
            value: value.to_string(),
        })
}

/// Read a numeric field from an object
pub fn number_at(value: &Value, path: &str) -> Result<f64, CollectionError> {
    number(field(value, path)?, path)
}

/// Strip the anti-XSSI prefix some Google endpoints put before JSON
pub fn strip_xssi(body: &str) -> &str {
    if !body.starts_with(")]}'") {
        return body;
    }
    match body.find(|c: char| c == '{' || c == '[') {
        Some(start) => &body[start..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_last_uses_position() {
        let data = json!({"chart": {"series": [
            {"x": 300, "y": 3.0},
            {"x": 100, "y": 1.0},
            {"x": 200, "y": 2.0}
        ]}});
        let latest = last(&data, "chart.series").unwrap();
        assert_eq!(number_at(latest, "y").unwrap(), 2.0);
    }

    #[test]
    fn test_last_on_root_array() {
        let data = json!([{"v": "1"}, {"v": "2.5"}]);
        let latest = last(&data, "").unwrap();
        assert_eq!(number_at(latest, "v").unwrap(), 2.5);
    }

    #[test]
    fn test_empty_series() {
        let data = json!({"chart": {"series": []}});
        assert!(matches!(
            last(&data, "chart.series"),
            Err(CollectionError::EmptySeries(_))
        ));
    }

    #[test]
    fn test_missing_field() {
        let data = json!({"chart": {}});
        assert!(matches!(
            field(&data, "chart.series"),
            Err(CollectionError::MissingField(_))
        ));
    }

    #[test]
    fn test_number_rejects_non_numeric() {
        assert!(number(&json!("abc"), "x").is_err());
        assert!(number(&json!(null), "x").is_err());
        assert!(number(&json!(true), "x").is_err());
        assert_eq!(number(&json!(" 0.0001 "), "x").unwrap(), 0.0001);
        assert_eq!(number(&json!(42), "x").unwrap(), 42.0);
    }

    #[test]
    fn test_strip_xssi() {
        assert_eq!(strip_xssi(")]}'\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi(")]}',\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_xssi("{\"a\":1}"), "{\"a\":1}");
    }
}
