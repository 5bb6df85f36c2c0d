use serde_json::Value;

/// Keys under which a wrapped row set may arrive
const WRAPPER_KEYS: &[&str] = &["data", "items", "rows", "result"];

/// Longest upstream body excerpt surfaced to callers, in characters
pub const EXCERPT_LIMIT: usize = 512;

/// Total from a `Content-Range` header such as `0-24/137` or `*/0`.
///
/// Anything unparseable, including an unknown total (`0-24/*`), yields `None`.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().split_once('/')?;
    total.trim().parse::<u64>().ok()
}

/// Normalize a PostgREST body into a row sequence
pub fn normalize_rows(body: &str) -> Result<Vec<Value>, String> {
    let value: Value = serde_json::from_str(body).map_err(|e| format!("invalid JSON from Supabase: {}", e))?;
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut obj) => {
            for key in WRAPPER_KEYS {
                if matches!(obj.get(*key), Some(Value::Array(_))) {
                    if let Some(Value::Array(rows)) = obj.remove(*key) {
                        return Ok(rows);
                    }
                }
            }
            Ok(vec![Value::Object(obj)])
        }
        other => Err(format!("unexpected {} payload from Supabase", kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Bounded, credential-free excerpt of an upstream body
pub fn excerpt(body: &str, secret: Option<&str>) -> String {
    let redacted = match secret.filter(|s| !s.is_empty()) {
        Some(secret) => body.replace(secret, "***"),
        None => body.to_string(),
    };
    let trimmed = redacted.trim();
    match trimmed.char_indices().nth(EXCERPT_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/137"), Some(137));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total(" 0-0/1 "), Some(1));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("0-24"), None);
        assert_eq!(parse_content_range_total("garbage/abc"), None);
        assert_eq!(parse_content_range_total(""), None);
    }

    #[test]
    fn test_array_rows_keep_order() {
        let rows = normalize_rows(r#"[{"id":2},{"id":1},{"id":3}]"#).unwrap();
        assert_eq!(rows, vec![json!({"id":2}), json!({"id":1}), json!({"id":3})]);
    }

    #[test]
    fn test_bare_object_becomes_single_row() {
        let rows = normalize_rows(r#"{"id":7,"name":"Elm"}"#).unwrap();
        assert_eq!(rows, vec![json!({"id":7,"name":"Elm"})]);
    }

    #[test]
    fn test_wrapped_rows_are_unwrapped() {
        let rows = normalize_rows(r#"{"data":[{"id":1}],"count":1}"#).unwrap();
        assert_eq!(rows, vec![json!({"id":1})]);

        // a non-array under a wrapper key is just a field of a bare object
        let rows = normalize_rows(r#"{"data":"x"}"#).unwrap();
        assert_eq!(rows, vec![json!({"data":"x"})]);
    }

    #[test]
    fn test_scalars_and_garbage_are_errors() {
        assert!(normalize_rows("42").is_err());
        assert!(normalize_rows("null").is_err());
        assert!(normalize_rows("<html>").is_err());
    }

    #[test]
    fn test_excerpt_bounds_and_redacts() {
        let long = "x".repeat(EXCERPT_LIMIT + 100);
        let out = excerpt(&long, None);
        assert_eq!(out.len(), EXCERPT_LIMIT + 3);
        assert!(out.ends_with("..."));

        let out = excerpt(r#"{"message":"bad key sk-123"}"#, Some("sk-123"));
        assert_eq!(out, r#"{"message":"bad key ***"}"#);
    }
}
