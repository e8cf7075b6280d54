use serde_json::Value;

/// Escapes text placed between tags; quotes are left readable.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compact JSON rendering, `null` for a missing value.
pub(crate) fn json_text(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Strings render bare, everything else as JSON.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => json_text(other),
    }
}

/// Formats a number the way a browser prints it: no trailing `.0`.
pub(crate) fn number_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escape_text_keeps_quotes() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_text(r#"{"a":"<b>"}"#), r#"{"a":"&lt;b&gt;"}"#);
    }

    #[test]
    fn json_text_is_compact() {
        assert_eq!(json_text(&json!({"x": 10, "y": 20})), r#"{"x":10,"y":20}"#);
        assert_eq!(json_text(&Value::Null), "null");
    }

    #[test]
    fn value_text_flattens_lists() {
        assert_eq!(value_text(&json!("béton")), "béton");
        assert_eq!(value_text(&json!(["bois", "acier"])), "bois, acier");
        assert_eq!(value_text(&json!(2)), "2");
    }

    #[test]
    fn number_text_drops_integral_fraction() {
        assert_eq!(number_text(0.92), "0.92");
        assert_eq!(number_text(1.0), "1");
        assert_eq!(number_text(-3.0), "-3");
    }
}
