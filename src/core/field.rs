//! Field value helpers shared by links, the renderer and the transform
//!
//! Resource data, link query values and configuration flags all travel as
//! [`serde_json::Value`]. These helpers give those values one consistent
//! reading when they have to become booleans or URL fragments.

use serde_json::{Number, Value};

/// Strings accepted as `true` by [`parse_flag`] (compared case-insensitively)
const TRUE_STRINGS: [&str; 4] = ["true", "1", "yes", "on"];

/// Parse a flag that may arrive as a JSON boolean, number or string.
///
/// - `true` is true, `false` is false
/// - numbers are true when non-zero
/// - strings are true when they read `true`, `1`, `yes` or `on`
///   (trimmed, case-insensitive)
/// - anything else (null, arrays, objects, other strings) is false
///
/// # Examples
///
/// ```
/// use hal::core::field::parse_flag;
/// use serde_json::json;
///
/// assert!(parse_flag(&json!(true)));
/// assert!(parse_flag(&json!("TRUE")));
/// assert!(parse_flag(&json!("1")));
/// assert!(!parse_flag(&json!("false")));
/// assert!(!parse_flag(&json!(null)));
/// ```
pub fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            TRUE_STRINGS.iter().any(|t| s.eq_ignore_ascii_case(t))
        }
        _ => false,
    }
}

/// Check whether a value counts as "set" for pagination purposes.
///
/// Null, `false`, zero and the empty string are not truthy; everything
/// else (including empty arrays and objects) is.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a value the way it appears inside a URL path or query string.
///
/// Strings are used verbatim, scalars use their JSON spelling (whole-number
/// floats drop the `.0`), arrays are joined with commas and objects fall
/// back to compact JSON.
pub fn field_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::Array(items) => items
            .iter()
            .map(field_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Largest magnitude at which every integer is exactly representable in f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}
