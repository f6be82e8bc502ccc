//! Query-string encoding.
//!
//! [`encode_query`] turns a [`Params`] record into a query string according to
//! a [`QueryParamsDecodeMode`]. Keys and values are percent-encoded; the
//! bracket syntax used for nesting is left as-is.

use std::borrow::Cow;

use serde_json::Value;

use crate::config::{Params, QueryParamsDecodeMode};

/// Query parameter carrying the local timezone offset.
pub const TIME_OFFSET_PARAM: &str = "timeoffset";

/// Encodes `params` as a query string (without the leading `?`).
///
/// `null` values are skipped, and empty arrays produce no pairs.
///
/// # Example
///
/// ```rust
/// use resource_client::clients::encode_query;
/// use resource_client::QueryParamsDecodeMode;
/// use serde_json::json;
///
/// let params = json!({"ids": [1, 2], "q": "a b"});
/// let params = params.as_object().unwrap();
///
/// assert_eq!(encode_query(params, QueryParamsDecodeMode::Comma), "ids=1,2&q=a%20b");
/// assert_eq!(encode_query(params, QueryParamsDecodeMode::Brackets), "ids[]=1&ids[]=2&q=a%20b");
/// ```
#[must_use]
pub fn encode_query(params: &Params, mode: QueryParamsDecodeMode) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_pairs(&mut pairs, &urlencoding::encode(key), value, mode);
    }
    pairs.join("&")
}

/// Returns the local timezone offset from UTC in minutes (east positive).
#[must_use]
pub fn local_time_offset_minutes() -> i32 {
    chrono::Local::now().offset().local_minus_utc() / 60
}

fn push_pairs(pairs: &mut Vec<String>, key: &str, value: &Value, mode: QueryParamsDecodeMode) {
    match value {
        Value::Null => {}
        Value::Array(items) => push_array(pairs, key, items, mode),
        Value::Object(map) => {
            for (child, child_value) in map {
                let nested = format!("{key}[{}]", urlencoding::encode(child));
                push_pairs(pairs, &nested, child_value, mode);
            }
        }
        scalar => {
            if let Some(text) = scalar_text(scalar) {
                pairs.push(format!("{key}={}", urlencoding::encode(&text)));
            }
        }
    }
}

fn push_array(pairs: &mut Vec<String>, key: &str, items: &[Value], mode: QueryParamsDecodeMode) {
    match mode {
        QueryParamsDecodeMode::Comma if items.iter().all(is_scalar) => {
            let joined = items
                .iter()
                .filter_map(scalar_text)
                .map(|text| urlencoding::encode(&text).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            if !joined.is_empty() {
                pairs.push(format!("{key}={joined}"));
            }
        }
        QueryParamsDecodeMode::Repeat => {
            for item in items {
                push_pairs(pairs, key, item, mode);
            }
        }
        QueryParamsDecodeMode::Brackets => {
            let bracketed = format!("{key}[]");
            for item in items {
                push_pairs(pairs, &bracketed, item, mode);
            }
        }
        // Arrays holding objects or arrays cannot be comma-joined.
        QueryParamsDecodeMode::Comma | QueryParamsDecodeMode::Indices => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(pairs, &format!("{key}[{index}]"), item, mode);
            }
        }
    }
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
