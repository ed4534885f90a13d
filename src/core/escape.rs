//! Value escaping for logfmt tokens
//!
//! `escape` returns everything that follows the key on the wire: `=` plus the
//! escaped value, or nothing at all for a null value.
//!
//! Scalars are escaped by replacing `\` with `\\`, a newline with `\n` and
//! `"` with `\"`, in that order, and are wrapped in double quotes only when
//! the result contains a space. A value holding only a quote or a newline
//! therefore stays unquoted. Records and sequences are written as compact
//! JSON and never quoted.

use super::field_set::FieldValue;

/// Escape a field value into its `=value` token
pub fn escape(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => String::new(),
        FieldValue::Json(json) => format!("={}", json),
        FieldValue::String(s) => escape_str(s),
        scalar => escape_str(&scalar.to_string()),
    }
}

/// Escape a string scalar into its `=value` token
pub fn escape_str(value: &str) -> String {
    let escaped = escape_scalar(value);
    let mut token = String::with_capacity(escaped.len() + 3);
    token.push('=');
    if escaped.contains(' ') {
        token.push('"');
        token.push_str(&escaped);
        token.push('"');
    } else {
        token.push_str(&escaped);
    }
    token
}

/// Backslash first, or an escaped quote would get its backslash doubled
fn escape_scalar(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('"', "\\\"")
}
