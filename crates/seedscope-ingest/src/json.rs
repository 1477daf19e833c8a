//! JSON array sources.

use std::borrow::Cow;
use std::path::Path;

use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::raw::JsonObject;

/// Bare tokens emitted by some JSON writers for non-finite floats.
const NON_FINITE_TOKENS: &[&str] = &["-Infinity", "Infinity", "NaN"];

/// Objects of a JSON array source plus the count of skipped elements.
#[derive(Debug, Default)]
pub struct JsonArray {
    pub objects: Vec<JsonObject>,
    pub skipped: usize,
}

/// Parse a JSON array of objects.
///
/// Non-finite number tokens outside strings read as `null`. Elements that
/// are not objects are skipped and counted. A top level other than an
/// array is an error.
pub fn parse_json_array(text: &str, path: &Path) -> Result<JsonArray> {
    let text = replace_non_finite(text);
    if text.trim().is_empty() {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    let value: Value = serde_json::from_str(&text).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(IngestError::UnexpectedShape {
                path: path.to_path_buf(),
                reason: format!("top level is {}, expected an array", value_kind(&other)),
            });
        }
    };

    let mut array = JsonArray::default();
    for (index, element) in elements.into_iter().enumerate() {
        match element {
            Value::Object(object) => array.objects.push(object),
            other => {
                tracing::warn!(
                    path = %path.display(),
                    index,
                    kind = value_kind(&other),
                    "skipping non-object array element"
                );
                array.skipped += 1;
            }
        }
    }

    Ok(array)
}

/// Replace bare non-finite tokens outside string literals with `null`.
fn replace_non_finite(text: &str) -> Cow<'_, str> {
    if !NON_FINITE_TOKENS.iter().any(|token| text.contains(token)) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
