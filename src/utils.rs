use crate::error::InertiaError;
use serde::Serialize;
use serde_json::{Map, Value};

pub(crate) fn inertia_err_msg(msg: String) -> String {
    format!("[Inertia] {}", msg)
}

pub(crate) fn convert_struct_to_map<T>(s: T) -> Result<Map<String, Value>, InertiaError>
where
    T: Serialize,
{
    let struct_as_value = match serde_json::to_value(s) {
        Ok(value) => value,
        Err(err) => {
            return Err(InertiaError::SerializationError(format!(
                "Struct is not JSON serializable: {}",
                err
            )))
        }
    };

    match struct_as_value {
        Value::Object(map) => Ok(map),
        other => Err(InertiaError::SerializationError(format!(
            "Expected a JSON object, got {}",
            other
        ))),
    }
}

pub(crate) fn convert_struct_to_stringified_json<T>(s: T) -> Result<String, InertiaError>
where
    T: Serialize,
{
    let map = convert_struct_to_map(s)?;
    serde_json::to_string(&map).map_err(|err| {
        InertiaError::SerializationError(format!("Failed to serialize map to json: {}", err))
    })
}

/// Escapes a string so it can sit inside a double-quoted html attribute.
pub(crate) fn escape_html_attribute(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());

    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
