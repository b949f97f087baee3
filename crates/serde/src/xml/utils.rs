//! Names, namespaces and primitive conversions shared by the XML reader and writer.

use crate::error::{Result, SerdeError};
use plait_serde_support::PrimitiveKind;
use serde_json::{Number, Value};

/// FHIR namespace URI, declared on the root resource element.
pub const FHIR_NAMESPACE: &str = "http://hl7.org/fhir";

/// Namespace of the narrative `<div>`.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Namespace bound to the reserved `xml` prefix (`xml:lang`).
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// `_birthDate` style keys carry primitive metadata.
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with('_')
}

/// Strips the underscore prefix from a metadata key.
pub fn strip_underscore(key: &str) -> &str {
    key.strip_prefix('_').unwrap_or(key)
}

pub fn is_div_element(name: &str) -> bool {
    name == "div"
}

/// Extensions carry `url` as an attribute instead of a child element.
pub fn carries_url_attribute(name: &str) -> bool {
    matches!(name, "extension" | "modifierExtension")
}

/// Text for a `value` attribute; `None` for JSON null.
pub fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Types the text of a `value` attribute the way FHIR JSON writes it.
pub fn typed_primitive(kind: PrimitiveKind, text: &str, element: &str) -> Result<Value> {
    let invalid = |expected: &str| {
        SerdeError::Custom(format!(
            "invalid {} value {:?} on `{}`",
            expected, text, element
        ))
    };
    match kind {
        PrimitiveKind::String => Ok(Value::String(text.to_string())),
        PrimitiveKind::Boolean => match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid("boolean")),
        },
        PrimitiveKind::Integer => text
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| invalid("integer")),
        PrimitiveKind::Decimal => text
            .parse::<Number>()
            .map(Value::Number)
            .map_err(|_| invalid("decimal")),
    }
}
