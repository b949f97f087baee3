//! JSON entry points.
//!
//! Thin wrappers around `serde_json`: the FHIR-specific rules live in the
//! generated `Serialize`/`Deserialize` impls, so these functions only add the
//! crate's error type and tracing. `serde_json` never escapes HTML, so
//! narrative markup is written with raw `<`, `>` and `&`.
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::{debug, trace};

/// Deserialize a FHIR resource from a JSON string.
///
/// # Examples
///
/// ```
/// use plait_serde::json::from_json_str;
/// use plait_fhir::r4b::Patient;
///
/// let json = r#"{"resourceType": "Patient", "id": "example"}"#;
/// let patient: Patient = from_json_str(json).unwrap();
/// assert_eq!(patient.id.unwrap().value.as_deref(), Some("example"));
/// ```
pub fn from_json_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    trace!(bytes = s.len(), "decoding JSON");
    Ok(serde_json::from_str(s)?)
}

/// Deserialize a FHIR resource from a JSON byte slice.
pub fn from_json_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    trace!(bytes = v.len(), "decoding JSON");
    Ok(serde_json::from_slice(v)?)
}

/// Deserialize a FHIR resource from a reader.
pub fn from_json_reader<R, T>(reader: R) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Deserialize a FHIR resource from a `serde_json::Value`.
pub fn from_json_value<T>(value: serde_json::Value) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(value)?)
}

/// Serialize a FHIR resource to a JSON string.
///
/// ```
/// use plait_serde::json::to_json_string;
/// use plait_fhir::r4b::{Code, ActivityDefinition};
///
/// let definition = ActivityDefinition {
///     status: Code { id: Some("a1".to_string()), ..Code::from("draft") },
///     ..Default::default()
/// };
/// assert_eq!(
///     to_json_string(&definition).unwrap(),
///     r#"{"resourceType":"ActivityDefinition","status":"draft","_status":{"id":"a1"}}"#
/// );
/// ```
pub fn to_json_string<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    debug!(bytes = json.len(), "encoded JSON");
    Ok(json)
}

/// Serialize a FHIR resource to a pretty-printed JSON string.
pub fn to_json_string_pretty<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    debug!(bytes = json.len(), "encoded JSON");
    Ok(json)
}

/// Serialize a FHIR resource to a JSON byte vector.
pub fn to_json_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_vec(value)?)
}

/// Serialize a FHIR resource into a writer; write failures surface as
/// [`SerdeError::Json`](crate::SerdeError::Json) wrapping the IO error.
pub fn to_json_writer<W, T>(writer: W, value: &T, pretty: bool) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

/// Serialize a FHIR resource to a `serde_json::Value`.
///
/// Field order is preserved, so the value serializes to the same text as
/// [`to_json_string`].
pub fn to_json_value<T>(value: &T) -> Result<serde_json::Value>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_value(value)?)
}
