//! XML writer.
//!
//! A resource is first serialized to its FHIR JSON form, which already has
//! every FHIR-specific decision made (choice suffixes, `_field` metadata,
//! `resourceType`). This module then maps that form to XML element by
//! element, which needs no knowledge of the schema:
//!
//! - objects with a `resourceType` become resource elements,
//! - other objects become complex elements with `id` (and on extensions
//!   `url`) as attributes,
//! - scalars become `<name value=".."/>`, merged with their `_name` metadata,
//! - arrays repeat the element, pairing items with `_name` entries by index.

use crate::error::{Result, SerdeError};
use crate::xml::utils;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use tracing::debug;

/// Serialize a FHIR resource to an XML string.
///
/// ```
/// use plait_serde::xml::to_xml_string;
/// use plait_fhir::r4b::Patient;
///
/// let patient = Patient {
///     id: Some("example".into()),
///     active: Some(true.into()),
///     ..Default::default()
/// };
/// let xml = to_xml_string(&patient).unwrap();
/// assert!(xml.contains(r#"<Patient xmlns="http://hl7.org/fhir"><id value="example"/><active value="true"/></Patient>"#));
/// ```
pub fn to_xml_string<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    String::from_utf8(to_xml_vec(value)?).map_err(|e| SerdeError::Custom(e.to_string()))
}

/// Serialize a FHIR resource to an indented XML string.
pub fn to_xml_string_pretty<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    to_xml_writer(&mut buffer, value, true)?;
    String::from_utf8(buffer).map_err(|e| SerdeError::Custom(e.to_string()))
}

/// Serialize a FHIR resource to an XML byte vector.
pub fn to_xml_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    to_xml_writer(&mut buffer, value, false)?;
    Ok(buffer)
}

/// Serialize a FHIR resource to an XML writer.
pub fn to_xml_writer<W, T>(writer: W, value: &T, pretty: bool) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_value(value)?;
    let mut serializer = if pretty {
        XmlSerializer::new_pretty(writer)
    } else {
        XmlSerializer::new(writer)
    };
    serializer.write_document(&json)
}

/// Writes a FHIR JSON value as FHIR XML.
pub struct XmlSerializer<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Writer::new(writer),
        }
    }

    pub fn new_pretty(writer: W) -> Self {
        Self {
            writer: Writer::new_with_indent(writer, b' ', 2),
        }
    }

    /// Writes the XML declaration and the root resource element.
    pub fn write_document(&mut self, value: &Value) -> Result<()> {
        let resource = value
            .as_object()
            .ok_or_else(|| SerdeError::Custom("an XML document must be a JSON object".into()))?;
        let resource_type = resource_type(resource).ok_or_else(|| {
            SerdeError::Custom("an XML document needs a resource with a resourceType".into())
        })?;
        debug!(resource_type, "encoding XML");

        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write_resource(resource_type, resource, true)
    }

    fn write_resource(
        &mut self,
        resource_type: &str,
        resource: &Map<String, Value>,
        root: bool,
    ) -> Result<()> {
        let mut start = BytesStart::new(resource_type);
        if root {
            start.push_attribute(("xmlns", utils::FHIR_NAMESPACE));
        }
        // A resource's id is an ordinary primitive child, not an attribute.
        self.write_element(start, resource_type, resource, &[])
    }

    /// Writes `start`, then the members of `object` except `skip`, then the end tag.
    fn write_element(
        &mut self,
        start: BytesStart<'_>,
        name: &str,
        object: &Map<String, Value>,
        skip: &[&str],
    ) -> Result<()> {
        let has_children = object.iter().any(|(key, value)| {
            key != "resourceType" && !skip.contains(&utils::strip_underscore(key)) && !value.is_null()
        });
        if !has_children {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        for (key, value) in object {
            if key == "resourceType" {
                continue;
            }
            let base = utils::strip_underscore(key);
            if skip.contains(&base) {
                continue;
            }
            if utils::is_metadata_key(key) {
                // Metadata is written with its value; on its own only when there is none.
                if !object.contains_key(base) {
                    self.write_field(base, &Value::Null, Some(value))?;
                }
                continue;
            }
            self.write_field(key, value, object.get(&format!("_{key}")))?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn write_field(&mut self, name: &str, value: &Value, metadata: Option<&Value>) -> Result<()> {
        let metadata = metadata.filter(|metadata| !metadata.is_null());
        match (value, metadata) {
            (Value::Array(_), _) | (Value::Null, Some(Value::Array(_))) => {
                let values = value.as_array().map(Vec::as_slice).unwrap_or_default();
                let metadata = metadata
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for index in 0..values.len().max(metadata.len()) {
                    let item = values.get(index).unwrap_or(&Value::Null);
                    let item_metadata = metadata.get(index).filter(|m| !m.is_null());
                    self.write_single(name, item, item_metadata)?;
                }
                Ok(())
            }
            _ => self.write_single(name, value, metadata),
        }
    }

    fn write_single(&mut self, name: &str, value: &Value, metadata: Option<&Value>) -> Result<()> {
        match value {
            Value::Object(object) => match resource_type(object) {
                Some(resource_type) => {
                    self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                    self.write_resource(resource_type, object, false)?;
                    self.writer.write_event(Event::End(BytesEnd::new(name)))?;
                    Ok(())
                }
                None => self.write_complex(name, object),
            },
            Value::String(markup) if utils::is_div_element(name) => self.write_div(markup),
            Value::Array(_) => Err(SerdeError::Custom(format!(
                "nested arrays cannot be written as XML (in `{name}`)"
            ))),
            _ => self.write_primitive(name, value, metadata),
        }
    }

    fn write_complex(&mut self, name: &str, object: &Map<String, Value>) -> Result<()> {
        let mut start = BytesStart::new(name);
        let mut skip = Vec::with_capacity(2);
        if let Some(Value::String(id)) = object.get("id") {
            start.push_attribute(("id", id.as_str()));
            skip.push("id");
        }
        if utils::carries_url_attribute(name) {
            if let Some(Value::String(url)) = object.get("url") {
                start.push_attribute(("url", url.as_str()));
                skip.push("url");
            }
        }
        self.write_element(start, name, object, &skip)
    }

    fn write_primitive(&mut self, name: &str, value: &Value, metadata: Option<&Value>) -> Result<()> {
        let mut start = BytesStart::new(name);
        let metadata = metadata.and_then(Value::as_object);
        if let Some(Value::String(id)) = metadata.and_then(|m| m.get("id")) {
            start.push_attribute(("id", id.as_str()));
        }
        if let Some(text) = utils::primitive_text(value) {
            start.push_attribute(("value", text.as_str()));
        }

        let extensions = metadata
            .and_then(|m| m.get("extension"))
            .and_then(Value::as_array)
            .filter(|extensions| !extensions.is_empty());
        match extensions {
            Some(extensions) => {
                self.writer.write_event(Event::Start(start))?;
                for extension in extensions {
                    self.write_single("extension", extension, None)?;
                }
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            None => {
                self.writer.write_event(Event::Empty(start))?;
            }
        }
        Ok(())
    }

    /// Copies the narrative markup event by event, which also checks that it
    /// is well-formed.
    fn write_div(&mut self, markup: &str) -> Result<()> {
        use quick_xml::Reader;

        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(false);
        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Decl(_) => {}
                event => self.writer.write_event(event)?,
            }
        }
        Ok(())
    }
}

fn resource_type(object: &Map<String, Value>) -> Option<&str> {
    object.get("resourceType").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(value: Value) -> String {
        let mut buffer = Vec::new();
        XmlSerializer::new(&mut buffer).write_document(&value).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_primitive_with_metadata() {
        let xml = write(json!({
            "resourceType": "Patient",
            "birthDate": "1974-12-25",
            "_birthDate": {"id": "bd1"}
        }));
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?><Patient xmlns="http://hl7.org/fhir"><birthDate id="bd1" value="1974-12-25"/></Patient>"#
        );
    }

    #[test]
    fn test_metadata_without_value() {
        let xml = write(json!({
            "resourceType": "Patient",
            "_gender": {"extension": [{"url": "http://example.org/ext", "valueCode": "masked"}]}
        }));
        assert!(
            xml.contains(r#"<gender><extension url="http://example.org/ext"><valueCode value="masked"/></extension></gender>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_sparse_list() {
        let xml = write(json!({
            "resourceType": "Patient",
            "name": [{
                "given": ["a", null, "c"],
                "_given": [null, {"id": "g2"}, null]
            }]
        }));
        assert!(
            xml.contains(r#"<name><given value="a"/><given id="g2"/><given value="c"/></name>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_complex_id_is_attribute() {
        let xml = write(json!({
            "resourceType": "Patient",
            "id": "p1",
            "name": [{"id": "n1", "family": "Chalmers"}]
        }));
        assert!(xml.contains(r#"<id value="p1"/>"#), "{xml}");
        assert!(xml.contains(r#"<name id="n1"><family value="Chalmers"/></name>"#), "{xml}");
    }

    #[test]
    fn test_contained_is_wrapped() {
        let xml = write(json!({
            "resourceType": "Observation",
            "contained": [{"resourceType": "Patient", "id": "p1"}],
            "status": "final"
        }));
        assert!(
            xml.contains(r#"<contained><Patient><id value="p1"/></Patient></contained><status value="final"/>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_div_is_copied_verbatim() {
        let xml = write(json!({
            "resourceType": "Patient",
            "text": {
                "status": "generated",
                "div": "<div xmlns=\"http://www.w3.org/1999/xhtml\"><p>A &amp; B</p></div>"
            }
        }));
        assert!(
            xml.contains(r#"<text><status value="generated"/><div xmlns="http://www.w3.org/1999/xhtml"><p>A &amp; B</p></div></text>"#),
            "{xml}"
        );
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let xml = write(json!({"resourceType": "Patient", "gender": "a<b&\"c\""}));
        assert!(xml.contains(r#"<gender value="a&lt;b&amp;&quot;c&quot;"/>"#), "{xml}");
    }

    #[test]
    fn test_root_needs_resource_type() {
        let mut buffer = Vec::new();
        let err = XmlSerializer::new(&mut buffer)
            .write_document(&json!({"id": "x"}))
            .unwrap_err();
        assert!(err.to_string().contains("resourceType"));
    }
}
