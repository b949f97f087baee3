//! XML reader.
//!
//! XML alone cannot say whether `<given value="x"/>` is a list of one or
//! whether `value="3"` is a number or a string, so the reader walks the
//! target type's [`Shape`] descriptors alongside the document and rebuilds
//! the FHIR JSON form: arrays for repeating fields, typed scalars, and
//! `_field` entries (with `null` placeholders) for primitive metadata. The
//! result is then decoded by the type's ordinary JSON codec, so both formats
//! share one set of decoding rules.
//!
//! The reader is strict. Elements must be in the FHIR namespace (the
//! narrative `div` in XHTML), attributes must be ones the element defines,
//! and character data may only appear inside the narrative.

use crate::error::{Result, SerdeError};
use crate::xml::utils;
use quick_xml::escape::{escape, partial_escape};
use plait_serde_support::{FhirCodec, FieldDescriptor, PrimitiveKind, Shape};
use roxmltree::{Document, Node};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::Read;
use tracing::debug;

/// Deserialize a FHIR resource from an XML string.
///
/// ```
/// use plait_serde::xml::from_xml_str;
/// use plait_fhir::r4b::Patient;
///
/// let xml = r#"<?xml version="1.0"?>
/// <Patient xmlns="http://hl7.org/fhir">
///   <id value="example"/>
///   <active value="true"/>
/// </Patient>"#;
/// let patient: Patient = from_xml_str(xml).unwrap();
/// assert_eq!(patient.active.unwrap().value, Some(true));
/// ```
pub fn from_xml_str<T>(xml: &str) -> Result<T>
where
    T: DeserializeOwned + FhirCodec,
{
    let json = xml_to_json_value(xml, T::shape())?;
    Ok(serde_json::from_value(json)?)
}

/// Deserialize a FHIR resource from XML bytes.
pub fn from_xml_slice<T>(xml: &[u8]) -> Result<T>
where
    T: DeserializeOwned + FhirCodec,
{
    let xml = std::str::from_utf8(xml).map_err(|e| SerdeError::Custom(format!("Invalid UTF-8: {}", e)))?;
    from_xml_str(xml)
}

/// Deserialize a FHIR resource from an XML reader.
pub fn from_xml_reader<R, T>(mut reader: R) -> Result<T>
where
    R: Read,
    T: DeserializeOwned + FhirCodec,
{
    let mut xml = String::new();
    reader.read_to_string(&mut xml)?;
    from_xml_str(&xml)
}

/// Converts an XML document to the FHIR JSON form of the type described by
/// `shape`, without decoding it further.
pub fn xml_to_json_value(xml: &str, shape: Shape) -> Result<Value> {
    let document = Document::parse(xml)?;
    let root = document.root_element();
    let reader = XmlReader;
    reader.expect_namespace(root, utils::FHIR_NAMESPACE)?;

    let name = root.tag_name().name();
    debug!(root = name, bytes = xml.len(), "decoding XML");
    match shape {
        Shape::Resource(lookup) => {
            let fields = resource_fields(lookup(name), name, "document")?;
            reader.read_resource(root, name, fields)
        }
        Shape::Complex {
            resource_type: Some(expected),
            fields,
        } => {
            if name != expected {
                return Err(SerdeError::Custom(format!(
                    "expected a `{expected}` document, found `{name}`"
                )));
            }
            reader.read_resource(root, name, fields)
        }
        Shape::Complex {
            resource_type: None,
            fields,
        } => reader.read_complex(root, fields),
        _ => Err(SerdeError::Custom(format!(
            "`{name}` cannot be the root of an XML document"
        ))),
    }
}

fn resource_fields(
    shape: Option<Shape>,
    name: &str,
    parent: &str,
) -> Result<&'static [FieldDescriptor]> {
    match shape {
        Some(Shape::Complex {
            resource_type: Some(_),
            fields,
        }) => Ok(fields),
        _ => Err(SerdeError::UnexpectedElement {
            element: name.to_string(),
            parent: parent.to_string(),
        }),
    }
}

/// A field's content gathered over the element's children.
enum Member {
    Single(Value),
    Primitive(Option<Value>, Option<Value>),
    List(Vec<Value>),
    PrimitiveList(Vec<(Option<Value>, Option<Value>)>),
}

struct XmlReader;

impl XmlReader {
    fn expect_namespace(&self, node: Node, namespace: &str) -> Result<()> {
        match node.tag_name().namespace() {
            Some(found) if found == namespace => Ok(()),
            found => Err(SerdeError::Namespace {
                element: node.tag_name().name().to_string(),
                found: found.map(str::to_string),
            }),
        }
    }

    fn read_resource(&self, node: Node, resource_type: &str, fields: &'static [FieldDescriptor]) -> Result<Value> {
        if let Some(attribute) = node.attributes().next() {
            return Err(SerdeError::UnexpectedAttribute {
                element: resource_type.to_string(),
                attribute: attribute.name().to_string(),
            });
        }
        let mut map = Map::new();
        map.insert(
            "resourceType".to_string(),
            Value::String(resource_type.to_string()),
        );
        self.read_children(node, fields, &mut map)?;
        Ok(Value::Object(map))
    }

    /// Datatypes and backbone elements: plain string fields (`id`, `url`)
    /// are attributes, everything else is a child element.
    fn read_complex(&self, node: Node, fields: &'static [FieldDescriptor]) -> Result<Value> {
        let name = node.tag_name().name();
        let mut map = Map::new();
        for attribute in node.attributes() {
            let plain = attribute.namespace().is_none()
                && fields.iter().any(|field| {
                    field.name == attribute.name()
                        && !field.repeats
                        && matches!((field.shape)(), Shape::Plain)
                });
            if !plain {
                return Err(SerdeError::UnexpectedAttribute {
                    element: name.to_string(),
                    attribute: attribute.name().to_string(),
                });
            }
            map.insert(
                attribute.name().to_string(),
                Value::String(attribute.value().to_string()),
            );
        }
        self.read_children(node, fields, &mut map)?;
        Ok(Value::Object(map))
    }

    fn read_children(
        &self,
        node: Node,
        fields: &'static [FieldDescriptor],
        map: &mut Map<String, Value>,
    ) -> Result<()> {
        let parent = node.tag_name().name();
        let mut members: Vec<(String, Member)> = Vec::new();

        for child in node.children() {
            if child.is_text() {
                self.expect_blank(child, parent)?;
                continue;
            }
            if !child.is_element() {
                continue;
            }

            let name = child.tag_name().name();
            let resolved = FieldDescriptor::resolve(fields, name).ok_or_else(|| {
                SerdeError::UnexpectedElement {
                    element: name.to_string(),
                    parent: parent.to_string(),
                }
            })?;

            let member = match resolved.shape {
                Shape::Xhtml => {
                    self.expect_namespace(child, utils::XHTML_NAMESPACE)?;
                    Member::Single(Value::String(self.read_div(child)?))
                }
                Shape::Primitive { kind, extension } => {
                    self.expect_namespace(child, utils::FHIR_NAMESPACE)?;
                    let (value, metadata) = self.read_primitive(child, kind, extension())?;
                    Member::Primitive(value, metadata)
                }
                Shape::Complex {
                    resource_type: None,
                    fields,
                } => {
                    self.expect_namespace(child, utils::FHIR_NAMESPACE)?;
                    Member::Single(self.read_complex(child, fields)?)
                }
                Shape::Complex {
                    resource_type: Some(_),
                    ..
                }
                | Shape::Resource(_) => {
                    self.expect_namespace(child, utils::FHIR_NAMESPACE)?;
                    Member::Single(self.read_wrapped_resource(child, resolved.shape)?)
                }
                Shape::Plain | Shape::Choice(_) => {
                    return Err(SerdeError::UnexpectedElement {
                        element: name.to_string(),
                        parent: parent.to_string(),
                    });
                }
            };

            let repeats = resolved.descriptor.repeats;
            match members.iter().position(|(key, _)| key == name) {
                Some(index) if repeats => push_member(&mut members[index].1, member),
                Some(_) => {
                    return Err(SerdeError::Custom(format!(
                        "element `{name}` appears more than once in `{parent}` but does not repeat"
                    )));
                }
                None if repeats => {
                    let mut list = match member {
                        Member::Primitive(..) => Member::PrimitiveList(Vec::new()),
                        _ => Member::List(Vec::new()),
                    };
                    push_member(&mut list, member);
                    members.push((name.to_string(), list));
                }
                None => members.push((name.to_string(), member)),
            }
        }

        for (name, member) in members {
            match member {
                Member::Single(value) => {
                    map.insert(name, value);
                }
                Member::List(values) => {
                    map.insert(name, Value::Array(values));
                }
                Member::Primitive(value, metadata) => {
                    if let Some(metadata) = metadata {
                        map.insert(format!("_{name}"), metadata);
                    }
                    if let Some(value) = value {
                        map.insert(name, value);
                    }
                }
                Member::PrimitiveList(items) => {
                    let (values, metadata): (Vec<_>, Vec<_>) = items.into_iter().unzip();
                    if values.iter().any(Option::is_some) {
                        let values = values.into_iter().map(|v| v.unwrap_or(Value::Null));
                        map.insert(name.clone(), Value::Array(values.collect()));
                    }
                    if metadata.iter().any(Option::is_some) {
                        let metadata = metadata.into_iter().map(|m| m.unwrap_or(Value::Null));
                        map.insert(format!("_{name}"), Value::Array(metadata.collect()));
                    }
                }
            }
        }
        Ok(())
    }

    /// `<birthDate id=".." value=".."><extension ../></birthDate>` becomes the
    /// typed value and the `{id, extension}` metadata object.
    fn read_primitive(
        &self,
        node: Node,
        kind: PrimitiveKind,
        extension: Shape,
    ) -> Result<(Option<Value>, Option<Value>)> {
        let name = node.tag_name().name();
        let mut value = None;
        let mut metadata = Map::new();
        for attribute in node.attributes() {
            match (attribute.namespace(), attribute.name()) {
                (None, "value") => {
                    value = Some(utils::typed_primitive(kind, attribute.value(), name)?);
                }
                (None, "id") => {
                    metadata.insert("id".to_string(), Value::String(attribute.value().to_string()));
                }
                _ => {
                    return Err(SerdeError::UnexpectedAttribute {
                        element: name.to_string(),
                        attribute: attribute.name().to_string(),
                    });
                }
            }
        }

        let Shape::Complex { fields, .. } = extension else {
            return Err(SerdeError::Custom(format!(
                "primitive `{name}` has no extension type"
            )));
        };
        let mut extensions = Vec::new();
        for child in node.children() {
            if child.is_text() {
                self.expect_blank(child, name)?;
                continue;
            }
            if !child.is_element() {
                continue;
            }
            if child.tag_name().name() != "extension" {
                return Err(SerdeError::UnexpectedElement {
                    element: child.tag_name().name().to_string(),
                    parent: name.to_string(),
                });
            }
            self.expect_namespace(child, utils::FHIR_NAMESPACE)?;
            extensions.push(self.read_complex(child, fields)?);
        }
        if !extensions.is_empty() {
            metadata.insert("extension".to_string(), Value::Array(extensions));
        }

        let metadata = (!metadata.is_empty()).then_some(Value::Object(metadata));
        Ok((value, metadata))
    }

    /// `<contained><Patient>..</Patient></contained>`: exactly one resource
    /// element inside the field element.
    fn read_wrapped_resource(&self, node: Node, shape: Shape) -> Result<Value> {
        let name = node.tag_name().name();
        if let Some(attribute) = node.attributes().next() {
            return Err(SerdeError::UnexpectedAttribute {
                element: name.to_string(),
                attribute: attribute.name().to_string(),
            });
        }

        let mut resource = None;
        for child in node.children() {
            if child.is_text() {
                self.expect_blank(child, name)?;
                continue;
            }
            if !child.is_element() {
                continue;
            }
            if resource.is_some() {
                return Err(SerdeError::Custom(format!(
                    "`{name}` must hold exactly one resource"
                )));
            }
            self.expect_namespace(child, utils::FHIR_NAMESPACE)?;
            let resource_type = child.tag_name().name();
            let candidate = match shape {
                Shape::Resource(lookup) => lookup(resource_type),
                Shape::Complex {
                    resource_type: Some(expected),
                    ..
                } if expected == resource_type => Some(shape),
                _ => None,
            };
            let fields = resource_fields(candidate, resource_type, name)?;
            resource = Some(self.read_resource(child, resource_type, fields)?);
        }
        resource.ok_or_else(|| SerdeError::Custom(format!("`{name}` must hold exactly one resource")))
    }

    /// Re-serializes the narrative with the XHTML namespace as the default
    /// namespace on the `div`, whatever prefixes or ancestor declarations the
    /// document used.
    fn read_div(&self, node: Node) -> Result<String> {
        let mut markup = String::new();
        self.write_xhtml(node, true, &mut markup)?;
        Ok(markup)
    }

    fn write_xhtml(&self, node: Node, root: bool, out: &mut String) -> Result<()> {
        self.expect_namespace(node, utils::XHTML_NAMESPACE)?;
        let name = node.tag_name().name();
        out.push('<');
        out.push_str(name);
        if root {
            out.push_str(&format!(r#" xmlns="{}""#, utils::XHTML_NAMESPACE));
        }
        for attribute in node.attributes() {
            let prefix = match attribute.namespace() {
                None => "",
                Some(utils::XML_NAMESPACE) => "xml:",
                Some(_) => {
                    return Err(SerdeError::UnexpectedAttribute {
                        element: name.to_string(),
                        attribute: attribute.name().to_string(),
                    });
                }
            };
            out.push_str(&format!(
                r#" {prefix}{}="{}""#,
                attribute.name(),
                escape(attribute.value())
            ));
        }

        let mut children = node
            .children()
            .filter(|child| child.is_element() || child.is_text())
            .peekable();
        if children.peek().is_none() {
            out.push_str("/>");
            return Ok(());
        }
        out.push('>');
        for child in children {
            if child.is_element() {
                self.write_xhtml(child, false, out)?;
            } else if let Some(text) = child.text() {
                out.push_str(&partial_escape(text));
            }
        }
        out.push_str("</");
        out.push_str(name);
        out.push('>');
        Ok(())
    }

    fn expect_blank(&self, node: Node, parent: &str) -> Result<()> {
        match node.text() {
            Some(text) if !text.trim().is_empty() => Err(SerdeError::UnexpectedText {
                element: parent.to_string(),
                text: text.trim().to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn push_member(list: &mut Member, member: Member) {
    match (list, member) {
        (Member::PrimitiveList(items), Member::Primitive(value, metadata)) => {
            items.push((value, metadata));
        }
        (Member::List(items), Member::Single(value)) => items.push(value),
        _ => {}
    }
}
