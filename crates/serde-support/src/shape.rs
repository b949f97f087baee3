//! Field descriptor tables.
//!
//! JSON carries enough structure for serde to decode a FHIR document without
//! outside help, but XML does not: a single `<given value="x"/>` could be a
//! one-element list or a scalar, and `value="3"` could be a string or an
//! integer. Every [`FhirCodec`](crate::FhirCodec) type therefore publishes a
//! [`Shape`] describing its children so the XML reader can rebuild the JSON
//! form before handing it to the codec.

/// The JSON representation used for a primitive's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Decimal,
    String,
}

/// Structural description of a FHIR element type.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A bare string carried as an XML attribute (`Element.id`, `Extension.url`).
    Plain,
    /// Narrative XHTML, carried verbatim.
    Xhtml,
    /// A primitive with optional `id`/`extension` metadata.
    Primitive {
        kind: PrimitiveKind,
        extension: fn() -> Shape,
    },
    /// A complex datatype, backbone element or resource.
    Complex {
        resource_type: Option<&'static str>,
        fields: &'static [FieldDescriptor],
    },
    /// A `value[x]` element; the concrete type is picked by the wire key suffix.
    Choice(&'static [VariantDescriptor]),
    /// A polymorphic resource slot resolved by resource type name.
    Resource(fn(&str) -> Option<Shape>),
}

impl Shape {
    /// The resource type name if this shape describes a concrete resource.
    pub fn resource_type(&self) -> Option<&'static str> {
        match self {
            Shape::Complex { resource_type, .. } => *resource_type,
            _ => None,
        }
    }

    /// Whether the element may carry `_name` metadata on the JSON side.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Shape::Primitive { .. })
    }
}

/// One field of a complex type, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// JSON / XML element name; for choice fields the base name without suffix.
    pub name: &'static str,
    /// Whether the field is a list.
    pub repeats: bool,
    pub shape: fn() -> Shape,
}

/// One allowed type of a choice element.
#[derive(Debug, Clone, Copy)]
pub struct VariantDescriptor {
    /// Type suffix appended to the base name, e.g. `Quantity` in `valueQuantity`.
    pub suffix: &'static str,
    pub shape: fn() -> Shape,
}

/// A field resolved from an element name.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedField {
    pub descriptor: &'static FieldDescriptor,
    /// The shape of the concrete child; for choice fields the selected variant.
    pub shape: Shape,
}

impl FieldDescriptor {
    /// Finds the field an element (or attribute) name belongs to.
    ///
    /// Direct names win over choice suffixes, so `valueSet` is never mistaken
    /// for a `value[x]` variant named `Set`.
    pub fn resolve(fields: &'static [FieldDescriptor], element: &str) -> Option<ResolvedField> {
        let mut choice_hit = None;
        for descriptor in fields {
            let shape = (descriptor.shape)();
            match shape {
                Shape::Choice(variants) => {
                    if choice_hit.is_some() {
                        continue;
                    }
                    let Some(suffix) = element.strip_prefix(descriptor.name) else {
                        continue;
                    };
                    if let Some(variant) = variants.iter().find(|v| v.suffix == suffix) {
                        choice_hit = Some(ResolvedField {
                            descriptor,
                            shape: (variant.shape)(),
                        });
                    }
                }
                _ if descriptor.name == element => {
                    return Some(ResolvedField { descriptor, shape });
                }
                _ => {}
            }
        }
        choice_hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_shape() -> Shape {
        Shape::Primitive {
            kind: PrimitiveKind::String,
            extension: plain_shape,
        }
    }

    fn plain_shape() -> Shape {
        Shape::Plain
    }

    fn value_choice() -> Shape {
        const VARIANTS: &[VariantDescriptor] = &[
            VariantDescriptor {
                suffix: "String",
                shape: string_shape,
            },
            VariantDescriptor {
                suffix: "Canonical",
                shape: string_shape,
            },
        ];
        Shape::Choice(VARIANTS)
    }

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor {
            name: "id",
            repeats: false,
            shape: plain_shape,
        },
        FieldDescriptor {
            name: "value",
            repeats: false,
            shape: value_choice,
        },
        FieldDescriptor {
            name: "valueSet",
            repeats: true,
            shape: string_shape,
        },
    ];

    #[test]
    fn test_resolve_direct_name() {
        let resolved = FieldDescriptor::resolve(FIELDS, "id").unwrap();
        assert_eq!(resolved.descriptor.name, "id");
        assert!(matches!(resolved.shape, Shape::Plain));
    }

    #[test]
    fn test_resolve_choice_suffix() {
        let resolved = FieldDescriptor::resolve(FIELDS, "valueCanonical").unwrap();
        assert_eq!(resolved.descriptor.name, "value");
        assert!(resolved.shape.is_primitive());
    }

    #[test]
    fn test_direct_name_beats_choice_prefix() {
        let resolved = FieldDescriptor::resolve(FIELDS, "valueSet").unwrap();
        assert_eq!(resolved.descriptor.name, "valueSet");
        assert!(resolved.descriptor.repeats);
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(FieldDescriptor::resolve(FIELDS, "valueBoolean").is_none());
        assert!(FieldDescriptor::resolve(FIELDS, "status").is_none());
    }
}
