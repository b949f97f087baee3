//! The polymorphic resource slot.
//!
//! [`Resource`] is what `contained` holds and what a document decodes into
//! when its type is not known up front. It doubles as the registry that maps
//! a `resourceType` name to the matching decoder and [`Shape`].

use super::*;
use crate::{FhirResource, MemSize};
use plait_fhirpath_support::{EvaluationResult, FhirPathElement, IntoEvaluationResult};
use plait_serde_support::{FhirCodec, Shape, impl_whole_codec};
use serde::de::{self, MapAccess, Visitor, value::MapAccessDeserializer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! define_resources {
    ($($name:ident),* $(,)?) => {
        /// Any resource type this crate models.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $($name(Box<$name>),)*
        }

        impl Resource {
            /// Every `resourceType` accepted by [`Resource`].
            pub const TYPES: &'static [&'static str] = &[$(stringify!($name)),*];

            /// Descriptor for the named resource type, or `None` if it is not modelled.
            pub fn shape_for(resource_type: &str) -> Option<Shape> {
                match resource_type {
                    $(stringify!($name) => Some(<$name as FhirCodec>::shape()),)*
                    _ => None,
                }
            }

            fn deserialize_as<'de, D>(resource_type: &str, deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                match resource_type {
                    $(stringify!($name) => {
                        $name::deserialize(deserializer).map(|resource| Resource::$name(Box::new(resource)))
                    })*
                    other => Err(de::Error::custom(format_args!(
                        "unknown resourceType `{other}`"
                    ))),
                }
            }

            fn as_element(&self) -> &dyn FhirPathElement {
                match self {
                    $(Resource::$name(resource) => &**resource,)*
                }
            }
        }

        impl Serialize for Resource {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Resource::$name(resource) => resource.serialize(serializer),)*
                }
            }
        }

        impl FhirResource for Resource {
            fn resource_type(&self) -> &'static str {
                match self {
                    $(Resource::$name(resource) => resource.resource_type(),)*
                }
            }

            fn resource_id(&self) -> Option<&str> {
                match self {
                    $(Resource::$name(resource) => resource.resource_id(),)*
                }
            }
        }

        impl IntoEvaluationResult for Resource {
            fn to_evaluation_result(&self) -> EvaluationResult {
                match self {
                    $(Resource::$name(resource) => resource.to_evaluation_result(),)*
                }
            }
        }

        impl MemSize for Resource {
            fn mem_size(&self) -> usize {
                match self {
                    $(Resource::$name(resource) => resource.mem_size(),)*
                }
            }
        }

        $(
            impl FhirResource for $name {
                fn resource_type(&self) -> &'static str {
                    stringify!($name)
                }

                fn resource_id(&self) -> Option<&str> {
                    self.id.as_ref().and_then(|id| id.value.as_deref())
                }
            }

            impl From<$name> for Resource {
                fn from(resource: $name) -> Self {
                    Resource::$name(Box::new(resource))
                }
            }
        )*
    };
}

define_resources!(
    ActivityDefinition,
    Medication,
    Observation,
    Patient,
    ResearchElementDefinition,
);

impl_whole_codec!(Resource, Shape::Resource(Resource::shape_for));

impl FhirPathElement for Resource {
    fn type_name(&self) -> &'static str {
        self.as_element().type_name()
    }

    fn named_children(&self) -> Vec<(&'static str, &dyn FhirPathElement)> {
        self.as_element().named_children()
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ResourceVisitor)
    }
}

struct ResourceVisitor;

impl<'de> Visitor<'de> for ResourceVisitor {
    type Value = Resource;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a FHIR resource object with a resourceType")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Resource, A::Error> {
        let Some(first) = map.next_key::<std::string::String>()? else {
            return Err(de::Error::missing_field("resourceType"));
        };

        // Writers put the discriminator first almost always; then the rest of
        // the object can go straight to the concrete decoder.
        if first == "resourceType" {
            let resource_type: std::string::String = map.next_value()?;
            return Resource::deserialize_as(&resource_type, MapAccessDeserializer::new(map));
        }

        let mut buffered = serde_json::Map::new();
        let mut resource_type = None;
        buffered.insert(first, map.next_value::<serde_json::Value>()?);
        while let Some(key) = map.next_key::<std::string::String>()? {
            if key == "resourceType" {
                if resource_type.is_some() {
                    return Err(de::Error::custom("duplicate field `resourceType`"));
                }
                let value: std::string::String = map.next_value()?;
                buffered.insert(key, serde_json::Value::String(value.clone()));
                resource_type = Some(value);
                continue;
            }
            if buffered.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate field `{key}`")));
            }
            let value = map.next_value::<serde_json::Value>()?;
            buffered.insert(key, value);
        }

        let resource_type = resource_type.ok_or_else(|| de::Error::missing_field("resourceType"))?;
        Resource::deserialize_as(&resource_type, serde_json::Value::Object(buffered))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_covers_every_variant() {
        for name in Resource::TYPES {
            let shape = Resource::shape_for(name).unwrap();
            assert_eq!(shape.resource_type(), Some(*name));
        }
        assert!(Resource::shape_for("Bundle").is_none());
    }

    #[test]
    fn test_discriminator_not_first() {
        let resource: Resource = serde_json::from_value(json!({
            "id": "late",
            "status": "active",
            "resourceType": "Medication"
        }))
        .unwrap();
        assert_eq!(resource.resource_type(), "Medication");
        assert_eq!(resource.resource_id(), Some("late"));
    }

    #[test]
    fn test_unknown_resource_type() {
        let err = serde_json::from_value::<Resource>(json!({"resourceType": "Bundle"}))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown resourceType `Bundle`"), "{err}");
    }

    #[test]
    fn test_missing_resource_type() {
        let err = serde_json::from_value::<Resource>(json!({"id": "x"}))
            .unwrap_err()
            .to_string();
        assert!(err.contains("resourceType"), "{err}");
    }

    #[test]
    fn test_duplicate_key_while_buffering() {
        let err = serde_json::from_str::<Resource>(
            r#"{"id":"a","id":"b","resourceType":"Patient"}"#,
        )
        .unwrap_err()
        .to_string();
        assert!(err.contains("duplicate field `id`"), "{err}");
    }
}
