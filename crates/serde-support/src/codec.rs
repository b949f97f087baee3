//! The per-field codec contract shared by every generated FHIR type.

use crate::shape::Shape;
use serde::de::{self, MapAccess};
use serde::ser::{self, SerializeMap};

/// Which role a wire key plays for a field.
///
/// `variant` selects the concrete type of a choice element and is always 0
/// for other fields. `metadata` marks the `_name` sibling of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMatch {
    pub variant: usize,
    pub metadata: bool,
}

impl KeyMatch {
    pub const VALUE: KeyMatch = KeyMatch {
        variant: 0,
        metadata: false,
    };

    pub const METADATA: KeyMatch = KeyMatch {
        variant: 0,
        metadata: true,
    };
}

/// Encoding and decoding of one FHIR field as a set of JSON object entries.
///
/// A field does not map to exactly one key: primitives split into `name` and
/// `_name`, choice elements into `name<Type>` and `_name<Type>`. The enclosing
/// type's visitor asks each of its fields whether it claims a key
/// ([`match_key`](FhirCodec::match_key)), feeds the value into that field's
/// slot, and assembles the struct once the object is exhausted. Keys can
/// therefore arrive in any order.
pub trait FhirCodec: Sized {
    /// Decode state for a single-valued field.
    type Slot: Default;
    /// Decode state for a repeating field.
    type ListSlot: Default;

    fn shape() -> Shape;

    /// Returns how `key` relates to a field named `name`, or `None` if the key
    /// belongs to some other field.
    fn match_key(name: &str, key: &str) -> Option<KeyMatch>;

    fn decode_entry<'de, A>(
        slot: &mut Self::Slot,
        key: &str,
        hit: KeyMatch,
        map: &mut A,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>;

    /// Produces the decoded value, or `None` if no key for the field was seen.
    fn finish<E: de::Error>(slot: Self::Slot, name: &str) -> Result<Option<Self>, E>;

    fn decode_list_entry<'de, A>(
        slot: &mut Self::ListSlot,
        key: &str,
        hit: KeyMatch,
        map: &mut A,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>;

    fn finish_list<E: de::Error>(slot: Self::ListSlot, name: &str) -> Result<Vec<Self>, E>;

    fn encode<M: SerializeMap>(&self, name: &str, map: &mut M) -> Result<(), M::Error>;

    /// Encodes a list. An empty list emits nothing.
    fn encode_list<M: SerializeMap>(items: &[Self], name: &str, map: &mut M)
    -> Result<(), M::Error>;
}

/// Helpers for types that occupy exactly one key holding their full serde form
/// (complex types, resources, bare strings).
pub mod whole {
    use super::*;
    use serde::{Deserialize, Serialize};

    pub fn match_key(name: &str, key: &str) -> Option<KeyMatch> {
        (name == key).then_some(KeyMatch::VALUE)
    }

    pub fn decode_entry<'de, T, A>(slot: &mut Option<T>, key: &str, map: &mut A) -> Result<(), A::Error>
    where
        T: Deserialize<'de>,
        A: MapAccess<'de>,
    {
        if slot.is_some() {
            return Err(de::Error::custom(format_args!("duplicate field `{key}`")));
        }
        *slot = Some(map.next_value()?);
        Ok(())
    }

    pub fn decode_list_entry<'de, T, A>(
        slot: &mut Option<Vec<T>>,
        key: &str,
        map: &mut A,
    ) -> Result<(), A::Error>
    where
        T: Deserialize<'de>,
        A: MapAccess<'de>,
    {
        if slot.is_some() {
            return Err(de::Error::custom(format_args!("duplicate field `{key}`")));
        }
        *slot = Some(map.next_value()?);
        Ok(())
    }

    pub fn encode<T, M>(value: &T, name: &str, map: &mut M) -> Result<(), M::Error>
    where
        T: Serialize + ?Sized,
        M: SerializeMap,
    {
        map.serialize_entry(name, value)
    }

    pub fn encode_list<T, M>(items: &[T], name: &str, map: &mut M) -> Result<(), M::Error>
    where
        T: Serialize,
        M: SerializeMap,
    {
        if items.is_empty() {
            return Ok(());
        }
        map.serialize_entry(name, items)
    }
}

/// Implements [`FhirCodec`] for a type encoded under a single key.
#[macro_export]
macro_rules! impl_whole_codec {
    ($ty:ty, $shape:expr) => {
        impl $crate::FhirCodec for $ty {
            type Slot = ::core::option::Option<$ty>;
            type ListSlot = ::core::option::Option<::std::vec::Vec<$ty>>;

            fn shape() -> $crate::Shape {
                $shape
            }

            fn match_key(name: &str, key: &str) -> ::core::option::Option<$crate::KeyMatch> {
                $crate::whole::match_key(name, key)
            }

            fn decode_entry<'de, A>(
                slot: &mut Self::Slot,
                key: &str,
                _hit: $crate::KeyMatch,
                map: &mut A,
            ) -> ::core::result::Result<(), A::Error>
            where
                A: $crate::__private::serde::de::MapAccess<'de>,
            {
                $crate::whole::decode_entry(slot, key, map)
            }

            fn finish<E: $crate::__private::serde::de::Error>(
                slot: Self::Slot,
                _name: &str,
            ) -> ::core::result::Result<::core::option::Option<Self>, E> {
                Ok(slot)
            }

            fn decode_list_entry<'de, A>(
                slot: &mut Self::ListSlot,
                key: &str,
                _hit: $crate::KeyMatch,
                map: &mut A,
            ) -> ::core::result::Result<(), A::Error>
            where
                A: $crate::__private::serde::de::MapAccess<'de>,
            {
                $crate::whole::decode_list_entry(slot, key, map)
            }

            fn finish_list<E: $crate::__private::serde::de::Error>(
                slot: Self::ListSlot,
                _name: &str,
            ) -> ::core::result::Result<::std::vec::Vec<Self>, E> {
                Ok(slot.unwrap_or_default())
            }

            fn encode<M: $crate::__private::serde::ser::SerializeMap>(
                &self,
                name: &str,
                map: &mut M,
            ) -> ::core::result::Result<(), M::Error> {
                $crate::whole::encode(self, name, map)
            }

            fn encode_list<M: $crate::__private::serde::ser::SerializeMap>(
                items: &[Self],
                name: &str,
                map: &mut M,
            ) -> ::core::result::Result<(), M::Error> {
                $crate::whole::encode_list(items, name, map)
            }
        }
    };
}

impl_whole_codec!(String, Shape::Plain);

impl<T: FhirCodec> FhirCodec for Box<T> {
    type Slot = T::Slot;
    type ListSlot = T::ListSlot;

    fn shape() -> Shape {
        T::shape()
    }

    fn match_key(name: &str, key: &str) -> Option<KeyMatch> {
        T::match_key(name, key)
    }

    fn decode_entry<'de, A>(
        slot: &mut Self::Slot,
        key: &str,
        hit: KeyMatch,
        map: &mut A,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        T::decode_entry(slot, key, hit, map)
    }

    fn finish<E: de::Error>(slot: Self::Slot, name: &str) -> Result<Option<Self>, E> {
        Ok(T::finish::<E>(slot, name)?.map(Box::new))
    }

    fn decode_list_entry<'de, A>(
        slot: &mut Self::ListSlot,
        key: &str,
        hit: KeyMatch,
        map: &mut A,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        T::decode_list_entry(slot, key, hit, map)
    }

    fn finish_list<E: de::Error>(slot: Self::ListSlot, name: &str) -> Result<Vec<Self>, E> {
        Ok(T::finish_list::<E>(slot, name)?
            .into_iter()
            .map(Box::new)
            .collect())
    }

    fn encode<M: SerializeMap>(&self, name: &str, map: &mut M) -> Result<(), M::Error> {
        (**self).encode(name, map)
    }

    // Boxes only break recursive single-valued references (Reference.identifier,
    // Identifier.assigner); repeating fields use Vec directly.
    fn encode_list<M: SerializeMap>(items: &[Self], name: &str, _map: &mut M) -> Result<(), M::Error> {
        if items.is_empty() {
            return Ok(());
        }
        Err(ser::Error::custom(format_args!(
            "boxed element `{name}` cannot repeat"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::Serializer;
    use serde::{Deserialize, Deserializer, Serialize};
    use std::fmt;

    /// Minimal hand-written host struct with one plain and one list field.
    #[derive(Debug, PartialEq)]
    struct Host {
        url: String,
        tags: Vec<String>,
    }

    impl Serialize for Host {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            self.url.encode("url", &mut map)?;
            String::encode_list(&self.tags, "tags", &mut map)?;
            map.end()
        }
    }

    impl<'de> Deserialize<'de> for Host {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct HostVisitor;

            impl<'de> Visitor<'de> for HostVisitor {
                type Value = Host;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    f.write_str("a Host object")
                }

                fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Host, A::Error> {
                    let mut url = <String as FhirCodec>::Slot::default();
                    let mut tags = <String as FhirCodec>::ListSlot::default();
                    while let Some(key) = map.next_key::<String>()? {
                        if let Some(hit) = String::match_key("url", &key) {
                            String::decode_entry(&mut url, &key, hit, &mut map)?;
                        } else if let Some(hit) = String::match_key("tags", &key) {
                            String::decode_list_entry(&mut tags, &key, hit, &mut map)?;
                        } else {
                            return Err(de::Error::custom(format_args!("unexpected field `{key}`")));
                        }
                    }
                    Ok(Host {
                        url: String::finish::<A::Error>(url, "url")?
                            .ok_or_else(|| de::Error::missing_field("url"))?,
                        tags: String::finish_list::<A::Error>(tags, "tags")?,
                    })
                }
            }

            deserializer.deserialize_map(HostVisitor)
        }
    }

    #[test]
    fn test_whole_codec_round_trip() {
        let host = Host {
            url: "http://example.org".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        };
        let json = serde_json::to_string(&host).unwrap();
        assert_eq!(json, r#"{"url":"http://example.org","tags":["a","b"]}"#);
        let back: Host = serde_json::from_str(&json).unwrap();
        assert_eq!(back, host);
    }

    #[test]
    fn test_empty_list_is_omitted() {
        let host = Host {
            url: "u".to_string(),
            tags: Vec::new(),
        };
        assert_eq!(serde_json::to_string(&host).unwrap(), r#"{"url":"u"}"#);
        let back: Host = serde_json::from_str(r#"{"url":"u"}"#).unwrap();
        assert!(back.tags.is_empty());
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let err = serde_json::from_str::<Host>(r#"{"url":"a","url":"b"}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field `url`"), "{err}");
    }

    #[test]
    fn test_plain_string_has_no_metadata_key() {
        assert_eq!(String::match_key("url", "url"), Some(KeyMatch::VALUE));
        assert_eq!(String::match_key("url", "_url"), None);
    }
}
