//! Value/metadata pairing for FHIR primitives.
//!
//! In FHIR JSON a primitive's value and its `id`/`extension` metadata travel
//! under two sibling keys:
//!
//! ```json
//! {
//!   "status": "draft",
//!   "_status": { "id": "a1" }
//! }
//! ```
//!
//! Lists use parallel arrays where `null` marks "nothing at this position":
//!
//! ```json
//! {
//!   "given": ["Alice", null],
//!   "_given": [null, { "id": "g1" }]
//! }
//! ```

use crate::codec::KeyMatch;
use serde::de::{self, MapAccess};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

/// Borrowed view of a primitive element, used when encoding.
pub trait PrimitiveParts {
    type Value: Serialize;
    type Extension: Serialize;

    fn value(&self) -> Option<&Self::Value>;
    fn id(&self) -> Option<&str>;
    fn extension(&self) -> &[Self::Extension];

    /// Whether the `_name` sibling must be written.
    fn has_metadata(&self) -> bool {
        self.id().is_some() || !self.extension().is_empty()
    }
}

/// Helper struct for serializing id and extension metadata for FHIR primitives.
///
/// Only the `_fieldName` object is produced here; the value itself is written
/// separately under the plain field name.
#[derive(Serialize)]
pub struct IdAndExtensionHelper<'a, E> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "no_extensions")]
    pub extension: &'a [E],
}

fn no_extensions<E>(extension: &&[E]) -> bool {
    extension.is_empty()
}

/// Owned form of the `_fieldName` object, used during deserialization.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdAndExtensionOwned<E> {
    pub id: Option<String>,
    #[serde(default = "Vec::new")]
    pub extension: Vec<E>,
}

impl<E> IdAndExtensionOwned<E> {
    /// `{}` carries nothing and reads as absent.
    fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.is_empty()
    }
}

impl<E> Default for IdAndExtensionOwned<E> {
    fn default() -> Self {
        Self {
            id: None,
            extension: Vec::new(),
        }
    }
}

/// A primitive reassembled from its value key and metadata key.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPrimitive<V, E> {
    pub value: Option<V>,
    pub id: Option<String>,
    pub extension: Vec<E>,
}

impl<V, E> DecodedPrimitive<V, E> {
    fn from_parts(value: Option<V>, metadata: Option<IdAndExtensionOwned<E>>) -> Self {
        let metadata = metadata.unwrap_or_default();
        Self {
            value,
            id: metadata.id,
            extension: metadata.extension,
        }
    }
}

/// Matches `name` (value) and `_name` (metadata).
pub fn match_key(name: &str, key: &str) -> Option<KeyMatch> {
    if key == name {
        Some(KeyMatch::VALUE)
    } else if key.strip_prefix('_') == Some(name) {
        Some(KeyMatch::METADATA)
    } else {
        None
    }
}

/// The `_name` key for a field.
pub fn metadata_key(name: &str) -> String {
    format!("_{name}")
}

fn duplicate<E: de::Error>(key: &str) -> E {
    E::custom(format_args!("duplicate field `{key}`"))
}

/// Decode state of a single-valued primitive.
pub struct PrimitiveSlot<V, E> {
    value: Option<V>,
    metadata: Option<IdAndExtensionOwned<E>>,
    seen_value: bool,
    seen_metadata: bool,
}

impl<V, E> Default for PrimitiveSlot<V, E> {
    fn default() -> Self {
        Self {
            value: None,
            metadata: None,
            seen_value: false,
            seen_metadata: false,
        }
    }
}

impl<V, E> PrimitiveSlot<V, E> {
    pub fn absorb<'de, A>(&mut self, key: &str, hit: KeyMatch, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
        V: Deserialize<'de>,
        E: Deserialize<'de>,
    {
        if hit.metadata {
            if self.seen_metadata {
                return Err(duplicate(key));
            }
            self.seen_metadata = true;
            self.metadata = map.next_value()?;
        } else {
            if self.seen_value {
                return Err(duplicate(key));
            }
            self.seen_value = true;
            self.value = map.next_value()?;
        }
        Ok(())
    }

    /// `None` when neither key carried anything.
    pub fn finish(self) -> Option<DecodedPrimitive<V, E>> {
        let metadata = self.metadata.filter(|metadata| !metadata.is_empty());
        if self.value.is_none() && metadata.is_none() {
            return None;
        }
        Some(DecodedPrimitive::from_parts(self.value, metadata))
    }
}

/// Decode state of a repeating primitive (two parallel arrays).
pub struct PrimitiveListSlot<V, E> {
    values: Option<Vec<Option<V>>>,
    metadata: Option<Vec<Option<IdAndExtensionOwned<E>>>>,
}

impl<V, E> Default for PrimitiveListSlot<V, E> {
    fn default() -> Self {
        Self {
            values: None,
            metadata: None,
        }
    }
}

impl<V, E> PrimitiveListSlot<V, E> {
    pub fn absorb<'de, A>(&mut self, key: &str, hit: KeyMatch, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
        V: Deserialize<'de>,
        E: Deserialize<'de>,
    {
        if hit.metadata {
            if self.metadata.is_some() {
                return Err(duplicate(key));
            }
            self.metadata = Some(map.next_value()?);
        } else {
            if self.values.is_some() {
                return Err(duplicate(key));
            }
            self.values = Some(map.next_value()?);
        }
        Ok(())
    }

    /// Zips the two arrays back together. Both arrays, when present, must have
    /// the same length. Positions with neither a value nor metadata are
    /// dropped, matching [`encode_list`].
    pub fn finish<D: de::Error>(self, name: &str) -> Result<Vec<DecodedPrimitive<V, E>>, D> {
        let values = self.values.unwrap_or_default();
        let metadata = self.metadata.unwrap_or_default();
        if !values.is_empty() && !metadata.is_empty() && values.len() != metadata.len() {
            return Err(D::custom(format_args!(
                "`_{name}` has {} entries but `{name}` has {}; the arrays must align",
                metadata.len(),
                values.len()
            )));
        }

        let len = values.len().max(metadata.len());
        let mut values = values.into_iter();
        let mut metadata = metadata.into_iter();
        Ok((0..len)
            .filter_map(|_| {
                let value = values.next().flatten();
                let metadata = metadata.next().flatten().filter(|m| !m.is_empty());
                (value.is_some() || metadata.is_some())
                    .then(|| DecodedPrimitive::from_parts(value, metadata))
            })
            .collect())
    }
}

/// Writes `name` if the value is present and `_name` if metadata is present.
pub fn encode<P, M>(item: &P, name: &str, map: &mut M) -> Result<(), M::Error>
where
    P: PrimitiveParts,
    M: SerializeMap,
{
    if let Some(value) = item.value() {
        map.serialize_entry(name, value)?;
    }
    if item.has_metadata() {
        map.serialize_entry(
            &metadata_key(name),
            &IdAndExtensionHelper {
                id: item.id(),
                extension: item.extension(),
            },
        )?;
    }
    Ok(())
}

/// Writes a primitive list as parallel arrays.
///
/// Items with neither a value nor metadata are skipped. The value array is
/// omitted when no item has a value and the metadata array when no item has
/// metadata; otherwise each array spans the remaining items with `null` at
/// positions that have nothing to say.
pub fn encode_list<P, M>(items: &[P], name: &str, map: &mut M) -> Result<(), M::Error>
where
    P: PrimitiveParts,
    M: SerializeMap,
{
    let items: Vec<&P> = items
        .iter()
        .filter(|item| item.value().is_some() || item.has_metadata())
        .collect();
    if items.iter().any(|item| item.value().is_some()) {
        let values: Vec<Option<&P::Value>> = items.iter().map(|item| item.value()).collect();
        map.serialize_entry(name, &values)?;
    }
    if items.iter().any(|item| item.has_metadata()) {
        let metadata: Vec<Option<IdAndExtensionHelper<'_, P::Extension>>> = items
            .iter()
            .map(|item| {
                item.has_metadata().then(|| IdAndExtensionHelper {
                    id: item.id(),
                    extension: item.extension(),
                })
            })
            .collect();
        map.serialize_entry(&metadata_key(name), &metadata)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;
    use serde_json::json;

    struct Item {
        value: Option<String>,
        id: Option<String>,
        extension: Vec<String>,
    }

    impl PrimitiveParts for Item {
        type Value = String;
        type Extension = String;

        fn value(&self) -> Option<&String> {
            self.value.as_ref()
        }

        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn extension(&self) -> &[String] {
            &self.extension
        }
    }

    fn item(value: Option<&str>, id: Option<&str>) -> Item {
        Item {
            value: value.map(str::to_string),
            id: id.map(str::to_string),
            extension: Vec::new(),
        }
    }

    struct List<'a>(&'a [Item]);

    impl Serialize for List<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            encode_list(self.0, "given", &mut map)?;
            map.end()
        }
    }

    struct Single<'a>(&'a Item);

    impl Serialize for Single<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            encode(self.0, "status", &mut map)?;
            map.end()
        }
    }

    #[test]
    fn test_single_value_and_id() {
        let value = serde_json::to_value(Single(&item(Some("draft"), Some("a1")))).unwrap();
        assert_eq!(value, json!({"status": "draft", "_status": {"id": "a1"}}));
    }

    #[test]
    fn test_single_metadata_only() {
        let value = serde_json::to_value(Single(&item(None, Some("a1")))).unwrap();
        assert_eq!(value, json!({"_status": {"id": "a1"}}));
    }

    #[test]
    fn test_sparse_metadata_positions() {
        let items = [
            item(Some("a"), None),
            item(Some("b"), None),
            item(Some("c"), Some("third")),
            item(Some("d"), None),
        ];
        let value = serde_json::to_value(List(&items)).unwrap();
        assert_eq!(
            value,
            json!({
                "given": ["a", "b", "c", "d"],
                "_given": [null, null, {"id": "third"}, null]
            })
        );
    }

    #[test]
    fn test_value_array_omitted_without_values() {
        let items = [item(None, Some("x")), item(None, Some("y"))];
        let value = serde_json::to_value(List(&items)).unwrap();
        assert_eq!(value, json!({"_given": [{"id": "x"}, {"id": "y"}]}));
    }

    #[test]
    fn test_metadata_array_omitted_without_metadata() {
        let items = [item(Some("a"), None), item(Some("b"), None)];
        let value = serde_json::to_value(List(&items)).unwrap();
        assert_eq!(value, json!({"given": ["a", "b"]}));
    }

    #[test]
    fn test_empty_items_are_skipped() {
        let items = [item(Some("a"), None), item(None, None), item(None, Some("c"))];
        let value = serde_json::to_value(List(&items)).unwrap();
        assert_eq!(value, json!({"given": ["a", null], "_given": [null, {"id": "c"}]}));
    }

    fn decode_single(json: serde_json::Value) -> Option<DecodedPrimitive<String, String>> {
        let mut slot = PrimitiveSlot::<String, String>::default();
        slot.value = serde_json::from_value(json["status"].clone()).unwrap();
        slot.metadata = serde_json::from_value(json["_status"].clone()).unwrap();
        slot.finish()
    }

    fn decode_list(json: serde_json::Value) -> Vec<DecodedPrimitive<String, String>> {
        let slot = PrimitiveListSlot::<String, String> {
            values: serde_json::from_value(json["given"].clone()).unwrap(),
            metadata: serde_json::from_value(json["_given"].clone()).unwrap(),
        };
        slot.finish::<serde_json::Error>("given").unwrap()
    }

    #[test]
    fn test_empty_metadata_object_is_absent() {
        assert_eq!(decode_single(json!({"_status": {}})), None);

        let decoded = decode_single(json!({"status": "draft", "_status": {}})).unwrap();
        assert_eq!(decoded.value.as_deref(), Some("draft"));
        assert_eq!(decoded.id, None);
    }

    #[test]
    fn test_empty_list_positions_are_dropped() {
        assert!(decode_list(json!({"given": [null, null]})).is_empty());

        let decoded = decode_list(json!({
            "given": ["a", null, null],
            "_given": [null, {}, {"id": "c"}]
        }));
        let parts: Vec<_> = decoded
            .iter()
            .map(|item| (item.value.as_deref(), item.id.as_deref()))
            .collect();
        assert_eq!(parts, [(Some("a"), None), (None, Some("c"))]);
    }

    #[test]
    fn test_match_key() {
        assert_eq!(match_key("status", "status"), Some(KeyMatch::VALUE));
        assert_eq!(match_key("status", "_status"), Some(KeyMatch::METADATA));
        assert_eq!(match_key("status", "statusReason"), None);
        assert_eq!(match_key("status", "__status"), None);
    }
}
