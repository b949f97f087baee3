use crate::mem_size::MemSize;
use plait_fhirpath_support::{
    ConversionResult, EvaluationResult, FhirPathElement, IntoEvaluationResult, Quantity,
    TypeInfoResult,
};
use plait_serde_support::{
    DecodedPrimitive, FhirCodec, KeyMatch, PrimitiveKind, PrimitiveListSlot, PrimitiveParts,
    PrimitiveSlot, Shape, primitives,
};
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, MapAccess};
use serde::ser::SerializeMap;
use serde::Serialize;
use std::fmt;

/// A FHIR primitive: an optional value plus optional element metadata.
///
/// Any combination is valid, including metadata without a value:
///
/// ```json
/// { "_status": { "extension": [ { "url": "...", "valueCode": "unknown" } ] } }
/// ```
///
/// `V` is the Rust value type, `E` the extension type of the FHIR release.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<V, E> {
    pub id: Option<String>,
    pub extension: Vec<E>,
    pub value: Option<V>,
}

impl<V, E> Default for Element<V, E> {
    fn default() -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            value: None,
        }
    }
}

impl<V, E> Element<V, E> {
    pub fn new(value: V) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// True when neither a value nor any metadata is present.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.id.is_none() && self.extension.is_empty()
    }
}

impl<V, E> From<V> for Element<V, E> {
    fn from(value: V) -> Self {
        Element::new(value)
    }
}

impl<E> From<&str> for Element<String, E> {
    fn from(value: &str) -> Self {
        Element::new(value.to_string())
    }
}

impl<V, E> Element<V, E> {
    fn from_decoded(decoded: DecodedPrimitive<V, E>) -> Self {
        Self {
            id: decoded.id,
            extension: decoded.extension,
            value: decoded.value,
        }
    }
}

/// A Rust type that can back a FHIR primitive.
///
/// Besides its JSON kind and FHIR type name, a value type knows how it
/// converts under the FHIRPath `toX()` functions. Conversions that do not
/// apply return `Ok(None)`.
pub trait PrimitiveValue: Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + MemSize {
    const KIND: PrimitiveKind;
    const TYPE_NAME: &'static str;

    fn evaluation_result(&self) -> EvaluationResult;

    fn to_string_value(&self) -> ConversionResult<String>;

    fn to_boolean(&self) -> ConversionResult<bool> {
        Ok(None)
    }

    fn to_integer(&self) -> ConversionResult<i64> {
        Ok(None)
    }

    fn to_decimal(&self) -> ConversionResult<Decimal> {
        Ok(None)
    }

    fn to_date(&self) -> ConversionResult<String> {
        Ok(None)
    }

    fn to_time(&self) -> ConversionResult<String> {
        Ok(None)
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        Ok(None)
    }

    fn to_quantity(&self) -> ConversionResult<Quantity> {
        Ok(None)
    }
}

impl PrimitiveValue for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Boolean;
    const TYPE_NAME: &'static str = "boolean";

    fn evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::boolean(*self)
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.to_string()))
    }

    fn to_boolean(&self) -> ConversionResult<bool> {
        Ok(Some(*self))
    }

    fn to_integer(&self) -> ConversionResult<i64> {
        Ok(Some(i64::from(*self)))
    }

    fn to_decimal(&self) -> ConversionResult<Decimal> {
        Ok(Some(if *self { Decimal::ONE } else { Decimal::ZERO }))
    }

    fn to_quantity(&self) -> ConversionResult<Quantity> {
        Ok(self.to_decimal()?.map(|value| Quantity {
            value,
            unit: "1".to_string(),
        }))
    }
}

macro_rules! impl_integer_value {
    ($ty:ty, $type_name:literal) => {
        impl PrimitiveValue for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::Integer;
            const TYPE_NAME: &'static str = $type_name;

            fn evaluation_result(&self) -> EvaluationResult {
                EvaluationResult::integer(i64::from(*self))
            }

            fn to_string_value(&self) -> ConversionResult<String> {
                Ok(Some(self.to_string()))
            }

            fn to_boolean(&self) -> ConversionResult<bool> {
                Ok(match *self {
                    1 => Some(true),
                    0 => Some(false),
                    _ => None,
                })
            }

            fn to_integer(&self) -> ConversionResult<i64> {
                Ok(Some(i64::from(*self)))
            }

            fn to_decimal(&self) -> ConversionResult<Decimal> {
                Ok(Some(Decimal::from(*self)))
            }

            fn to_quantity(&self) -> ConversionResult<Quantity> {
                Ok(Some(Quantity {
                    value: Decimal::from(*self),
                    unit: "1".to_string(),
                }))
            }
        }
    };
}

impl_integer_value!(i32, "integer");
impl_integer_value!(u32, "unsignedInt");

impl PrimitiveValue for String {
    const KIND: PrimitiveKind = PrimitiveKind::String;
    const TYPE_NAME: &'static str = "string";

    fn evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::string(self.clone())
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        FhirPathElement::to_string_value(self)
    }

    fn to_boolean(&self) -> ConversionResult<bool> {
        FhirPathElement::to_boolean(self)
    }

    fn to_integer(&self) -> ConversionResult<i64> {
        FhirPathElement::to_integer(self)
    }

    fn to_decimal(&self) -> ConversionResult<Decimal> {
        FhirPathElement::to_decimal(self)
    }

    fn to_date(&self) -> ConversionResult<String> {
        FhirPathElement::to_date(self)
    }

    fn to_time(&self) -> ConversionResult<String> {
        FhirPathElement::to_time(self)
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        FhirPathElement::to_date_time(self)
    }

    fn to_quantity(&self) -> ConversionResult<Quantity> {
        FhirPathElement::to_quantity(self)
    }
}

impl<V, E> PrimitiveParts for Element<V, E>
where
    V: Serialize,
    E: Serialize,
{
    type Value = V;
    type Extension = E;

    fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[E] {
        &self.extension
    }
}

impl<V, E> FhirCodec for Element<V, E>
where
    V: PrimitiveValue,
    E: FhirCodec + Serialize + DeserializeOwned,
{
    type Slot = PrimitiveSlot<V, E>;
    type ListSlot = PrimitiveListSlot<V, E>;

    fn shape() -> Shape {
        Shape::Primitive {
            kind: V::KIND,
            extension: E::shape,
        }
    }

    fn match_key(name: &str, key: &str) -> Option<KeyMatch> {
        primitives::match_key(name, key)
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
        slot.absorb(key, hit, map)
    }

    fn finish<D: de::Error>(slot: Self::Slot, _name: &str) -> Result<Option<Self>, D> {
        Ok(slot.finish().map(Element::from_decoded))
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
        slot.absorb(key, hit, map)
    }

    fn finish_list<D: de::Error>(slot: Self::ListSlot, name: &str) -> Result<Vec<Self>, D> {
        Ok(slot
            .finish::<D>(name)?
            .into_iter()
            .map(Element::from_decoded)
            .collect())
    }

    fn encode<M: SerializeMap>(&self, name: &str, map: &mut M) -> Result<(), M::Error> {
        primitives::encode(self, name, map)
    }

    fn encode_list<M: SerializeMap>(items: &[Self], name: &str, map: &mut M) -> Result<(), M::Error> {
        primitives::encode_list(items, name, map)
    }
}

impl<V, E> IntoEvaluationResult for Element<V, E>
where
    V: PrimitiveValue,
{
    fn to_evaluation_result(&self) -> EvaluationResult {
        match &self.value {
            Some(value) => value
                .evaluation_result()
                .with_type_info(TypeInfoResult::fhir(V::TYPE_NAME)),
            None => EvaluationResult::Empty,
        }
    }
}

impl<V, E> FhirPathElement for Element<V, E>
where
    V: PrimitiveValue,
    E: FhirPathElement,
{
    fn type_name(&self) -> &'static str {
        V::TYPE_NAME
    }

    fn named_children(&self) -> Vec<(&'static str, &dyn FhirPathElement)> {
        let mut children: Vec<(&'static str, &dyn FhirPathElement)> = Vec::new();
        if let Some(id) = &self.id {
            children.push(("id", id as &dyn FhirPathElement));
        }
        for extension in &self.extension {
            children.push(("extension", extension as &dyn FhirPathElement));
        }
        children
    }

    fn to_boolean(&self) -> ConversionResult<bool> {
        self.value.as_ref().map_or(Ok(None), V::to_boolean)
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        self.value.as_ref().map_or(Ok(None), V::to_string_value)
    }

    fn to_integer(&self) -> ConversionResult<i64> {
        self.value.as_ref().map_or(Ok(None), V::to_integer)
    }

    fn to_decimal(&self) -> ConversionResult<Decimal> {
        self.value.as_ref().map_or(Ok(None), V::to_decimal)
    }

    fn to_date(&self) -> ConversionResult<String> {
        self.value.as_ref().map_or(Ok(None), V::to_date)
    }

    fn to_time(&self) -> ConversionResult<String> {
        self.value.as_ref().map_or(Ok(None), V::to_time)
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        self.value.as_ref().map_or(Ok(None), V::to_date_time)
    }

    fn to_quantity(&self) -> ConversionResult<Quantity> {
        self.value.as_ref().map_or(Ok(None), V::to_quantity)
    }
}

impl<V: MemSize, E: MemSize> MemSize for Element<V, E> {
    fn mem_size(&self) -> usize {
        self.id.mem_size() + self.extension.mem_size() + self.value.mem_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_conversions() {
        assert_eq!(PrimitiveValue::to_integer(&true), Ok(Some(1)));
        assert_eq!(PrimitiveValue::to_decimal(&false), Ok(Some(Decimal::ZERO)));
        assert_eq!(PrimitiveValue::to_date(&true), Ok(None));
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(PrimitiveValue::to_boolean(&1i32), Ok(Some(true)));
        assert_eq!(PrimitiveValue::to_boolean(&2i32), Ok(None));
        assert_eq!(PrimitiveValue::to_string_value(&42u32), Ok(Some("42".to_string())));
        assert_eq!(
            PrimitiveValue::to_quantity(&3i32),
            Ok(Some(Quantity {
                value: Decimal::from(3),
                unit: "1".to_string()
            }))
        );
    }

    #[test]
    fn test_element_is_empty() {
        let element: Element<String, String> = Element::default();
        assert!(element.is_empty());
        let element: Element<String, String> = Element {
            id: Some("a1".to_string()),
            ..Default::default()
        };
        assert!(!element.is_empty());
    }
}
