use crate::element::PrimitiveValue;
use crate::mem_size::MemSize;
use plait_fhirpath_support::{ConversionResult, EvaluationError, EvaluationResult, Quantity};
use plait_serde_support::PrimitiveKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A FHIR `decimal` that remembers how it was written.
///
/// `1.50` and `1.5` are the same number but not the same FHIR value: the
/// trailing zero carries precision. The original text is what gets written
/// back out; the parsed [`Decimal`] is there for arithmetic and is `None` only
/// when the text is outside what `rust_decimal` can represent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreciseDecimal {
    value: Option<Decimal>,
    original: String,
}

impl PreciseDecimal {
    pub fn from_parts(value: Option<Decimal>, original: String) -> Self {
        Self { value, original }
    }

    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    fn parse_text(text: &str) -> Option<Decimal> {
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }
}

impl From<Decimal> for PreciseDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            value: Some(value),
            original: value.to_string(),
        }
    }
}

impl FromStr for PreciseDecimal {
    type Err = serde_json::Error;

    /// Accepts any JSON number literal.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let number = serde_json::Number::from_str(text)?;
        let original = number.to_string();
        Ok(Self {
            value: Self::parse_text(&original),
            original,
        })
    }
}

impl Serialize for PreciseDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // With arbitrary_precision the number is emitted verbatim.
        let number = serde_json::Number::from_str(&self.original).map_err(serde::ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PreciseDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        let original = number.to_string();
        Ok(Self {
            value: Self::parse_text(&original),
            original,
        })
    }
}

impl MemSize for PreciseDecimal {
    fn mem_size(&self) -> usize {
        self.value.mem_size() + self.original.mem_size()
    }
}

impl PrimitiveValue for PreciseDecimal {
    const KIND: PrimitiveKind = PrimitiveKind::Decimal;
    const TYPE_NAME: &'static str = "decimal";

    fn evaluation_result(&self) -> EvaluationResult {
        match self.value {
            Some(value) => EvaluationResult::decimal(value),
            None => EvaluationResult::string(self.original.clone()),
        }
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.original.clone()))
    }

    fn to_boolean(&self) -> ConversionResult<bool> {
        Ok(match self.value {
            Some(value) if value == Decimal::ONE => Some(true),
            Some(value) if value.is_zero() => Some(false),
            _ => None,
        })
    }

    fn to_decimal(&self) -> ConversionResult<Decimal> {
        match self.value {
            Some(value) => Ok(Some(value)),
            None => Err(EvaluationError::InvalidValue {
                type_name: Self::TYPE_NAME.to_string(),
                message: format!("`{}` is out of range", self.original),
            }),
        }
    }

    fn to_quantity(&self) -> ConversionResult<Quantity> {
        Ok(self.to_decimal()?.map(|value| Quantity {
            value,
            unit: "1".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trailing_zero_round_trip() {
        let decimal: PreciseDecimal = serde_json::from_str("1.50").unwrap();
        assert_eq!(decimal.value(), Some(dec!(1.50)));
        assert_eq!(decimal.original(), "1.50");
        assert_eq!(serde_json::to_string(&decimal).unwrap(), "1.50");
    }

    #[test]
    fn test_integer_literal() {
        let decimal: PreciseDecimal = serde_json::from_str("42").unwrap();
        assert_eq!(decimal.value(), Some(dec!(42)));
        assert_eq!(serde_json::to_string(&decimal).unwrap(), "42");
    }

    #[test]
    fn test_through_value() {
        let value: serde_json::Value = serde_json::from_str(r#"{"v": 0.10}"#).unwrap();
        let decimal: PreciseDecimal = serde_json::from_value(value["v"].clone()).unwrap();
        assert_eq!(decimal.original(), "0.10");
    }

    #[test]
    fn test_conversions() {
        let one = PreciseDecimal::from(dec!(1.0));
        assert_eq!(one.to_boolean(), Ok(Some(true)));
        assert_eq!(one.to_integer(), Ok(None));
        let huge = PreciseDecimal::from_str("79228162514264337593543950336").unwrap();
        assert!(matches!(
            huge.to_decimal(),
            Err(EvaluationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_string_is_rejected() {
        assert!(serde_json::from_str::<PreciseDecimal>(r#""1.5""#).is_err());
    }
}
