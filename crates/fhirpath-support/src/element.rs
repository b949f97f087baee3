use crate::evaluation_error::EvaluationError;
use crate::evaluation_result::IntoEvaluationResult;
use rust_decimal::Decimal;

/// A FHIRPath quantity literal: a decimal value with a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub value: Decimal,
    pub unit: String,
}

/// Conversion result: `Ok(None)` is the empty collection, i.e. a value that
/// exists but cannot be represented in the target type.
pub type ConversionResult<T> = Result<Option<T>, EvaluationError>;

/// The view of a FHIR element that an external FHIRPath evaluator needs.
///
/// Implemented by every generated type. Navigation goes through
/// [`children`](FhirPathElement::children); the `to_*` methods back the
/// `toBoolean()`, `toString()` ... functions. Only primitives convert, so the
/// defaults fail with [`EvaluationError::KindNotConvertible`].
pub trait FhirPathElement: IntoEvaluationResult {
    /// The FHIR type name, e.g. `boolean`, `CodeableConcept`, `Patient`.
    fn type_name(&self) -> &'static str;

    /// Immediate children with their element names, in declaration order.
    ///
    /// Absent fields are skipped and list fields contribute one entry per
    /// item. Choice fields are reported under their base name (`value`, not
    /// `valueQuantity`).
    fn named_children(&self) -> Vec<(&'static str, &dyn FhirPathElement)>;

    /// Children whose element name is in `names`, or every child when
    /// `names` is empty.
    fn children(&self, names: &[&str]) -> Vec<&dyn FhirPathElement> {
        self.named_children()
            .into_iter()
            .filter(|(name, _)| names.is_empty() || names.contains(name))
            .map(|(_, child)| child)
            .collect()
    }

    fn to_boolean(&self) -> ConversionResult<bool> {
        Err(EvaluationError::not_convertible(self.type_name(), "Boolean"))
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Err(EvaluationError::not_convertible(self.type_name(), "String"))
    }

    fn to_integer(&self) -> ConversionResult<i64> {
        Err(EvaluationError::not_convertible(self.type_name(), "Integer"))
    }

    fn to_decimal(&self) -> ConversionResult<Decimal> {
        Err(EvaluationError::not_convertible(self.type_name(), "Decimal"))
    }

    /// Returns the date in FHIRPath literal form (`2024`, `2024-03`, `2024-03-01`).
    fn to_date(&self) -> ConversionResult<String> {
        Err(EvaluationError::not_convertible(self.type_name(), "Date"))
    }

    fn to_time(&self) -> ConversionResult<String> {
        Err(EvaluationError::not_convertible(self.type_name(), "Time"))
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        Err(EvaluationError::not_convertible(self.type_name(), "DateTime"))
    }

    fn to_quantity(&self) -> ConversionResult<Quantity> {
        Err(EvaluationError::not_convertible(self.type_name(), "Quantity"))
    }
}

impl std::fmt::Debug for dyn FhirPathElement + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.type_name(), self.to_evaluation_result())
    }
}

/// Plain strings (element ids, extension urls) behave as FHIR `string`.
impl FhirPathElement for String {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn named_children(&self) -> Vec<(&'static str, &dyn FhirPathElement)> {
        Vec::new()
    }

    fn to_boolean(&self) -> ConversionResult<bool> {
        Ok(string_to_boolean(self))
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.clone()))
    }

    fn to_integer(&self) -> ConversionResult<i64> {
        Ok(string_to_integer(self))
    }

    fn to_decimal(&self) -> ConversionResult<Decimal> {
        Ok(string_to_decimal(self))
    }

    fn to_quantity(&self) -> ConversionResult<Quantity> {
        Ok(string_to_quantity(self))
    }

    fn to_date(&self) -> ConversionResult<String> {
        Ok(is_partial_date(self).then(|| self.clone()))
    }

    fn to_date_time(&self) -> ConversionResult<String> {
        let valid = match self.split_once('T') {
            Some((date, time)) => is_partial_date(date) && (time.is_empty() || is_zoned_time(time)),
            None => is_partial_date(self),
        };
        Ok(valid.then(|| self.clone()))
    }

    fn to_time(&self) -> ConversionResult<String> {
        Ok(is_partial_time(self).then(|| self.clone()))
    }
}

fn digits(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn is_partial_date(text: &str) -> bool {
    let mut parts = text.split('-');
    let year_ok = parts.next().is_some_and(|year| digits(year, 4));
    let rest: Vec<&str> = parts.collect();
    year_ok && rest.len() <= 2 && rest.iter().all(|part| digits(part, 2))
}

/// `hh`, `hh:mm`, `hh:mm:ss` or `hh:mm:ss.fff`.
fn is_partial_time(text: &str) -> bool {
    let (clock, fraction) = match text.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (text, None),
    };
    let parts: Vec<&str> = clock.split(':').collect();
    let clock_ok = parts.len() <= 3 && parts.iter().all(|part| digits(part, 2));
    let fraction_ok = match fraction {
        Some(fraction) => parts.len() == 3 && digits(fraction, fraction.len()) && !fraction.is_empty(),
        None => true,
    };
    clock_ok && fraction_ok
}

/// A partial time followed by an optional `Z` or `±hh:mm` offset.
fn is_zoned_time(text: &str) -> bool {
    let clock = match text.strip_suffix('Z') {
        Some(clock) => clock,
        None => match text.rfind(['+', '-']) {
            Some(split) => {
                let offset = &text[split + 1..];
                let offset_ok = offset
                    .split_once(':')
                    .is_some_and(|(hours, minutes)| digits(hours, 2) && digits(minutes, 2));
                if !offset_ok {
                    return false;
                }
                &text[..split]
            }
            None => text,
        },
    };
    is_partial_time(clock)
}

/// `toBoolean()` on a string: the FHIRPath spelling table, case-insensitive.
pub fn string_to_boolean(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// `toInteger()` on a string: an optional sign followed by digits only.
pub fn string_to_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// `toDecimal()` on a string. Exponent notation is not a FHIRPath decimal.
pub fn string_to_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        return None;
    }
    text.parse().ok()
}

/// `toQuantity()` on a string: `<number> ['<unit>']`, unit defaulting to `1`.
pub fn string_to_quantity(text: &str) -> Option<Quantity> {
    let text = text.trim();
    let (number, rest) = match text.find(' ') {
        Some(split) => (&text[..split], text[split..].trim()),
        None => (text, ""),
    };
    let value = string_to_decimal(number)?;
    let unit = if rest.is_empty() {
        "1".to_string()
    } else {
        rest.strip_prefix('\'')?.strip_suffix('\'')?.to_string()
    };
    Some(Quantity { value, unit })
}
