use rust_decimal::Decimal;
use std::collections::HashMap;

/// Type annotation attached to an evaluation result.
///
/// FHIRPath distinguishes `System.String` from `FHIR.string`; the namespace
/// records which one a value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfoResult {
    pub namespace: String,
    pub name: String,
}

impl TypeInfoResult {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// A type from the `FHIR` namespace, e.g. `FHIR.code`.
    pub fn fhir(name: &str) -> Self {
        Self::new("FHIR", name)
    }

    /// A type from the `System` namespace, e.g. `System.Integer`.
    pub fn system(name: &str) -> Self {
        Self::new("System", name)
    }
}

/// A value as seen by a FHIRPath evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    Empty,
    Boolean(bool, Option<TypeInfoResult>),
    String(String, Option<TypeInfoResult>),
    Decimal(Decimal, Option<TypeInfoResult>),
    Integer(i64, Option<TypeInfoResult>),
    Date(String, Option<TypeInfoResult>),
    DateTime(String, Option<TypeInfoResult>),
    Time(String, Option<TypeInfoResult>),
    /// Value and unit.
    Quantity(Decimal, String, Option<TypeInfoResult>),
    Collection {
        items: Vec<EvaluationResult>,
        has_undefined_order: bool,
        type_info: Option<TypeInfoResult>,
    },
    Object {
        map: HashMap<String, EvaluationResult>,
        type_info: Option<TypeInfoResult>,
    },
}

impl EvaluationResult {
    pub fn boolean(value: bool) -> Self {
        EvaluationResult::Boolean(value, None)
    }

    pub fn string(value: impl Into<String>) -> Self {
        EvaluationResult::String(value.into(), None)
    }

    pub fn integer(value: i64) -> Self {
        EvaluationResult::Integer(value, None)
    }

    pub fn decimal(value: Decimal) -> Self {
        EvaluationResult::Decimal(value, None)
    }

    /// An ordered collection; an empty input collapses to `Empty`.
    pub fn collection(items: Vec<EvaluationResult>) -> Self {
        if items.is_empty() {
            EvaluationResult::Empty
        } else {
            EvaluationResult::Collection {
                items,
                has_undefined_order: false,
                type_info: None,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EvaluationResult::Empty)
    }

    /// Number of items this result contributes to a collection.
    pub fn count(&self) -> usize {
        match self {
            EvaluationResult::Empty => 0,
            EvaluationResult::Collection { items, .. } => items.len(),
            _ => 1,
        }
    }

    pub fn type_info(&self) -> Option<&TypeInfoResult> {
        match self {
            EvaluationResult::Empty => None,
            EvaluationResult::Boolean(_, info)
            | EvaluationResult::String(_, info)
            | EvaluationResult::Decimal(_, info)
            | EvaluationResult::Integer(_, info)
            | EvaluationResult::Date(_, info)
            | EvaluationResult::DateTime(_, info)
            | EvaluationResult::Time(_, info)
            | EvaluationResult::Quantity(_, _, info) => info.as_ref(),
            EvaluationResult::Collection { type_info, .. }
            | EvaluationResult::Object { type_info, .. } => type_info.as_ref(),
        }
    }

    /// Replaces the type annotation. `Empty` stays untyped.
    pub fn with_type_info(self, info: TypeInfoResult) -> Self {
        let info = Some(info);
        match self {
            EvaluationResult::Empty => EvaluationResult::Empty,
            EvaluationResult::Boolean(v, _) => EvaluationResult::Boolean(v, info),
            EvaluationResult::String(v, _) => EvaluationResult::String(v, info),
            EvaluationResult::Decimal(v, _) => EvaluationResult::Decimal(v, info),
            EvaluationResult::Integer(v, _) => EvaluationResult::Integer(v, info),
            EvaluationResult::Date(v, _) => EvaluationResult::Date(v, info),
            EvaluationResult::DateTime(v, _) => EvaluationResult::DateTime(v, info),
            EvaluationResult::Time(v, _) => EvaluationResult::Time(v, info),
            EvaluationResult::Quantity(v, unit, _) => EvaluationResult::Quantity(v, unit, info),
            EvaluationResult::Collection {
                items,
                has_undefined_order,
                ..
            } => EvaluationResult::Collection {
                items,
                has_undefined_order,
                type_info: info,
            },
            EvaluationResult::Object { map, .. } => EvaluationResult::Object {
                map,
                type_info: info,
            },
        }
    }
}

/// Conversion of model values into [`EvaluationResult`]s.
pub trait IntoEvaluationResult {
    fn to_evaluation_result(&self) -> EvaluationResult;
}

impl IntoEvaluationResult for bool {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::boolean(*self)
    }
}

impl IntoEvaluationResult for i32 {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::integer(i64::from(*self))
    }
}

impl IntoEvaluationResult for u32 {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::integer(i64::from(*self))
    }
}

impl IntoEvaluationResult for i64 {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::integer(*self)
    }
}

impl IntoEvaluationResult for String {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::string(self.clone())
    }
}

impl IntoEvaluationResult for Decimal {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::decimal(*self)
    }
}

impl<T: IntoEvaluationResult> IntoEvaluationResult for Option<T> {
    fn to_evaluation_result(&self) -> EvaluationResult {
        match self {
            Some(value) => value.to_evaluation_result(),
            None => EvaluationResult::Empty,
        }
    }
}

impl<T: IntoEvaluationResult> IntoEvaluationResult for Vec<T> {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::collection(
            self.iter()
                .map(IntoEvaluationResult::to_evaluation_result)
                .filter(|result| !result.is_empty())
                .collect(),
        )
    }
}

impl<T: IntoEvaluationResult + ?Sized> IntoEvaluationResult for Box<T> {
    fn to_evaluation_result(&self) -> EvaluationResult {
        (**self).to_evaluation_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_vec_collapses_to_empty() {
        let items: Vec<String> = Vec::new();
        assert_eq!(items.to_evaluation_result(), EvaluationResult::Empty);
    }

    #[test]
    fn test_vec_keeps_order() {
        let items = vec!["b".to_string(), "a".to_string()];
        match items.to_evaluation_result() {
            EvaluationResult::Collection {
                items,
                has_undefined_order,
                ..
            } => {
                assert!(!has_undefined_order);
                assert_eq!(
                    items,
                    vec![EvaluationResult::string("b"), EvaluationResult::string("a")]
                );
            }
            other => panic!("expected a collection, got {other:?}"),
        }
    }

    #[test]
    fn test_with_type_info() {
        let result = EvaluationResult::decimal(dec!(1.50)).with_type_info(TypeInfoResult::fhir("decimal"));
        assert_eq!(result.type_info(), Some(&TypeInfoResult::fhir("decimal")));
        assert_eq!(result.count(), 1);
        assert_eq!(
            EvaluationResult::Empty.with_type_info(TypeInfoResult::system("String")),
            EvaluationResult::Empty
        );
    }
}
