use thiserror::Error;

/// Errors raised while projecting a FHIR element into FHIRPath values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The element's kind has no conversion to the requested type at all,
    /// e.g. `toBoolean()` on a CodeableConcept.
    #[error("cannot convert {from} to {to}")]
    KindNotConvertible { from: String, to: &'static str },

    /// The element holds a value that is malformed for its own type.
    #[error("invalid {type_name} value: {message}")]
    InvalidValue { type_name: String, message: String },
}

impl EvaluationError {
    pub fn not_convertible(from: impl Into<String>, to: &'static str) -> Self {
        EvaluationError::KindNotConvertible {
            from: from.into(),
            to,
        }
    }
}
