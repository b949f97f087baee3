//! # Plait FHIRPath Support
//!
//! The contract between the FHIR model in `plait-fhir` and an external
//! FHIRPath evaluator. The model crate implements these traits (mostly via
//! the `FhirPath` derive in `plait-fhir-macro`); an evaluator only needs this
//! crate to walk element trees and convert primitive values.
//!
//! - [`FhirPathElement`]: type name, ordered child enumeration and the
//!   `toBoolean()` / `toString()` / ... conversion functions.
//! - [`IntoEvaluationResult`] / [`EvaluationResult`]: value snapshots.
//! - [`EvaluationError`]: conversion failures.

mod element;
mod evaluation_error;
mod evaluation_result;

pub use element::{
    ConversionResult, FhirPathElement, Quantity, string_to_boolean, string_to_decimal,
    string_to_integer, string_to_quantity,
};
pub use evaluation_error::EvaluationError;
pub use evaluation_result::{EvaluationResult, IntoEvaluationResult, TypeInfoResult};
pub use rust_decimal::Decimal;
