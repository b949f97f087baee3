//! # Plait FHIR model
//!
//! Strongly-typed Rust representations of FHIR elements together with the
//! wire-format rules that make FHIR JSON and XML awkward for plain serde:
//!
//! - **Primitives** are [`Element<V, E>`]: an optional value plus optional
//!   `id`/`extension` metadata, written under `name` and `_name`.
//! - **Choice elements** (`value[x]`) are enums whose variant picks the wire
//!   key suffix, e.g. `ActivityDefinitionSubject::Canonical` is written as
//!   `subjectCanonical`.
//! - **Contained resources** live in the [`r4b::Resource`] enum and are
//!   dispatched on `resourceType`.
//!
//! The per-type code is produced by the `FhirSerde`, `FhirPath` and `MemSize`
//! derives from `plait-fhir-macro`.
//!
//! ```
//! use plait_fhir::r4b::{Code, Medication};
//!
//! let medication = Medication {
//!     status: Some(Code {
//!         id: Some("a1".to_string()),
//!         ..Code::from("active")
//!     }),
//!     ..Default::default()
//! };
//! let json = serde_json::to_string(&medication).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"resourceType":"Medication","status":"active","_status":{"id":"a1"}}"#
//! );
//! ```

extern crate self as plait_fhir;

mod decimal;
mod element;
mod mem_size;
mod precision;
mod resource;
mod xhtml;

#[cfg(feature = "R4B")]
pub mod r4b;

pub use decimal::PreciseDecimal;
pub use element::{Element, PrimitiveValue};
pub use mem_size::MemSize;
pub use precision::{
    InvalidTemporal, PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime,
};
pub use resource::FhirResource;
pub use xhtml::Xhtml;

pub use plait_fhir_macro::{FhirPath, FhirSerde, MemSize};
pub use plait_fhirpath_support::{
    EvaluationError, EvaluationResult, FhirPathElement, IntoEvaluationResult,
};
pub use plait_serde_support::{FhirCodec, Shape};
