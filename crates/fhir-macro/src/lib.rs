//! Derive macros for the plait FHIR model.
//!
//! - `FhirSerde` implements the FHIR JSON layout on top of
//!   `plait_serde_support::FhirCodec`: structs get `Serialize`, `Deserialize`
//!   and `FhirCodec`; choice enums (`value[x]`) get `FhirCodec` only.
//! - `FhirPath` implements `plait_fhirpath_support::FhirPathElement` and
//!   `IntoEvaluationResult`.
//! - `MemSize` implements `plait_fhir::MemSize`.
//!
//! Field cardinality is read off the Rust type: `T` is required, `Option<T>`
//! optional and `Vec<T>` repeating. Wire names default to the lowerCamelCase
//! field name.
//!
//! ```ignore
//! #[derive(FhirSerde, FhirPath, MemSize)]
//! #[fhir_serde(resource_type = "Medication")]
//! pub struct Medication {
//!     pub id: Option<Id>,
//!     pub code: Option<CodeableConcept>,
//!     #[fhir_serde(rename = "ingredient")]
//!     pub ingredients: Vec<MedicationIngredient>,
//! }
//!
//! #[derive(FhirSerde, FhirPath, MemSize)]
//! pub enum MedicationIngredientItem {
//!     CodeableConcept(CodeableConcept),
//!     Reference(Reference),
//! }
//! ```

mod fhir_path;
mod fhir_serde;
mod mem_size;
mod model;

use model::Container;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

fn derive_with(
    input: TokenStream,
    expand: fn(&Container) -> proc_macro2::TokenStream,
) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match Container::parse(&input) {
        Ok(container) => expand(&container).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[proc_macro_derive(FhirSerde, attributes(fhir_serde))]
pub fn fhir_serde_derive(input: TokenStream) -> TokenStream {
    derive_with(input, fhir_serde::expand)
}

#[proc_macro_derive(FhirPath, attributes(fhir_serde))]
pub fn fhir_path_derive(input: TokenStream) -> TokenStream {
    derive_with(input, fhir_path::expand)
}

#[proc_macro_derive(MemSize, attributes(fhir_serde))]
pub fn mem_size_derive(input: TokenStream) -> TokenStream {
    derive_with(input, mem_size::expand)
}
