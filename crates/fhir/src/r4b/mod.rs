//! FHIR R4B (4.3.0) model.
//!
//! Primitive aliases are named after their FHIR types, so `String` in this
//! module is the FHIR `string` primitive; plain Rust strings (element ids,
//! extension urls) are spelled `std::string::String`.
//!
//! Types with required (1..1) elements still implement `Default` so they can
//! be built with struct update syntax. The default leaves those elements
//! empty, which encodes without the key and fails to decode with
//! `missing field`; set them before encoding.

mod datatypes;
mod extension;
mod metadata;
mod resource;
mod resources;

pub use datatypes::*;
pub use extension::{Extension, ExtensionValue};
pub use metadata::*;
pub use resource::Resource;
pub use resources::*;

use crate::{
    Element, PreciseDecimal, PrecisionDate, PrecisionDateTime, PrecisionInstant, PrecisionTime,
};

pub type Boolean = Element<bool, Extension>;
pub type Integer = Element<i32, Extension>;
pub type PositiveInt = Element<u32, Extension>;
pub type UnsignedInt = Element<u32, Extension>;
pub type Decimal = Element<PreciseDecimal, Extension>;

pub type String = Element<std::string::String, Extension>;
pub type Code = Element<std::string::String, Extension>;
pub type Id = Element<std::string::String, Extension>;
pub type Markdown = Element<std::string::String, Extension>;
pub type Uri = Element<std::string::String, Extension>;
pub type Url = Element<std::string::String, Extension>;
pub type Canonical = Element<std::string::String, Extension>;
pub type Oid = Element<std::string::String, Extension>;
pub type Uuid = Element<std::string::String, Extension>;
pub type Base64Binary = Element<std::string::String, Extension>;

pub type Date = Element<PrecisionDate, Extension>;
pub type DateTime = Element<PrecisionDateTime, Extension>;
pub type Instant = Element<PrecisionInstant, Extension>;
pub type Time = Element<PrecisionTime, Extension>;
