//! Building blocks shared by the generated FHIR serializers.
//!
//! FHIR's JSON form does not line up one-to-one with Rust struct fields:
//!
//! - a primitive is split across `name` and `_name` (value and metadata),
//! - a choice element `value[x]` appears under one of several type-suffixed keys,
//! - a contained resource is tagged in-band by `resourceType`.
//!
//! The [`FhirCodec`] trait lets each field type describe which keys it owns and
//! how to assemble itself from them; the `FhirSerde` derive stitches these
//! together into `Serialize`/`Deserialize` impls. [`Shape`] tables describe the
//! same structure for formats such as XML that cannot be decoded without them.

mod codec;
mod primitive;
mod shape;

pub use codec::{FhirCodec, KeyMatch, whole};
pub use primitive::{
    DecodedPrimitive, IdAndExtensionHelper, IdAndExtensionOwned, PrimitiveListSlot, PrimitiveParts,
    PrimitiveSlot,
};
pub use shape::{FieldDescriptor, PrimitiveKind, ResolvedField, Shape, VariantDescriptor};

/// Encoding helpers for primitive fields, re-exported by path so generated code
/// can call `primitive::encode` and friends.
pub mod primitives {
    pub use crate::primitive::{encode, encode_list, match_key, metadata_key};
}

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
