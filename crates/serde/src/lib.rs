//! # plait serialization
//!
//! JSON and XML entry points for the plait FHIR model.
//!
//! - **JSON**: thin wrappers around `serde_json`. The FHIR rules (primitive
//!   `_field` pairing, `value[x]` choice keys, `resourceType` dispatch) live in
//!   the `Serialize`/`Deserialize` impls generated for the model types.
//! - **XML** (feature `xml`): the writer renders the FHIR JSON form as XML with
//!   `quick-xml`; the reader parses with `roxmltree` and rebuilds the JSON form
//!   from the target type's field descriptors, so both formats are decoded by
//!   the same codec.
//!
//! ## FHIR JSON ↔ XML mapping
//!
//! | JSON | XML |
//! |------|-----|
//! | `{"active": true}` | `<active value="true"/>` |
//! | `{"birthDate": "1974-12-25", "_birthDate": {"id": "123"}}` | `<birthDate id="123" value="1974-12-25"/>` |
//! | `{"given": ["John", "Doe"]}` | `<given value="John"/><given value="Doe"/>` |
//! | `{"given": ["A", null], "_given": [null, {"id": "123"}]}` | `<given value="A"/><given id="123"/>` |
//! | `{"contained": [{"resourceType": "Patient"}]}` | `<contained><Patient/></contained>` |
//!
//! ## Example
//!
//! ```
//! use plait_serde::{from_json_str, to_json_string};
//! use plait_fhir::r4b::Patient;
//!
//! let patient: Patient = from_json_str(r#"{"resourceType":"Patient","active":true}"#).unwrap();
//! assert_eq!(to_json_string(&patient).unwrap(), r#"{"resourceType":"Patient","active":true}"#);
//! ```

pub mod error;
pub mod json;

#[cfg(feature = "xml")]
pub mod xml;

pub use error::{Result, SerdeError};

pub use json::{
    from_json_reader, from_json_slice, from_json_str, from_json_value, to_json_string,
    to_json_string_pretty, to_json_value, to_json_vec, to_json_writer,
};

#[cfg(feature = "xml")]
pub use xml::{
    from_xml_reader, from_xml_slice, from_xml_str, to_xml_string, to_xml_string_pretty,
    to_xml_vec, to_xml_writer,
};
