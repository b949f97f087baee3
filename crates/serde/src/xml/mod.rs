//! FHIR XML.
//!
//! Both directions go through the FHIR JSON form held in a
//! `serde_json::Value`:
//!
//! - **Writing** serializes the resource to a `Value` and renders it with
//!   `quick-xml`. Primitives become `value`/`id` attributes plus `extension`
//!   children, `_field` metadata arrays are merged with their value arrays by
//!   position, contained resources are wrapped in their field element and the
//!   narrative `div` is copied through in the XHTML namespace.
//! - **Reading** parses with `roxmltree`, walks the target type's
//!   [`Shape`](plait_serde_support::Shape) to decide which children repeat and
//!   how each `value` attribute is typed, and hands the rebuilt `Value` to the
//!   type's codec.
//!
//! ```xml
//! <Patient xmlns="http://hl7.org/fhir">
//!   <birthDate id="bd1" value="1974-12-25">
//!     <extension url="http://example.org/precision">
//!       <valueCode value="day"/>
//!     </extension>
//!   </birthDate>
//!   <name>
//!     <given value="A"/>
//!     <given id="g2"/>
//!   </name>
//! </Patient>
//! ```

pub mod de;
pub mod ser;
mod utils;

pub use de::{from_xml_reader, from_xml_slice, from_xml_str, xml_to_json_value};
pub use ser::{XmlSerializer, to_xml_string, to_xml_string_pretty, to_xml_vec, to_xml_writer};
pub use utils::{FHIR_NAMESPACE, XHTML_NAMESPACE};
