#![cfg(feature = "xml")]

use plait_fhir::FhirResource;
use plait_fhir::r4b::*;
use plait_serde::SerdeError;
use plait_serde::json::{from_json_str, to_json_string};
use plait_serde::xml::{from_xml_reader, from_xml_slice, from_xml_str, to_xml_string, to_xml_string_pretty};
use rust_decimal_macros::dec;

const DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// JSON -> model -> XML -> model -> JSON must give back the input text.
fn assert_json_survives_xml<T>(json: &str) -> std::string::String
where
    T: serde::Serialize + serde::de::DeserializeOwned + plait_serde_support::FhirCodec + PartialEq + std::fmt::Debug,
{
    let model: T = from_json_str(json).unwrap();
    let xml = to_xml_string(&model).unwrap();
    let back: T = from_xml_str(&xml).unwrap();
    assert_eq!(back, model, "{xml}");
    assert_eq!(to_json_string(&back).unwrap(), json);
    xml
}

#[test]
fn test_value_less_primitive_with_metadata() {
    let xml = assert_json_survives_xml::<Patient>(
        r#"{"resourceType":"Patient","_birthDate":{"id":"bd","extension":[{"url":"http://hl7.org/fhir/StructureDefinition/data-absent-reason","valueCode":"unknown"}]}}"#,
    );
    assert_eq!(
        xml,
        format!(
            r#"{DECL}<Patient xmlns="http://hl7.org/fhir"><birthDate id="bd"><extension url="http://hl7.org/fhir/StructureDefinition/data-absent-reason"><valueCode value="unknown"/></extension></birthDate></Patient>"#
        )
    );
}

#[test]
fn test_sparse_list() {
    let xml = assert_json_survives_xml::<Patient>(
        r#"{"resourceType":"Patient","name":[{"given":["a","b","c","d"],"_given":[null,null,{"id":"third"},null]}]}"#,
    );
    assert!(
        xml.contains(r#"<given value="b"/><given id="third" value="c"/><given value="d"/>"#),
        "{xml}"
    );
}

#[test]
fn test_list_without_values() {
    assert_json_survives_xml::<Patient>(
        r#"{"resourceType":"Patient","name":[{"_given":[{"id":"g1"},{"id":"g3"}]}]}"#,
    );
}

#[test]
fn test_choice_elements() {
    let xml = assert_json_survives_xml::<ActivityDefinition>(
        r#"{"resourceType":"ActivityDefinition","status":"draft","subjectCanonical":"http://example.org/cohort","_subjectCanonical":{"id":"s1"},"timingAge":{"value":18,"unit":"a"}}"#,
    );
    assert!(
        xml.contains(r#"<subjectCanonical id="s1" value="http://example.org/cohort"/>"#),
        "{xml}"
    );
}

#[test]
fn test_contained_resources() {
    let xml = assert_json_survives_xml::<Observation>(
        r##"{"resourceType":"Observation","contained":[{"resourceType":"Patient","id":"p1","active":true},{"resourceType":"Medication","id":"m1"}],"status":"final","code":{"text":"weight"},"subject":{"reference":"#p1"}}"##,
    );
    assert!(
        xml.contains(r#"<contained><Patient><id value="p1"/><active value="true"/></Patient></contained><contained><Medication><id value="m1"/></Medication></contained>"#),
        "{xml}"
    );
}

#[test]
fn test_narrative_markup() {
    let xml = assert_json_survives_xml::<Patient>(
        r#"{"resourceType":"Patient","text":{"status":"generated","div":"<div xmlns=\"http://www.w3.org/1999/xhtml\"><p>A &amp; <b>B</b></p></div>"}}"#,
    );
    assert!(xml.contains(r#"<p>A &amp; <b>B</b></p>"#), "{xml}");
}

#[test]
fn test_decimal_precision() {
    let xml = assert_json_survives_xml::<Observation>(
        r#"{"resourceType":"Observation","status":"final","code":{"text":"weight"},"valueQuantity":{"value":85.50,"unit":"kg"}}"#,
    );
    assert!(xml.contains(r#"<value value="85.50"/>"#), "{xml}");

    let observation: Observation = from_xml_str(&xml).unwrap();
    let Some(ObservationValue::Quantity(quantity)) = observation.value else {
        panic!("expected valueQuantity");
    };
    let value = quantity.value.and_then(|value| value.value).unwrap();
    assert_eq!(value.value(), Some(dec!(85.50)));
}

#[test]
fn test_pretty_document_reads_back() {
    let patient: Patient = from_json_str(
        r#"{"resourceType":"Patient","id":"p1","name":[{"family":"Chalmers","given":["Peter"]}],"multipleBirthInteger":2}"#,
    )
    .unwrap();
    let xml = to_xml_string_pretty(&patient).unwrap();
    assert!(xml.contains("\n  <id value=\"p1\"/>"), "{xml}");
    let back: Patient = from_xml_str(&xml).unwrap();
    assert_eq!(back, patient);
}

#[test]
fn test_polymorphic_root() {
    let xml = r#"<Medication xmlns="http://hl7.org/fhir"><id value="m1"/><status value="active"/></Medication>"#;
    let resource: Resource = from_xml_str(xml).unwrap();
    assert_eq!(resource.resource_type(), "Medication");
    assert_eq!(resource.resource_id(), Some("m1"));

    let from_bytes: Resource = from_xml_slice(xml.as_bytes()).unwrap();
    let from_reader: Resource = from_xml_reader(xml.as_bytes()).unwrap();
    assert_eq!(from_bytes, resource);
    assert_eq!(from_reader, resource);
}

#[test]
fn test_comments_are_ignored() {
    let patient: Patient = from_xml_str(
        r#"<Patient xmlns="http://hl7.org/fhir"><!-- test --><active value="true"/></Patient>"#,
    )
    .unwrap();
    assert_eq!(patient.active.and_then(|active| active.value), Some(true));
}

#[test]
fn test_wrong_namespace() {
    let err = from_xml_str::<Patient>(r#"<Patient xmlns="http://example.org"/>"#).unwrap_err();
    assert!(matches!(err, SerdeError::Namespace { .. }), "{err}");

    let err = from_xml_str::<Patient>(r#"<Patient/>"#).unwrap_err();
    assert!(matches!(err, SerdeError::Namespace { found: None, .. }), "{err}");
}

#[test]
fn test_div_outside_xhtml() {
    let err = from_xml_str::<Patient>(
        r#"<Patient xmlns="http://hl7.org/fhir"><text><status value="generated"/><div>x</div></text></Patient>"#,
    )
    .unwrap_err();
    assert!(matches!(err, SerdeError::Namespace { ref element, .. } if element == "div"), "{err}");
}

#[test]
fn test_unexpected_attribute() {
    let err = from_xml_str::<Patient>(
        r#"<Patient xmlns="http://hl7.org/fhir"><active value="true" flag="x"/></Patient>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, SerdeError::UnexpectedAttribute { ref attribute, .. } if attribute == "flag"),
        "{err}"
    );

    let err = from_xml_str::<Patient>(r#"<Patient xmlns="http://hl7.org/fhir" id="p1"/>"#).unwrap_err();
    assert!(matches!(err, SerdeError::UnexpectedAttribute { .. }), "{err}");
}

#[test]
fn test_unexpected_element() {
    let err = from_xml_str::<Patient>(
        r#"<Patient xmlns="http://hl7.org/fhir"><nickname value="Bob"/></Patient>"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "unexpected element `nickname` in `Patient`");
}

#[test]
fn test_unexpected_text() {
    let err = from_xml_str::<Patient>(
        r#"<Patient xmlns="http://hl7.org/fhir">hello<active value="true"/></Patient>"#,
    )
    .unwrap_err();
    assert!(matches!(err, SerdeError::UnexpectedText { ref text, .. } if text == "hello"), "{err}");
}

#[test]
fn test_repeated_single_element() {
    let err = from_xml_str::<Patient>(
        r#"<Patient xmlns="http://hl7.org/fhir"><active value="true"/><active value="false"/></Patient>"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("does not repeat"), "{err}");
}

#[test]
fn test_second_choice_variant_fails() {
    let err = from_xml_str::<Patient>(
        r#"<Patient xmlns="http://hl7.org/fhir"><deceasedBoolean value="true"/><deceasedDateTime value="2020"/></Patient>"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("deceased[x]"), "{err}");
}

#[test]
fn test_wrong_root() {
    let err = from_xml_str::<Patient>(r#"<Observation xmlns="http://hl7.org/fhir"/>"#).unwrap_err();
    assert!(err.to_string().contains("expected a `Patient` document"), "{err}");
}

#[test]
fn test_malformed_document() {
    let err = from_xml_str::<Patient>(r#"<Patient xmlns="http://hl7.org/fhir">"#).unwrap_err();
    assert!(matches!(err, SerdeError::XmlParse(_)), "{err}");
}

#[test]
fn test_invalid_typed_value() {
    let err = from_xml_str::<Patient>(
        r#"<Patient xmlns="http://hl7.org/fhir"><active value="yes"/></Patient>"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid boolean value"), "{err}");
}

#[test]
fn test_prefixed_narrative_round_trip() {
    let xml = r#"<Patient xmlns="http://hl7.org/fhir" xmlns:h="http://www.w3.org/1999/xhtml"><text><status value="generated"/><h:div><h:p>x</h:p></h:div></text></Patient>"#;
    let patient: Patient = from_xml_str(xml).unwrap();
    let div = &patient.text.as_ref().unwrap().div;
    assert_eq!(div.0, r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>x</p></div>"#);

    let written = to_xml_string(&patient).unwrap();
    let back: Patient = from_xml_str(&written).unwrap();
    assert_eq!(back, patient);
}
