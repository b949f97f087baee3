use plait_fhir::FhirResource;
use plait_fhir::r4b::*;
use plait_serde::json::*;
use plait_serde::SerdeError;

const PATIENT: &str = r#"{"resourceType":"Patient","id":"pat1","active":true,"name":[{"family":"Chalmers","given":["Peter","James"],"_given":[null,{"id":"g2"}]}],"gender":"male","_birthDate":{"extension":[{"url":"http://hl7.org/fhir/StructureDefinition/data-absent-reason","valueCode":"unknown"}]},"deceasedBoolean":false}"#;

#[test]
fn test_string_round_trip_is_exact() {
    let patient: Patient = from_json_str(PATIENT).unwrap();
    assert_eq!(to_json_string(&patient).unwrap(), PATIENT);
}

#[test]
fn test_slice_and_reader_agree() {
    let from_slice: Patient = from_json_slice(PATIENT.as_bytes()).unwrap();
    let from_reader: Patient = from_json_reader(PATIENT.as_bytes()).unwrap();
    assert_eq!(from_slice, from_reader);
}

#[test]
fn test_value_round_trip_keeps_order() {
    let patient: Patient = from_json_str(PATIENT).unwrap();
    let value = to_json_value(&patient).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        ["resourceType", "id", "active", "name", "gender", "_birthDate", "deceasedBoolean"]
    );
    let back: Patient = from_json_value(value).unwrap();
    assert_eq!(back, patient);
}

#[test]
fn test_polymorphic_resource() {
    let resource: Resource = from_json_str(PATIENT).unwrap();
    assert_eq!(resource.resource_type(), "Patient");
    assert_eq!(resource.resource_id(), Some("pat1"));
    assert_eq!(to_json_string(&resource).unwrap(), PATIENT);
}

#[test]
fn test_pretty_output_parses_back() {
    let patient: Patient = from_json_str(PATIENT).unwrap();
    let pretty = to_json_string_pretty(&patient).unwrap();
    assert!(pretty.contains('\n'));
    let back: Patient = from_json_str(&pretty).unwrap();
    assert_eq!(back, patient);
}

#[test]
fn test_writer_output_matches_string() {
    let patient: Patient = from_json_str(PATIENT).unwrap();
    let mut buffer = Vec::new();
    to_json_writer(&mut buffer, &patient, false).unwrap();
    assert_eq!(buffer, to_json_vec(&patient).unwrap());
}

#[test]
fn test_codec_errors_surface_as_json_errors() {
    let err = from_json_str::<Patient>(r#"{"resourceType":"Patient","deceasedBoolean":true,"deceasedDateTime":"2020"}"#)
        .unwrap_err();
    assert!(matches!(err, SerdeError::Json(_)));
    assert!(err.to_string().contains("deceased[x]"), "{err}");
}
