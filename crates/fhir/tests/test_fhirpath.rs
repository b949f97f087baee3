use plait_fhir::r4b::*;
use plait_fhir::{EvaluationError, EvaluationResult, FhirPathElement, IntoEvaluationResult, MemSize};

fn sample_patient() -> Patient {
    Patient {
        id: Some("p1".into()),
        identifier: vec![
            Identifier {
                value: Some("MRN-1".into()),
                ..Default::default()
            },
            Identifier {
                value: Some("MRN-2".into()),
                ..Default::default()
            },
        ],
        active: Some(true.into()),
        name: vec![
            HumanName {
                family: Some("Smith".into()),
                given: vec!["Jo".into(), "Ann".into()],
                ..Default::default()
            },
            HumanName {
                text: Some("J. Smith".into()),
                ..Default::default()
            },
        ],
        birth_date: Some(Date::from(plait_fhir::PrecisionDate::parse("1970-01-01").unwrap())),
        deceased: Some(PatientDeceased::Boolean(false.into())),
        ..Default::default()
    }
}

#[test]
fn test_children_in_declaration_order() {
    let patient = sample_patient();
    let names: Vec<_> = patient
        .named_children()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(
        names,
        [
            "id",
            "identifier",
            "identifier",
            "active",
            "name",
            "name",
            "birthDate",
            "deceased"
        ]
    );
}

#[test]
fn test_children_filter_keeps_list_order() {
    let patient = sample_patient();
    let identifiers = patient.children(&["identifier"]);
    let values: Vec<_> = identifiers
        .iter()
        .flat_map(|identifier| identifier.children(&["value"]))
        .map(|value| value.to_string_value().unwrap().unwrap())
        .collect();
    assert_eq!(values, ["MRN-1", "MRN-2"]);

    let given: Vec<_> = patient.name[0]
        .children(&["given"])
        .iter()
        .map(|given| given.to_string_value().unwrap().unwrap())
        .collect();
    assert_eq!(given, ["Jo", "Ann"]);

    assert!(patient.children(&["telecom"]).is_empty());
    assert_eq!(patient.children(&[]).len(), patient.named_children().len());
}

#[test]
fn test_children_is_fresh_per_call() {
    let patient = sample_patient();
    let first = patient.children(&["name"]);
    let second = patient.children(&["name"]);
    assert_eq!(first.len(), 2);
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_choice_child_is_transparent() {
    let observation = Observation {
        status: "final".into(),
        value: Some(ObservationValue::Quantity(Quantity {
            unit: Some("kg".into()),
            ..Default::default()
        })),
        ..Default::default()
    };
    let value = observation.children(&["value"]);
    assert_eq!(value.len(), 1);
    assert_eq!(value[0].type_name(), "Quantity");
    assert!(observation.children(&["valueQuantity"]).is_empty());
}

#[test]
fn test_complex_types_do_not_convert() {
    let patient = sample_patient();
    assert_eq!(
        patient.to_boolean(),
        Err(EvaluationError::KindNotConvertible {
            from: "Patient".to_string(),
            to: "Boolean"
        })
    );
    assert!(matches!(
        patient.to_string_value(),
        Err(EvaluationError::KindNotConvertible { .. })
    ));
    assert!(patient.to_integer().is_err());
    assert!(patient.to_decimal().is_err());
    assert!(patient.to_date().is_err());
    assert!(patient.to_time().is_err());
    assert!(patient.to_date_time().is_err());
    assert!(patient.to_quantity().is_err());

    let concept = CodeableConcept::default();
    assert_eq!(
        concept.to_quantity(),
        Err(EvaluationError::KindNotConvertible {
            from: "CodeableConcept".to_string(),
            to: "Quantity"
        })
    );

    let resource = Resource::from(patient);
    assert!(resource.to_boolean().is_err());
    assert_eq!(resource.type_name(), "Patient");
}

#[test]
fn test_primitive_conversions() {
    let patient = sample_patient();
    let active = patient.active.as_ref().unwrap();
    assert_eq!(active.to_boolean(), Ok(Some(true)));
    assert_eq!(active.to_string_value(), Ok(Some("true".to_string())));

    let birth_date = patient.birth_date.as_ref().unwrap();
    assert_eq!(birth_date.to_date(), Ok(Some("1970-01-01".to_string())));
    assert_eq!(birth_date.to_integer(), Ok(None));

    let deceased = patient.deceased.as_ref().unwrap();
    assert_eq!(deceased.type_name(), "boolean");
    assert_eq!(deceased.to_boolean(), Ok(Some(false)));

    let empty = Code {
        id: Some("x".to_string()),
        ..Default::default()
    };
    assert_eq!(empty.to_string_value(), Ok(None));
}

#[test]
fn test_evaluation_result_object() {
    let patient = sample_patient();
    let EvaluationResult::Object { map, type_info } = patient.to_evaluation_result() else {
        panic!("resources evaluate to objects");
    };
    assert_eq!(type_info.unwrap().name, "Patient");
    assert_eq!(map["resourceType"], EvaluationResult::string("Patient"));
    assert_eq!(map["identifier"].count(), 2);
    assert!(!map.contains_key("telecom"));
    assert!(matches!(map["active"], EvaluationResult::Boolean(true, _)));
    assert!(matches!(map["deceased"], EvaluationResult::Boolean(false, _)));
}

#[test]
fn test_mem_size_is_structural() {
    let name = HumanName {
        family: Some("Smith".into()),
        given: vec!["Jo".into()],
        ..Default::default()
    };
    assert_eq!(name.mem_size(), 7);

    let patient = Patient {
        id: Some("p1".into()),
        name: vec![name.clone()],
        ..Default::default()
    };
    assert_eq!(patient.mem_size(), 9);
    assert_eq!(Resource::from(patient.clone()).mem_size(), patient.mem_size());

    let mut larger = patient.clone();
    larger.name.push(name);
    assert_eq!(larger.mem_size(), 16);
}
