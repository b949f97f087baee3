use crate::r4b::*;
use crate::{FhirPath, FhirSerde, MemSize};

/// Measurements and simple assertions about a patient or other subject.
///
/// `status` is required and must be set on a `Default` value before it
/// encodes to a decodable document.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
#[fhir_serde(resource_type = "Observation")]
pub struct Observation {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub text: Option<Narrative>,
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub identifier: Vec<Identifier>,
    pub based_on: Vec<Reference>,
    pub part_of: Vec<Reference>,
    pub status: Code,
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Option<Reference>,
    pub focus: Vec<Reference>,
    pub encounter: Option<Reference>,
    pub effective: Option<ObservationEffective>,
    pub issued: Option<Instant>,
    pub performer: Vec<Reference>,
    pub value: Option<ObservationValue>,
    pub data_absent_reason: Option<CodeableConcept>,
    pub interpretation: Vec<CodeableConcept>,
    pub note: Vec<Annotation>,
    pub body_site: Option<CodeableConcept>,
    pub method: Option<CodeableConcept>,
    pub specimen: Option<Reference>,
    pub device: Option<Reference>,
    pub reference_range: Vec<ObservationReferenceRange>,
    pub has_member: Vec<Reference>,
    pub derived_from: Vec<Reference>,
    pub component: Vec<ObservationComponent>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ObservationEffective {
    DateTime(DateTime),
    Period(Period),
    Timing(Timing),
    Instant(Instant),
}

/// `Observation.value[x]`, shared with `Observation.component.value[x]`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ObservationValue {
    Quantity(Quantity),
    CodeableConcept(CodeableConcept),
    String(String),
    Boolean(Boolean),
    Integer(Integer),
    Range(Range),
    Ratio(Ratio),
    SampledData(SampledData),
    Time(Time),
    DateTime(DateTime),
    Period(Period),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct ObservationReferenceRange {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub low: Option<SimpleQuantity>,
    pub high: Option<SimpleQuantity>,
    pub r#type: Option<CodeableConcept>,
    pub applies_to: Vec<CodeableConcept>,
    pub age: Option<Range>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct ObservationComponent {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub code: CodeableConcept,
    pub value: Option<ObservationValue>,
    pub data_absent_reason: Option<CodeableConcept>,
    pub interpretation: Vec<CodeableConcept>,
    pub reference_range: Vec<ObservationReferenceRange>,
}
