//! General-purpose and special-purpose datatypes.

use super::*;
use crate::{FhirPath, FhirSerde, MemSize, Xhtml};

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Coding {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub system: Option<Uri>,
    pub version: Option<String>,
    pub code: Option<Code>,
    pub display: Option<String>,
    pub user_selected: Option<Boolean>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct CodeableConcept {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub coding: Vec<Coding>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Identifier {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub r#use: Option<Code>,
    pub r#type: Option<CodeableConcept>,
    pub system: Option<Uri>,
    pub value: Option<String>,
    pub period: Option<Period>,
    pub assigner: Option<Box<Reference>>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Reference {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub reference: Option<String>,
    pub r#type: Option<Uri>,
    pub identifier: Option<Box<Identifier>>,
    pub display: Option<String>,
}

impl Reference {
    /// A literal reference such as `Patient/example` or `#contained-id`.
    pub fn to(reference: &str) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Period {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Quantity {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub value: Option<Decimal>,
    pub comparator: Option<Code>,
    pub unit: Option<String>,
    pub system: Option<Uri>,
    pub code: Option<Code>,
}

pub type Age = Quantity;
pub type Count = Quantity;
pub type Duration = Quantity;
pub type SimpleQuantity = Quantity;

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Range {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub low: Option<SimpleQuantity>,
    pub high: Option<SimpleQuantity>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Ratio {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub numerator: Option<Quantity>,
    pub denominator: Option<SimpleQuantity>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Attachment {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub content_type: Option<Code>,
    pub language: Option<Code>,
    pub data: Option<Base64Binary>,
    pub url: Option<Url>,
    pub size: Option<UnsignedInt>,
    pub hash: Option<Base64Binary>,
    pub title: Option<String>,
    pub creation: Option<DateTime>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct ContactPoint {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub system: Option<Code>,
    pub value: Option<String>,
    pub r#use: Option<Code>,
    pub rank: Option<PositiveInt>,
    pub period: Option<Period>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct HumanName {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub r#use: Option<Code>,
    pub text: Option<String>,
    pub family: Option<String>,
    pub given: Vec<String>,
    pub prefix: Vec<String>,
    pub suffix: Vec<String>,
    pub period: Option<Period>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Address {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub r#use: Option<Code>,
    pub r#type: Option<Code>,
    pub text: Option<String>,
    pub line: Vec<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub period: Option<Period>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Annotation {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub author: Option<AnnotationAuthor>,
    pub time: Option<DateTime>,
    pub text: Markdown,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum AnnotationAuthor {
    Reference(Reference),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct SampledData {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub origin: SimpleQuantity,
    pub period: Decimal,
    pub factor: Option<Decimal>,
    pub lower_limit: Option<Decimal>,
    pub upper_limit: Option<Decimal>,
    pub dimensions: PositiveInt,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Timing {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub event: Vec<DateTime>,
    pub repeat: Option<TimingRepeat>,
    pub code: Option<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct TimingRepeat {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub bounds: Option<TimingRepeatBounds>,
    pub count: Option<PositiveInt>,
    pub count_max: Option<PositiveInt>,
    pub duration: Option<Decimal>,
    pub duration_max: Option<Decimal>,
    pub duration_unit: Option<Code>,
    pub frequency: Option<PositiveInt>,
    pub frequency_max: Option<PositiveInt>,
    pub period: Option<Decimal>,
    pub period_max: Option<Decimal>,
    pub period_unit: Option<Code>,
    pub day_of_week: Vec<Code>,
    pub time_of_day: Vec<Time>,
    pub when: Vec<Code>,
    pub offset: Option<UnsignedInt>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum TimingRepeatBounds {
    Duration(Duration),
    Range(Range),
    Period(Period),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Dosage {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub sequence: Option<Integer>,
    pub text: Option<String>,
    pub additional_instruction: Vec<CodeableConcept>,
    pub patient_instruction: Option<String>,
    pub timing: Option<Timing>,
    pub as_needed: Option<DosageAsNeeded>,
    pub site: Option<CodeableConcept>,
    pub route: Option<CodeableConcept>,
    pub method: Option<CodeableConcept>,
    pub dose_and_rate: Vec<DosageDoseAndRate>,
    pub max_dose_per_period: Option<Ratio>,
    pub max_dose_per_administration: Option<SimpleQuantity>,
    pub max_dose_per_lifetime: Option<SimpleQuantity>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum DosageAsNeeded {
    Boolean(Boolean),
    CodeableConcept(CodeableConcept),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct DosageDoseAndRate {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub r#type: Option<CodeableConcept>,
    pub dose: Option<DosageDoseAndRateDose>,
    pub rate: Option<DosageDoseAndRateRate>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum DosageDoseAndRateDose {
    Range(Range),
    Quantity(SimpleQuantity),
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum DosageDoseAndRateRate {
    Ratio(Ratio),
    Range(Range),
    Quantity(SimpleQuantity),
}

/// Resource metadata (`Resource.meta`).
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Meta {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub version_id: Option<Id>,
    pub last_updated: Option<Instant>,
    pub source: Option<Uri>,
    pub profile: Vec<Canonical>,
    pub security: Vec<Coding>,
    pub tag: Vec<Coding>,
}

/// Human-readable summary (`DomainResource.text`).
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Narrative {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub status: Code,
    pub div: Xhtml,
}
