use crate::r4b::*;
use crate::{FhirPath, FhirSerde, MemSize};

/// A population, intervention or exposure used in research, defined by its
/// characteristics.
///
/// `status` and `type` are required; the `Default` value leaves them empty
/// and does not encode to a decodable document until they are set.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
#[fhir_serde(resource_type = "ResearchElementDefinition")]
pub struct ResearchElementDefinition {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub text: Option<Narrative>,
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub url: Option<Uri>,
    pub identifier: Vec<Identifier>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub subtitle: Option<String>,
    pub status: Code,
    pub experimental: Option<Boolean>,
    pub subject: Option<ResearchElementDefinitionSubject>,
    pub date: Option<DateTime>,
    pub publisher: Option<String>,
    pub contact: Vec<ContactDetail>,
    pub description: Option<Markdown>,
    pub comment: Vec<String>,
    pub use_context: Vec<UsageContext>,
    pub jurisdiction: Vec<CodeableConcept>,
    pub purpose: Option<Markdown>,
    pub usage: Option<String>,
    pub copyright: Option<Markdown>,
    pub approval_date: Option<Date>,
    pub last_review_date: Option<Date>,
    pub effective_period: Option<Period>,
    pub topic: Vec<CodeableConcept>,
    pub author: Vec<ContactDetail>,
    pub editor: Vec<ContactDetail>,
    pub reviewer: Vec<ContactDetail>,
    pub endorser: Vec<ContactDetail>,
    pub related_artifact: Vec<RelatedArtifact>,
    pub library: Vec<Canonical>,
    pub r#type: Code,
    pub variable_type: Option<Code>,
    pub characteristic: Vec<ResearchElementDefinitionCharacteristic>,
}

/// `ResearchElementDefinition.subject[x]`
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ResearchElementDefinitionSubject {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

/// One inclusion or exclusion criterion.
///
/// `studyEffective[x]` and `participantEffective[x]` share their sibling
/// prefix with plain fields (`studyEffectiveDescription`,
/// `studyEffectiveTimeFromStart`); the suffix decides which field a key
/// belongs to.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub struct ResearchElementDefinitionCharacteristic {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub definition: ResearchElementDefinitionCharacteristicDefinition,
    pub usage_context: Vec<UsageContext>,
    pub exclude: Option<Boolean>,
    pub unit_of_measure: Option<CodeableConcept>,
    pub study_effective_description: Option<String>,
    pub study_effective: Option<ResearchElementDefinitionCharacteristicEffective>,
    pub study_effective_time_from_start: Option<Duration>,
    pub study_effective_group_measure: Option<Code>,
    pub participant_effective_description: Option<String>,
    pub participant_effective: Option<ResearchElementDefinitionCharacteristicEffective>,
    pub participant_effective_time_from_start: Option<Duration>,
    pub participant_effective_group_measure: Option<Code>,
}

/// `ResearchElementDefinition.characteristic.definition[x]`
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ResearchElementDefinitionCharacteristicDefinition {
    CodeableConcept(CodeableConcept),
    Canonical(Canonical),
    Expression(Expression),
    DataRequirement(DataRequirement),
}

/// `studyEffective[x]` and `participantEffective[x]` allow the same types.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ResearchElementDefinitionCharacteristicEffective {
    DateTime(DateTime),
    Period(Period),
    Duration(Duration),
    Timing(Timing),
}
