use crate::r4b::*;
use crate::{FhirPath, FhirSerde, MemSize};

/// The definition of an activity to be performed, independent of a patient,
/// practitioner or other performance context.
///
/// `status` is required; `ActivityDefinition::default()` leaves it empty and
/// does not encode to a decodable document until it is set.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
#[fhir_serde(resource_type = "ActivityDefinition")]
pub struct ActivityDefinition {
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
    pub subtitle: Option<String>,
    pub status: Code,
    pub experimental: Option<Boolean>,
    pub subject: Option<ActivityDefinitionSubject>,
    pub date: Option<DateTime>,
    pub publisher: Option<String>,
    pub contact: Vec<ContactDetail>,
    pub description: Option<Markdown>,
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
    pub kind: Option<Code>,
    pub profile: Option<Canonical>,
    pub code: Option<CodeableConcept>,
    pub intent: Option<Code>,
    pub priority: Option<Code>,
    pub do_not_perform: Option<Boolean>,
    pub timing: Option<ActivityDefinitionTiming>,
    pub location: Option<Reference>,
    pub participant: Vec<ActivityDefinitionParticipant>,
    pub product: Option<ActivityDefinitionProduct>,
    pub quantity: Option<SimpleQuantity>,
    pub dosage: Vec<Dosage>,
    pub body_site: Vec<CodeableConcept>,
    pub specimen_requirement: Vec<Reference>,
    pub observation_requirement: Vec<Reference>,
    pub observation_result_requirement: Vec<Reference>,
    pub transform: Option<Canonical>,
    pub dynamic_value: Vec<ActivityDefinitionDynamicValue>,
}

/// `ActivityDefinition.subject[x]`
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ActivityDefinitionSubject {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
    Canonical(Canonical),
}

/// `ActivityDefinition.timing[x]`
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ActivityDefinitionTiming {
    Timing(Timing),
    DateTime(DateTime),
    Age(Age),
    Period(Period),
    Range(Range),
    Duration(Duration),
}

/// `ActivityDefinition.product[x]`
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ActivityDefinitionProduct {
    Reference(Reference),
    CodeableConcept(CodeableConcept),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct ActivityDefinitionParticipant {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub r#type: Code,
    pub role: Option<CodeableConcept>,
}

/// A value computed at apply time and written into the target resource at
/// `path`.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct ActivityDefinitionDynamicValue {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub path: String,
    pub expression: Expression,
}
