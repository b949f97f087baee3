//! Metadata types used by knowledge artifacts.

use super::*;
use crate::{FhirPath, FhirSerde, MemSize};

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct ContactDetail {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub name: Option<String>,
    pub telecom: Vec<ContactPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct RelatedArtifact {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub r#type: Code,
    pub label: Option<String>,
    pub display: Option<String>,
    pub citation: Option<Markdown>,
    pub url: Option<Url>,
    pub document: Option<Attachment>,
    pub resource: Option<Canonical>,
}

/// Context a knowledge artifact applies to. `value[x]` is required, so there
/// is no `Default`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub struct UsageContext {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub code: Coding,
    pub value: UsageContextValue,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum UsageContextValue {
    CodeableConcept(CodeableConcept),
    Quantity(Quantity),
    Range(Range),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Expression {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub description: Option<String>,
    pub name: Option<Id>,
    pub language: Code,
    pub expression: Option<String>,
    pub reference: Option<Uri>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct DataRequirement {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub r#type: Code,
    pub profile: Vec<Canonical>,
    pub subject: Option<DataRequirementSubject>,
    pub must_support: Vec<String>,
    pub code_filter: Vec<DataRequirementCodeFilter>,
    pub date_filter: Vec<DataRequirementDateFilter>,
    pub limit: Option<PositiveInt>,
    pub sort: Vec<DataRequirementSort>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum DataRequirementSubject {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct DataRequirementCodeFilter {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub path: Option<String>,
    pub search_param: Option<String>,
    pub value_set: Option<Canonical>,
    pub code: Vec<Coding>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct DataRequirementDateFilter {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub path: Option<String>,
    pub search_param: Option<String>,
    pub value: Option<DataRequirementDateFilterValue>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum DataRequirementDateFilterValue {
    DateTime(DateTime),
    Period(Period),
    Duration(Duration),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct DataRequirementSort {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub path: String,
    pub direction: Code,
}
