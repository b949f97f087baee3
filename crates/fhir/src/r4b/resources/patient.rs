use crate::r4b::*;
use crate::{FhirPath, FhirSerde, MemSize};

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
#[fhir_serde(resource_type = "Patient")]
pub struct Patient {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub text: Option<Narrative>,
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub identifier: Vec<Identifier>,
    pub active: Option<Boolean>,
    pub name: Vec<HumanName>,
    pub telecom: Vec<ContactPoint>,
    pub gender: Option<Code>,
    pub birth_date: Option<Date>,
    pub deceased: Option<PatientDeceased>,
    pub address: Vec<Address>,
    pub marital_status: Option<CodeableConcept>,
    pub multiple_birth: Option<PatientMultipleBirth>,
    pub photo: Vec<Attachment>,
    pub contact: Vec<PatientContact>,
    pub communication: Vec<PatientCommunication>,
    pub general_practitioner: Vec<Reference>,
    pub managing_organization: Option<Reference>,
    pub link: Vec<PatientLink>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum PatientDeceased {
    Boolean(Boolean),
    DateTime(DateTime),
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum PatientMultipleBirth {
    Boolean(Boolean),
    Integer(Integer),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct PatientContact {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub relationship: Vec<CodeableConcept>,
    pub name: Option<HumanName>,
    pub telecom: Vec<ContactPoint>,
    pub address: Option<Address>,
    pub gender: Option<Code>,
    pub organization: Option<Reference>,
    pub period: Option<Period>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct PatientCommunication {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub language: CodeableConcept,
    pub preferred: Option<Boolean>,
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct PatientLink {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub other: Reference,
    pub r#type: Code,
}
