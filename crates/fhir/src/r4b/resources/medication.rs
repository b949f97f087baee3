use crate::r4b::*;
use crate::{FhirPath, FhirSerde, MemSize};

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
#[fhir_serde(resource_type = "Medication")]
pub struct Medication {
    pub id: Option<Id>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<Uri>,
    pub language: Option<Code>,
    pub text: Option<Narrative>,
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub identifier: Vec<Identifier>,
    pub code: Option<CodeableConcept>,
    pub status: Option<Code>,
    pub manufacturer: Option<Reference>,
    pub form: Option<CodeableConcept>,
    pub amount: Option<Ratio>,
    pub ingredient: Vec<MedicationIngredient>,
    pub batch: Option<MedicationBatch>,
}

/// `item[x]` is required, so there is no `Default`.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub struct MedicationIngredient {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub item: MedicationIngredientItem,
    pub is_active: Option<Boolean>,
    pub strength: Option<Ratio>,
}

#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum MedicationIngredientItem {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct MedicationBatch {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub lot_number: Option<String>,
    pub expiration_date: Option<DateTime>,
}
