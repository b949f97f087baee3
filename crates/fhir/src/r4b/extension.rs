use super::*;
use crate::{FhirPath, FhirSerde, MemSize};

/// Additional content defined by implementations.
///
/// `url` is a plain string (an XML attribute), and an extension either
/// carries a `value[x]` or nested extensions, never both.
#[derive(Debug, Clone, PartialEq, Default, FhirSerde, FhirPath, MemSize)]
pub struct Extension {
    pub id: Option<std::string::String>,
    pub extension: Vec<Extension>,
    pub url: std::string::String,
    pub value: Option<ExtensionValue>,
}

impl Extension {
    pub fn new(url: impl Into<std::string::String>, value: ExtensionValue) -> Self {
        Self {
            url: url.into(),
            value: Some(value),
            ..Default::default()
        }
    }
}

/// `Extension.value[x]`: the R4B open type list minus the money, contact and
/// signature families.
#[derive(Debug, Clone, PartialEq, FhirSerde, FhirPath, MemSize)]
pub enum ExtensionValue {
    Base64Binary(Base64Binary),
    Boolean(Boolean),
    Canonical(Canonical),
    Code(Code),
    Date(Date),
    DateTime(DateTime),
    Decimal(Decimal),
    Id(Id),
    Instant(Instant),
    Integer(Integer),
    Markdown(Markdown),
    Oid(Oid),
    PositiveInt(PositiveInt),
    String(String),
    Time(Time),
    UnsignedInt(UnsignedInt),
    Uri(Uri),
    Url(Url),
    Uuid(Uuid),
    Address(Address),
    Age(Age),
    Annotation(Annotation),
    Attachment(Attachment),
    CodeableConcept(CodeableConcept),
    Coding(Coding),
    ContactPoint(ContactPoint),
    Count(Count),
    Duration(Duration),
    HumanName(HumanName),
    Identifier(Identifier),
    Period(Period),
    Quantity(Quantity),
    Range(Range),
    Ratio(Ratio),
    Reference(Reference),
    SampledData(SampledData),
    Timing(Timing),
    ContactDetail(ContactDetail),
    DataRequirement(DataRequirement),
    Expression(Expression),
    RelatedArtifact(RelatedArtifact),
    UsageContext(UsageContext),
    Dosage(Dosage),
    Meta(Meta),
}
