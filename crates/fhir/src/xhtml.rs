use crate::mem_size::MemSize;
use plait_fhirpath_support::{
    ConversionResult, EvaluationResult, FhirPathElement, IntoEvaluationResult, TypeInfoResult,
};
use plait_serde_support::{Shape, impl_whole_codec};
use serde::{Deserialize, Serialize};

/// Narrative XHTML (`Narrative.div`), kept as the raw markup string.
///
/// JSON carries it as a string; XML embeds it as a literal `<div>` element in
/// the XHTML namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Xhtml(pub String);

impl From<&str> for Xhtml {
    fn from(markup: &str) -> Self {
        Xhtml(markup.to_string())
    }
}

impl_whole_codec!(Xhtml, Shape::Xhtml);

impl IntoEvaluationResult for Xhtml {
    fn to_evaluation_result(&self) -> EvaluationResult {
        EvaluationResult::string(self.0.clone()).with_type_info(TypeInfoResult::fhir("xhtml"))
    }
}

impl FhirPathElement for Xhtml {
    fn type_name(&self) -> &'static str {
        "xhtml"
    }

    fn named_children(&self) -> Vec<(&'static str, &dyn FhirPathElement)> {
        Vec::new()
    }

    fn to_string_value(&self) -> ConversionResult<String> {
        Ok(Some(self.0.clone()))
    }
}

impl MemSize for Xhtml {
    fn mem_size(&self) -> usize {
        self.0.len()
    }
}
