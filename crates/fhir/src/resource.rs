/// Accessors every resource exposes to storage and indexing layers.
pub trait FhirResource {
    /// The `resourceType` discriminator, e.g. `"Patient"`.
    fn resource_type(&self) -> &'static str;

    /// The logical id, if the resource has one.
    fn resource_id(&self) -> Option<&str>;
}
