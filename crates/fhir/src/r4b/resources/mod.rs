mod activity_definition;
mod medication;
mod observation;
mod patient;
mod research_element_definition;

pub use activity_definition::*;
pub use medication::*;
pub use observation::*;
pub use patient::*;
pub use research_element_definition::*;
