//! Field validation results and the validating JSON extractor.

pub mod binding;
pub mod extractor;

pub use binding::{BindingResult, FieldError, object_name};
pub use extractor::ValidJson;
