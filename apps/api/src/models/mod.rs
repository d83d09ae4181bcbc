pub mod resume;
pub mod validation;
