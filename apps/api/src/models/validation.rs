//! Validation report types shared by the resume and job-description
//! validators and their API responses.

use serde::{Deserialize, Serialize};

/// Outcome of a structural validation pass. `valid` is derived — a report is
/// valid exactly when it carries no errors; warnings are advisory only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_report_is_valid() {
        assert!(ValidationReport::new().valid);
    }

    #[test]
    fn test_error_flips_valid() {
        let mut report = ValidationReport::new();
        report.warn("just a warning");
        assert!(report.valid, "warnings alone must not invalidate");
        report.error("missing field");
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_empty_recommendations_omitted_from_json() {
        let report = ValidationReport::new();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("recommendations").is_none());
    }
}
