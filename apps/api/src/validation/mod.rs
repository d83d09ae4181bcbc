//! Structural validation for resume JSON and job-description text.
//!
//! Validation runs over raw `serde_json::Value` so malformed input produces
//! a structured error report instead of a deserialization failure deep in
//! the pipeline.

pub mod handlers;

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::models::validation::ValidationReport;

const MIN_JD_WORDS: usize = 50;
const MAX_JD_WORDS: usize = 2000;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("invalid email pattern")
    })
}

/// Validates resume structure: errors for anything optimization cannot work
/// around (missing personal fields, wrong shapes), warnings for sections
/// whose absence merely weakens ATS results.
pub fn validate_resume(resume: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    let Some(object) = resume.as_object() else {
        report.error("Resume data must be a JSON object");
        return report;
    };

    validate_personal(object.get("personal"), &mut report);
    validate_experience(object.get("experience"), &mut report);

    if object.get("skills").is_none() {
        report.warn("Missing \"skills\" section - important for ATS scoring");
    }

    match object.get("summary") {
        None => report.warn("Missing \"summary\" section - helps with ATS optimization"),
        Some(summary) => {
            let headline = summary.get("headline").and_then(Value::as_str);
            if headline.map_or(true, str::is_empty) {
                report.warn("Missing summary headline - recommended for professional impact");
            }
        }
    }

    if report.valid {
        report.recommendations = vec![
            "Include quantifiable achievements with metrics (e.g., \"$100M TVL\", \"20+ engineers\")".to_string(),
            "Add relevant keywords to each achievement for better ATS matching".to_string(),
            "Organize skills by proficiency level (expert, proficient, familiar)".to_string(),
            "Include education section for complete professional profile".to_string(),
        ];
    }

    report
}

fn validate_personal(personal: Option<&Value>, report: &mut ValidationReport) {
    let Some(personal) = personal else {
        report.error("Missing required \"personal\" section");
        return;
    };

    for field in ["name", "email"] {
        let value = personal.get(field).and_then(Value::as_str);
        if value.map_or(true, str::is_empty) {
            report.error(format!("Missing required personal.{field}"));
        }
    }

    if let Some(email) = personal.get("email").and_then(Value::as_str) {
        if !email.is_empty() && !email_regex().is_match(email) {
            report.error("Invalid email format in personal.email");
        }
    }
}

fn validate_experience(experience: Option<&Value>, report: &mut ValidationReport) {
    let Some(experience) = experience else {
        report.warn("Missing \"experience\" section - recommended for ATS optimization");
        return;
    };

    let Some(jobs) = experience.as_array() else {
        report.error("\"experience\" must be an array of job objects");
        return;
    };

    for (i, job) in jobs.iter().enumerate() {
        let Some(job) = job.as_object() else {
            report.error(format!("Experience item {} must be an object", i + 1));
            continue;
        };

        for field in ["title", "company", "duration"] {
            let value = job.get(field).and_then(Value::as_str);
            if value.map_or(true, str::is_empty) {
                report.warn(format!(
                    "Experience item {} missing recommended field: {field}",
                    i + 1
                ));
            }
        }

        if let Some(achievements) = job.get("achievements") {
            validate_achievements(achievements, i, report);
        }
    }
}

fn validate_achievements(achievements: &Value, job_index: usize, report: &mut ValidationReport) {
    let Some(items) = achievements.as_array() else {
        report.error(format!(
            "Experience item {} achievements must be an array",
            job_index + 1
        ));
        return;
    };

    for (j, achievement) in items.iter().enumerate() {
        let has_text = achievement
            .get("text")
            .and_then(Value::as_str)
            .is_some_and(|t| !t.is_empty());
        if !has_text {
            report.error(format!(
                "Achievement {} in job {} must have \"text\" field",
                j + 1,
                job_index + 1
            ));
        }
    }
}

/// Job-description validation result, including length metadata the UI uses
/// for its input hints.
#[derive(Debug, Clone, Serialize)]
pub struct JdReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub word_count: usize,
    pub estimated_keywords: usize,
}

/// Validates a job description. Emptiness is an error; length and missing
/// sections are warnings only.
pub fn validate_job_description(job_description: &str) -> JdReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if job_description.trim().is_empty() {
        return JdReport {
            valid: false,
            errors: vec!["Job description cannot be empty".to_string()],
            warnings,
            word_count: 0,
            estimated_keywords: 0,
        };
    }

    let word_count = job_description.split_whitespace().count();

    if word_count < MIN_JD_WORDS {
        warnings.push(format!(
            "Job description is quite short ({word_count} words). \
             Longer descriptions provide better optimization."
        ));
    } else if word_count > MAX_JD_WORDS {
        warnings.push(format!(
            "Job description is very long ({word_count} words). \
             Consider focusing on key requirements."
        ));
    }

    let lower = job_description.to_lowercase();
    let section_hits = [
        "requirements",
        "responsibilities",
        "qualifications",
        "skills",
        "experience",
    ]
    .iter()
    .filter(|section| lower.contains(*section))
    .count();

    if section_hits < 2 {
        warnings.push(
            "Job description may be missing key sections \
             (requirements, responsibilities, qualifications)"
                .to_string(),
        );
    }

    JdReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        word_count,
        estimated_keywords: (word_count / 10).min(60),
    }
}
