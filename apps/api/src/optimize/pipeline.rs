//! Optimization pipeline — ties extraction, scoring, reordering, injection,
//! and rendering into one pure, deterministic computation.
//!
//! No I/O, no shared state: two concurrent optimize requests cannot
//! interfere. The handler layer owns input validation; this module assumes a
//! well-typed resume and a (possibly keyword-free) job description.

use serde::Serialize;

use crate::models::resume::Resume;
use crate::optimize::ats::{ats_score, build_hidden_block, hidden_terms, resume_plain_text};
use crate::optimize::keyword_extractor::{extract, KeywordSet};
use crate::optimize::patterns::PatternTable;
use crate::optimize::relevance_scorer::{count_reordered, reorder_experience};
use crate::render::render_resume;

/// How many top keywords are echoed back to the client.
const KEYWORDS_RETURNED: usize = 20;

/// Everything one optimize request produces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutcome {
    pub default_score: f64,
    pub optimized_score: f64,
    pub improvement: f64,
    pub optimizations: Vec<String>,
    pub keywords: Vec<String>,
    pub default_html: String,
    pub optimized_html: String,
}

/// Runs the full optimization for one (resume, job description) pair.
///
/// The default view always renders the caller's original achievement order
/// with no injected block; the optimized view renders the reordered
/// achievements plus the hidden keyword block. A job description with zero
/// extractable keywords degrades to a no-op: identical order, equal scores.
pub fn optimize(resume: &Resume, job_description: &str, table: &PatternTable) -> OptimizationOutcome {
    let keywords = extract(job_description, table);

    let reordered = reorder_experience(&resume.experience, &keywords);
    let optimized = resume.with_experience(reordered);

    let hidden_block = build_hidden_block(&keywords, table);
    let default_html = render_resume(resume, "");
    let optimized_html = render_resume(&optimized, &hidden_block);

    let base_text = resume_plain_text(resume);
    let default_score = ats_score(&base_text, resume, &keywords);

    let optimized_text = if keywords.is_empty() {
        base_text
    } else {
        format!("{base_text} {}", hidden_terms(&keywords, table).join(" "))
    };
    let optimized_score = ats_score(&optimized_text, &optimized, &keywords);

    let reordered_count = count_reordered(&resume.experience, &optimized.experience);
    let optimizations = describe_optimizations(&keywords, reordered_count, table);

    let improvement = ((optimized_score - default_score) * 100.0).round() / 100.0;

    OptimizationOutcome {
        default_score,
        optimized_score,
        improvement,
        optimizations,
        keywords: keywords
            .terms()
            .into_iter()
            .take(KEYWORDS_RETURNED)
            .map(String::from)
            .collect(),
        default_html,
        optimized_html,
    }
}

/// Human-readable change descriptions, derived from the counts the pipeline
/// already computed — never independently recomputed.
fn describe_optimizations(
    keywords: &KeywordSet,
    reordered_count: usize,
    table: &PatternTable,
) -> Vec<String> {
    if keywords.is_empty() {
        return vec!["No keywords could be extracted from the job description; resume left unchanged.".to_string()];
    }

    let mut notes = Vec::new();

    let required = keywords.required_count();
    if required > 0 {
        notes.push(format!(
            "Matched {} job keywords ({} marked required)",
            keywords.len(),
            required
        ));
    } else {
        notes.push(format!("Matched {} job keywords", keywords.len()));
    }

    if reordered_count > 0 {
        notes.push(format!(
            "Reordered {reordered_count} achievements by relevance to the role"
        ));
    }

    let variant_count: usize = keywords
        .iter()
        .map(|k| table.variants_of(&k.term).len())
        .sum();
    notes.push(format!(
        "Injected {} ATS keyword terms ({} synonym variants) into the optimized layout",
        keywords.len(),
        variant_count
    ));

    notes
}
