//! ATS helpers — the hidden keyword block injected into rendered output and
//! the document-level compatibility score.
//!
//! The document score is a distinct scale from per-achievement relevance:
//! 0-100, assembled from weighted components. Keyword coverage contributes
//! at most 40 points; the rest comes from resume structure (achievements,
//! contact completeness, summary, skills, education), so injecting the
//! hidden block can close the keyword gap but never pin the score at 100
//! on its own.

use crate::models::resume::Resume;
use crate::optimize::keyword_extractor::KeywordSet;
use crate::optimize::patterns::PatternTable;
use crate::render::escape_html;

/// Upper bound on how often one term may appear in the hidden block.
/// Covers variants without tripping keyword-stuffing detection.
pub const MAX_TERM_REPEAT: usize = 3;

// Score component weights. Together they sum to 100.
const KEYWORD_POINTS: f64 = 40.0;
const SKILLS_POINTS: f64 = 15.0;
const ACHIEVEMENT_POINTS: f64 = 20.0;
const SUMMARY_POINTS: f64 = 10.0;
const EDUCATION_POINTS: f64 = 5.0;
const NAME_EMAIL_POINTS: f64 = 5.0;
const PHONE_LOCATION_POINTS: f64 = 2.5;

/// Keyword coverage is measured against this many top keywords.
const KEYWORD_SAMPLE: usize = 20;

/// Achievement count at which the achievement component maxes out.
const ACHIEVEMENT_TARGET: usize = 10;

/// The plain-text terms destined for the hidden block: every keyword once
/// (high-priority terms up to `MAX_TERM_REPEAT` times) plus its known
/// synonym variants. Shared between the HTML fragment and the optimized
/// document score so both see the same injected text.
pub fn hidden_terms(keywords: &KeywordSet, table: &PatternTable) -> Vec<String> {
    let mut terms = Vec::new();
    for keyword in keywords.iter() {
        let repeats = if table.is_high_priority(&keyword.term) {
            MAX_TERM_REPEAT
        } else {
            1
        };
        for _ in 0..repeats {
            terms.push(keyword.term.clone());
        }
        for variant in table.variants_of(&keyword.term) {
            terms.push((*variant).to_string());
        }
    }
    terms
}

/// Builds the invisible HTML fragment embedded in the optimized rendering.
/// Empty keyword set yields an empty string (no block at all).
pub fn build_hidden_block(keywords: &KeywordSet, table: &PatternTable) -> String {
    if keywords.is_empty() {
        return String::new();
    }
    let text = hidden_terms(keywords, table).join(" ");
    format!(
        "<div class=\"ats-keywords\" aria-hidden=\"true\">{}</div>",
        escape_html(&text)
    )
}

/// Document-level ATS compatibility estimate in [0, 100].
///
/// Components: keyword coverage over the top `KEYWORD_SAMPLE` terms (up to
/// 40 points, always divided by the full sample size so thin keyword sets
/// score low), achievement volume (up to 20), skills presence (15),
/// contact completeness (15), summary headline (10), and education (5).
/// Capped at 100 and rounded to two decimals; an empty keyword set scores 0.
pub fn ats_score(document_text: &str, resume: &Resume, keywords: &KeywordSet) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let text_lower = document_text.to_lowercase();
    let found = keywords
        .iter()
        .take(KEYWORD_SAMPLE)
        .filter(|k| text_lower.contains(&k.term))
        .count();
    let mut score = (found as f64 / KEYWORD_SAMPLE as f64) * KEYWORD_POINTS;

    let achievement_count: usize = resume
        .experience
        .iter()
        .map(|job| job.achievements.len())
        .sum();
    score += ((achievement_count as f64 / ACHIEVEMENT_TARGET as f64) * ACHIEVEMENT_POINTS)
        .min(ACHIEVEMENT_POINTS);

    if !resume.skills.is_empty() {
        score += SKILLS_POINTS;
    }

    if !resume.personal.name.is_empty() {
        score += NAME_EMAIL_POINTS;
    }
    if !resume.personal.email.is_empty() {
        score += NAME_EMAIL_POINTS;
    }
    if !resume.personal.phone.is_empty() {
        score += PHONE_LOCATION_POINTS;
    }
    if !resume.personal.location.is_empty() {
        score += PHONE_LOCATION_POINTS;
    }

    if !resume.summary.headline.is_empty() {
        score += SUMMARY_POINTS;
    }

    if !resume.education.is_empty() {
        score += EDUCATION_POINTS;
    }

    let score = score.min(100.0);
    (score * 100.0).round() / 100.0
}

/// Flattens every text-bearing field of a resume into one string for keyword
/// matching. Order mirrors the document but is irrelevant to the score.
pub fn resume_plain_text(resume: &Resume) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(resume.personal.name.clone());
    parts.push(resume.personal.location.clone());

    parts.push(resume.summary.headline.clone());
    parts.extend(resume.summary.bullets.iter().cloned());

    for job in &resume.experience {
        parts.push(job.title.clone());
        parts.push(job.company.clone());
        if let Some(description) = &job.description {
            parts.push(description.clone());
        }
        for achievement in &job.achievements {
            parts.push(achievement.text.clone());
            parts.extend(achievement.keywords.iter().cloned());
        }
    }

    for group in resume.skills.values() {
        parts.extend(group.terms().iter().map(|s| s.to_string()));
    }

    for education in &resume.education {
        parts.push(education.degree.clone());
        parts.push(education.school.clone());
    }

    for project in &resume.projects {
        parts.push(project.name.clone());
        parts.push(project.description.clone());
        parts.extend(project.keywords.iter().cloned());
        parts.extend(project.technologies.iter().cloned());
    }

    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Achievement, Experience};
    use crate::optimize::keyword_extractor::extract;

    fn table() -> PatternTable {
        PatternTable::builtin()
    }

    fn resume_with_bullet(text: &str) -> Resume {
        Resume {
            experience: vec![Experience {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                achievements: vec![Achievement {
                    text: text.to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_set_yields_empty_block() {
        assert_eq!(build_hidden_block(&KeywordSet::default(), &table()), "");
    }

    #[test]
    fn test_block_contains_keyword_and_variants() {
        let set = extract("PostgreSQL experience required.", &table());
        let block = build_hidden_block(&set, &table());
        assert!(block.contains("postgresql"));
        assert!(block.contains("postgres"), "variant must be injected: {block}");
        assert!(block.contains("aria-hidden"));
    }

    #[test]
    fn test_term_repetition_is_bounded() {
        let set = extract("python python python python python required", &table());
        let terms = hidden_terms(&set, &table());
        let count = terms.iter().filter(|t| *t == "python").count();
        assert!(count <= MAX_TERM_REPEAT, "python appears {count} times");
        assert!(count > 1, "high-priority term should repeat");
    }

    #[test]
    fn test_non_priority_term_appears_once() {
        let set = extract("Must have terraform modules.", &table());
        let terms = hidden_terms(&set, &table());
        let count = terms.iter().filter(|t| *t == "terraform").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_ats_score_bounds() {
        let resume = resume_with_bullet("Built everything in Python with Flask on AWS");
        let set = extract("Python, Flask, AWS required.", &table());
        let matched = ats_score(&resume_plain_text(&resume), &resume, &set);
        assert!((0.0..=100.0).contains(&matched), "score {matched}");

        let unrelated = resume_with_bullet("Organized team lunches");
        let unmatched = ats_score(&resume_plain_text(&unrelated), &unrelated, &set);
        assert!(matched > unmatched, "{matched} must beat {unmatched}");
    }

    #[test]
    fn test_keyword_component_is_capped() {
        // Even with every keyword present, the keyword component alone
        // cannot push a structureless resume past 40 points.
        let resume = resume_with_bullet("python kubernetes aws docker flask react");
        let set = extract(
            "Python, Kubernetes, AWS, Docker, Flask and React required.",
            &table(),
        );
        let score = ats_score(&resume_plain_text(&resume), &resume, &set);
        assert!(
            score < 50.0,
            "full keyword coverage without structure scored {score}"
        );
    }

    #[test]
    fn test_ats_score_zero_for_empty_keywords() {
        let resume = resume_with_bullet("Anything at all");
        assert_eq!(
            ats_score(&resume_plain_text(&resume), &resume, &KeywordSet::default()),
            0.0
        );
    }

    #[test]
    fn test_structure_components_apply() {
        let set = extract("We use python and kubernetes here.", &table());
        let bare = Resume::default();
        let base = ats_score("python", &bare, &set);

        let with_achievements = ats_score("python", &resume_with_bullet("python"), &set);
        assert!(with_achievements > base, "achievements must add points");

        let mut rich = resume_with_bullet("python");
        rich.personal.name = "Jane Doe".to_string();
        rich.personal.email = "jane@example.com".to_string();
        rich.summary.headline = "Engineer".to_string();
        rich.education.push(crate::models::resume::Education {
            school: "State".to_string(),
            ..Default::default()
        });
        let full = ats_score("python", &rich, &set);
        assert!(
            full > with_achievements,
            "contact, summary and education must each count: {with_achievements} -> {full}"
        );
    }

    #[test]
    fn test_injected_text_raises_score() {
        let resume = resume_with_bullet("Shipped internal tools");
        let set = extract("Kubernetes and terraform required. Experience with kubernetes.", &table());
        let base_text = resume_plain_text(&resume);
        let base = ats_score(&base_text, &resume, &set);

        let injected = format!("{base_text} {}", hidden_terms(&set, &table()).join(" "));
        let boosted = ats_score(&injected, &resume, &set);
        assert!(boosted > base, "hidden terms must raise coverage: {base} -> {boosted}");
    }

    #[test]
    fn test_monotonic_under_richer_coverage() {
        // Extending the JD with terms that literally appear in the resume
        // must not lower the optimized score.
        let resume = resume_with_bullet("Built REST APIs using Python and Flask");
        let short = extract("Python required.", &table());
        let extended = extract("Python required. Flask required. REST required.", &table());

        let text = resume_plain_text(&resume);
        let short_score = ats_score(&text, &resume, &short);
        let extended_score = ats_score(&text, &resume, &extended);
        assert!(
            extended_score >= short_score,
            "coverage-only extension dropped score: {short_score} -> {extended_score}"
        );
    }

    #[test]
    fn test_plain_text_includes_all_sections() {
        let mut resume = resume_with_bullet("Did the work");
        resume.personal.name = "Ada".to_string();
        resume.summary.headline = "Engineering leader".to_string();
        let text = resume_plain_text(&resume);
        assert!(text.contains("Ada"));
        assert!(text.contains("Engineering leader"));
        assert!(text.contains("Did the work"));
        assert!(text.contains("Acme"));
    }
}
