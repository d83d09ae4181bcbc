//! Relevance Scorer — rates each resume achievement against the extracted
//! keyword set and reorders achievements within each job.
//!
//! Scores are 0-10, computed from three weighted components:
//! exact keyword matches (70%), partial/substring matches (20%), and a fixed
//! bonus for quantified achievements (10%). The reorder is a stable sort so
//! equally-relevant bullets keep their original relative order.

use crate::models::resume::{Achievement, Experience};
use crate::optimize::keyword_extractor::KeywordSet;

const EXACT_WEIGHT: f64 = 0.7;
const PARTIAL_WEIGHT: f64 = 0.2;
const METRIC_WEIGHT: f64 = 0.1;
const MAX_SCORE: f64 = 10.0;

/// How many keywords one bullet can plausibly match. The exact and partial
/// components are normalized against the summed tier weight of this many
/// top-tier keywords, so a single strong bullet can reach the top of the
/// scale without matching the entire set.
const PLAUSIBLE_MATCHES: usize = 8;

/// A partial (substring) match is worth half an exact match at the same tier.
const PARTIAL_FACTOR: f64 = 0.5;

/// Scores a single achievement against the keyword set. Total function:
/// always returns a value in [0, 10]; an empty set scores exactly 0.
pub fn score_achievement(achievement: &Achievement, keywords: &KeywordSet) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let text = achievement.text.to_lowercase();
    let own_keywords: Vec<String> = achievement
        .keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    let mut exact = 0.0;
    let mut partial = 0.0;

    for keyword in keywords.iter() {
        let tier_weight = keyword.tier.multiplier();
        let term = keyword.term.as_str();

        let exact_hit =
            own_keywords.iter().any(|k| k == term) || contains_whole_term(&text, term);

        if exact_hit {
            exact += tier_weight;
        } else if is_partial_match(&text, term) {
            partial += tier_weight * PARTIAL_FACTOR;
        }
    }

    let cap = plausible_cap(keywords);
    if cap <= 0.0 {
        return 0.0;
    }

    let exact_norm = (exact / cap).min(1.0);
    let partial_norm = (partial / cap).min(1.0);
    let metric_norm = if achievement.metrics.is_some() { 1.0 } else { 0.0 };

    let score = MAX_SCORE
        * (EXACT_WEIGHT * exact_norm + PARTIAL_WEIGHT * partial_norm + METRIC_WEIGHT * metric_norm);

    score.clamp(0.0, MAX_SCORE)
}

/// Produces a new experience list with every achievement annotated with its
/// relevance score and each job's achievements stably sorted by descending
/// score. The caller's list is untouched; job order is never changed.
pub fn reorder_experience(experience: &[Experience], keywords: &KeywordSet) -> Vec<Experience> {
    experience
        .iter()
        .map(|job| {
            let mut achievements: Vec<Achievement> = job
                .achievements
                .iter()
                .map(|a| {
                    let mut annotated = a.clone();
                    annotated.relevance_score = Some(score_achievement(a, keywords));
                    annotated
                })
                .collect();

            // Empty keyword set: scores are uniformly 0 and order must stay
            // exactly as authored.
            if !keywords.is_empty() {
                achievements.sort_by(|a, b| {
                    b.relevance_score
                        .partial_cmp(&a.relevance_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            }

            Experience {
                achievements,
                ..job.clone()
            }
        })
        .collect()
}

/// Counts achievements whose position changed between the original and
/// reordered views. Feeds the human-readable optimization summary.
pub fn count_reordered(original: &[Experience], reordered: &[Experience]) -> usize {
    original
        .iter()
        .zip(reordered.iter())
        .map(|(before, after)| {
            before
                .achievements
                .iter()
                .zip(after.achievements.iter())
                .filter(|(a, b)| a.text != b.text)
                .count()
        })
        .sum()
}

/// Summed tier weight of the strongest `PLAUSIBLE_MATCHES` keywords — the
/// normalization ceiling for the match components.
fn plausible_cap(keywords: &KeywordSet) -> f64 {
    let mut multipliers: Vec<f64> = keywords.iter().map(|k| k.tier.multiplier()).collect();
    multipliers.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    multipliers.iter().take(PLAUSIBLE_MATCHES).sum()
}

/// Whole-term containment: `term` appears in `text` with non-alphanumeric
/// characters (or string edges) on both sides. `rest api` matches inside
/// "built rest apis"? No — the trailing `s` breaks the right boundary, which
/// is exactly what the partial component is for.
fn contains_whole_term(text: &str, term: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = text[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();
        let left_ok = begin == 0
            || !text[..begin]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let right_ok = end == text.len()
            || !text[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
        if left_ok && right_ok {
            return true;
        }
        start = end;
    }
    false
}

/// Loose containment either direction — handles pluralization ("apis" vs
/// "api") and compound terms ("postgresql" vs "sql").
fn is_partial_match(text: &str, term: &str) -> bool {
    if text.contains(term) {
        return true;
    }
    term.len() >= 4
        && text
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token.len() >= 4 && (term.contains(token) || token.contains(term)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Metric;
    use crate::optimize::keyword_extractor::extract;
    use crate::optimize::patterns::PatternTable;

    fn achievement(text: &str) -> Achievement {
        Achievement {
            text: text.to_string(),
            ..Default::default()
        }
    }

    fn keywords_for(jd: &str) -> KeywordSet {
        extract(jd, &PatternTable::builtin())
    }

    #[test]
    fn test_empty_keyword_set_scores_zero() {
        let a = achievement("Built REST APIs using Python and Flask");
        assert_eq!(score_achievement(&a, &KeywordSet::default()), 0.0);
    }

    #[test]
    fn test_score_within_bounds() {
        let set = keywords_for(
            "Python, Flask, REST API, Docker, AWS, PostgreSQL, Redis, Kubernetes required. \
             Experience with python, flask, docker, aws.",
        );
        let loaded = Achievement {
            text: "Built REST APIs in Python and Flask on AWS with Docker, \
                   PostgreSQL, Redis and Kubernetes"
                .to_string(),
            keywords: vec!["python".into(), "flask".into(), "aws".into()],
            metrics: Some(Metric {
                value: 99.9,
                kind: "uptime".to_string(),
            }),
            ..Default::default()
        };
        let score = score_achievement(&loaded, &set);
        assert!((0.0..=10.0).contains(&score), "score {score} out of bounds");
        assert!(score > 5.0, "heavily-matched bullet should score high, got {score}");
    }

    #[test]
    fn test_scenario_relevant_bullet_beats_irrelevant() {
        let set = keywords_for("Python, Flask, REST API experience required.");
        let relevant = achievement("Built REST APIs using Python and Flask");
        let irrelevant = achievement("Organized team lunches");

        let relevant_score = score_achievement(&relevant, &set);
        let irrelevant_score = score_achievement(&irrelevant, &set);

        assert!(
            relevant_score > irrelevant_score,
            "{relevant_score} must beat {irrelevant_score}"
        );
        assert!(irrelevant_score < 1.0, "unrelated bullet should score near 0");
    }

    #[test]
    fn test_metrics_bonus_breaks_tie() {
        let set = keywords_for("Python experience required.");
        let plain = achievement("Improved the Python build pipeline");
        let quantified = Achievement {
            metrics: Some(Metric {
                value: 40.0,
                kind: "build_time_reduction".to_string(),
            }),
            ..achievement("Improved the Python build pipeline")
        };
        assert!(
            score_achievement(&quantified, &set) > score_achievement(&plain, &set),
            "quantified achievement must outscore the same text without metrics"
        );
    }

    #[test]
    fn test_own_keyword_list_counts_as_exact() {
        let set = keywords_for("Kubernetes experience required.");
        let tagged = Achievement {
            text: "Migrated workloads to the container platform".to_string(),
            keywords: vec!["kubernetes".to_string()],
            ..Default::default()
        };
        let untagged = achievement("Migrated workloads to the container platform");
        assert!(score_achievement(&tagged, &set) > score_achievement(&untagged, &set));
    }

    #[test]
    fn test_partial_match_scores_less_than_exact() {
        let set = keywords_for("Must have api design experience.");
        let exact = achievement("Designed the public api surface");
        let partial = achievement("Documented all apis for partners");
        let exact_score = score_achievement(&exact, &set);
        let partial_score = score_achievement(&partial, &set);
        assert!(exact_score > partial_score, "{exact_score} vs {partial_score}");
        assert!(partial_score > 0.0, "plural form must still register");
    }

    #[test]
    fn test_reorder_sorts_descending_and_annotates() {
        let set = keywords_for("Python, Flask, REST API experience required.");
        let jobs = vec![Experience {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            achievements: vec![
                achievement("Organized team lunches"),
                achievement("Built REST APIs using Python and Flask"),
            ],
            ..Default::default()
        }];

        let reordered = reorder_experience(&jobs, &set);
        assert_eq!(
            reordered[0].achievements[0].text,
            "Built REST APIs using Python and Flask"
        );
        assert!(reordered[0]
            .achievements
            .iter()
            .all(|a| a.relevance_score.is_some()));
        // Source list untouched.
        assert_eq!(jobs[0].achievements[0].text, "Organized team lunches");
        assert!(jobs[0].achievements[0].relevance_score.is_none());
    }

    #[test]
    fn test_reorder_is_stable_for_ties() {
        let set = keywords_for("Python experience required.");
        let jobs = vec![Experience {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            achievements: vec![
                achievement("First unrelated bullet"),
                achievement("Second unrelated bullet"),
                achievement("Third unrelated bullet"),
            ],
            ..Default::default()
        }];

        let reordered = reorder_experience(&jobs, &set);
        let texts: Vec<&str> = reordered[0]
            .achievements
            .iter()
            .map(|a| a.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                "First unrelated bullet",
                "Second unrelated bullet",
                "Third unrelated bullet"
            ],
            "equal scores must preserve original order"
        );
    }

    #[test]
    fn test_empty_keywords_leave_order_unchanged() {
        let jobs = vec![Experience {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            achievements: vec![achievement("B bullet"), achievement("A bullet")],
            ..Default::default()
        }];
        let reordered = reorder_experience(&jobs, &KeywordSet::default());
        assert_eq!(reordered[0].achievements[0].text, "B bullet");
        assert_eq!(reordered[0].achievements[0].relevance_score, Some(0.0));
    }

    #[test]
    fn test_job_order_never_changes() {
        let set = keywords_for("Python required.");
        let jobs = vec![
            Experience {
                title: "Older job".to_string(),
                company: "First".to_string(),
                achievements: vec![achievement("Nothing relevant")],
                ..Default::default()
            },
            Experience {
                title: "Newer job".to_string(),
                company: "Second".to_string(),
                achievements: vec![achievement("Wrote Python services")],
                ..Default::default()
            },
        ];
        let reordered = reorder_experience(&jobs, &set);
        assert_eq!(reordered[0].company, "First");
        assert_eq!(reordered[1].company, "Second");
    }

    #[test]
    fn test_count_reordered() {
        let before = vec![Experience {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            achievements: vec![achievement("one"), achievement("two")],
            ..Default::default()
        }];
        let after = vec![Experience {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            achievements: vec![achievement("two"), achievement("one")],
            ..Default::default()
        }];
        assert_eq!(count_reordered(&before, &after), 2);
        assert_eq!(count_reordered(&before, &before), 0);
    }

    #[test]
    fn test_whole_term_boundaries() {
        assert!(contains_whole_term("built rest services", "rest"));
        assert!(!contains_whole_term("restructured the org", "rest"));
        assert!(contains_whole_term("python, flask and more", "flask"));
    }
}
