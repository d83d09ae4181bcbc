//! Keyword Extractor — scans a job description and returns a weighted,
//! deduplicated set of salient terms.
//!
//! Pure function of the input text and the `PatternTable`; no I/O. Score
//! accumulation runs through `BTreeMap` so repeated extraction of the same
//! description is byte-for-byte deterministic.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::optimize::patterns::{PatternTable, WeightTier};

/// Maximum number of keywords kept per extraction. More than this dilutes
/// relevance scoring with noise; the highest-weighted candidates win.
pub const MAX_KEYWORDS: usize = 60;

/// Minimum term length considered meaningful.
const MIN_TERM_LEN: usize = 3;

/// One extracted term with its accumulated weight and strongest tier.
#[derive(Debug, Clone, Serialize)]
pub struct Keyword {
    pub term: String,
    #[serde(serialize_with = "serialize_tier")]
    pub tier: WeightTier,
    pub weight: f64,
}

fn serialize_tier<S: serde::Serializer>(tier: &WeightTier, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(tier.label())
}

/// The weighted keyword set for one job description. Lifetime is a single
/// optimize request; never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordSet {
    pub keywords: Vec<Keyword>,
}

impl KeywordSet {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    /// Terms in ranked order (highest weight first).
    pub fn terms(&self) -> Vec<&str> {
        self.keywords.iter().map(|k| k.term.as_str()).collect()
    }

    pub fn required_count(&self) -> usize {
        self.keywords
            .iter()
            .filter(|k| k.tier == WeightTier::Required)
            .count()
    }
}

/// Extracts keywords from a job description.
///
/// Four passes: domain-priority patterns, all-caps acronyms, requirement
/// phrases (which set the `Required`/`Preferred` tier), and tech-stack lists.
/// Empty or whitespace-only input yields an empty set, not an error.
pub fn extract(job_description: &str, table: &PatternTable) -> KeywordSet {
    if job_description.trim().is_empty() {
        return KeywordSet::default();
    }

    let lower = job_description.to_lowercase();
    let mut scores: BTreeMap<String, f64> = BTreeMap::new();
    let mut tiers: BTreeMap<String, WeightTier> = BTreeMap::new();

    // Pass 1: domain-priority patterns, weight descending by rule position.
    for rule in &table.priority {
        for found in rule.regex.find_iter(&lower) {
            bump(&mut scores, found.as_str(), rule.weight);
        }
    }

    // Pass 2: acronyms, matched against the original casing.
    for found in table.acronym.find_iter(job_description) {
        let term = found.as_str().to_lowercase();
        if !table.is_stop_word(&term) {
            bump(&mut scores, &term, 1.0);
        }
    }

    // Pass 3 + 4: requirement / preference / tech-stack phrases. Captured
    // clauses are tokenized and each term takes the rule's tier and weight.
    for rule in &table.phrases {
        for caps in rule.regex.captures_iter(&lower) {
            let Some(clause) = caps.get(1) else { continue };
            for token in table.term_token.find_iter(clause.as_str()) {
                let term = token.as_str();
                if term.len() < MIN_TERM_LEN {
                    continue;
                }
                bump(&mut scores, term, rule.weight);
                promote(&mut tiers, term, rule.tier);
            }
        }
    }

    // Filter, rank, cap.
    let mut keywords: Vec<Keyword> = scores
        .into_iter()
        .filter(|(term, weight)| {
            term.len() >= MIN_TERM_LEN && *weight > 0.0 && !table.is_stop_word(term)
        })
        .map(|(term, weight)| {
            let tier = tiers.get(&term).copied().unwrap_or(WeightTier::Contextual);
            Keyword { term, tier, weight }
        })
        .collect();

    // Highest weight first; alphabetical tiebreak keeps output deterministic.
    keywords.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    keywords.truncate(MAX_KEYWORDS);

    KeywordSet { keywords }
}

fn bump(scores: &mut BTreeMap<String, f64>, term: &str, weight: f64) {
    // '#' and '.' stay: "c#" and ".net" are real terms with synonym entries.
    let term = term.trim_matches(|c: char| !c.is_alphanumeric() && c != '#' && c != '.');
    if term.is_empty() {
        return;
    }
    *scores.entry(term.to_string()).or_insert(0.0) += weight;
}

/// Keeps the strongest tier seen for a term across all phrase rules.
fn promote(tiers: &mut BTreeMap<String, WeightTier>, term: &str, tier: WeightTier) {
    let entry = tiers.entry(term.to_string()).or_insert(tier);
    if tier > *entry {
        *entry = tier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PatternTable {
        PatternTable::builtin()
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        let set = extract("", &table());
        assert!(set.is_empty());
        let set = extract("   \n\t  ", &table());
        assert!(set.is_empty());
    }

    #[test]
    fn test_scenario_python_flask_rest() {
        let jd = "We need Python, Flask, REST API experience required. \
                  You will build REST services in Python.";
        let set = extract(jd, &table());
        let terms = set.terms();
        assert!(terms.contains(&"python"), "terms: {terms:?}");
        assert!(terms.contains(&"flask"), "terms: {terms:?}");
        assert!(terms.contains(&"rest"), "terms: {terms:?}");
    }

    #[test]
    fn test_requirement_phrase_sets_required_tier() {
        let jd = "Must have kubernetes and terraform. We ship weekly.";
        let set = extract(jd, &table());
        let kube = set
            .iter()
            .find(|k| k.term == "kubernetes")
            .expect("kubernetes extracted");
        assert_eq!(kube.tier, WeightTier::Required);
    }

    #[test]
    fn test_preferred_phrase_sets_preferred_tier() {
        let jd = "Nice to have: grafana dashboards and terraform modules.";
        let set = extract(jd, &table());
        let grafana = set
            .iter()
            .find(|k| k.term == "grafana")
            .expect("grafana extracted");
        assert_eq!(grafana.tier, WeightTier::Preferred);
    }

    #[test]
    fn test_required_beats_preferred_when_both_seen() {
        let jd = "Experience with kafka required. Nice to have: kafka streams.";
        let set = extract(jd, &table());
        let kafka = set.iter().find(|k| k.term == "kafka").unwrap();
        assert_eq!(kafka.tier, WeightTier::Required, "strongest tier must win");
    }

    #[test]
    fn test_acronyms_extracted_and_lowercased() {
        let jd = "Our stack runs on GCP with strict SLA targets.";
        let set = extract(jd, &table());
        let terms = set.terms();
        assert!(terms.contains(&"gcp"), "terms: {terms:?}");
        assert!(terms.contains(&"sla"), "terms: {terms:?}");
    }

    #[test]
    fn test_stop_words_filtered() {
        let jd = "You will work with the team and this company. Python required with experience.";
        let set = extract(jd, &table());
        let terms = set.terms();
        assert!(!terms.contains(&"the"));
        assert!(!terms.contains(&"team"));
        assert!(!terms.contains(&"company"));
    }

    #[test]
    fn test_deduplication_accumulates_weight() {
        let jd = "python python python. Experience with python required.";
        let set = extract(jd, &table());
        let count = set.iter().filter(|k| k.term == "python").count();
        assert_eq!(count, 1, "terms must be deduplicated");
    }

    #[test]
    fn test_repeated_term_outranks_single_mention() {
        let jd = "docker docker docker docker and redis.";
        let set = extract(jd, &table());
        let docker_pos = set.terms().iter().position(|t| *t == "docker").unwrap();
        let redis_pos = set.terms().iter().position(|t| *t == "redis").unwrap();
        assert!(docker_pos < redis_pos, "more mentions must rank higher");
    }

    #[test]
    fn test_output_capped_at_max_keywords() {
        // Generate a description with far more candidate terms than the cap.
        let mut jd = String::from("Required skills in ");
        for i in 0..200 {
            jd.push_str(&format!("skillword{i:03}, "));
        }
        let set = extract(&jd, &table());
        assert!(set.len() <= MAX_KEYWORDS, "got {} keywords", set.len());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let jd = "Senior engineer. Required: Python, Flask, AWS, Docker. \
                  Nice to have: Kubernetes. Tech stack: postgresql, redis, react.";
        let a = extract(jd, &table());
        let b = extract(jd, &table());
        assert_eq!(a.terms(), b.terms());
        for (ka, kb) in a.iter().zip(b.iter()) {
            assert_eq!(ka.weight, kb.weight);
            assert_eq!(ka.tier, kb.tier);
        }
    }

    #[test]
    fn test_dotnet_keeps_leading_dot() {
        let jd = "Migrating legacy VB.NET services to modern platforms.";
        let set = extract(jd, &table());
        assert!(
            set.terms().contains(&".net"),
            "leading dot must survive: {:?}",
            set.terms()
        );
        // The synonym table can now resolve the extracted form.
        assert!(table().variants_of("c#").contains(&".net"));
    }

    #[test]
    fn test_short_tokens_dropped() {
        let jd = "Experience with go is required.";
        let set = extract(jd, &table());
        assert!(
            !set.terms().contains(&"go"),
            "two-letter tokens are below the length floor"
        );
    }
}
