//! Keyword extraction configuration — priority patterns, requirement-phrase
//! rules, stop words, and the tech-variation synonym table.
//!
//! Everything the extractor matches against lives here as an explicit,
//! testable structure instead of literals scattered through the algorithm.
//! The table is compiled once at startup and carried in `AppState`.

use std::collections::HashSet;

use regex::Regex;

/// Weight tier of an extracted keyword. Ordering matters: a term seen in a
/// "required" phrase outranks the same term seen in a "nice to have" list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WeightTier {
    Contextual,
    Preferred,
    Required,
}

impl WeightTier {
    /// Relative contribution of a match at this tier during relevance scoring.
    pub fn multiplier(self) -> f64 {
        match self {
            WeightTier::Required => 1.5,
            WeightTier::Preferred => 1.0,
            WeightTier::Contextual => 0.75,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightTier::Required => "required",
            WeightTier::Preferred => "preferred",
            WeightTier::Contextual => "contextual",
        }
    }
}

/// A domain-priority pattern. Terms it matches receive `weight` directly,
/// so earlier (higher-weight) rules dominate the extraction ranking.
#[derive(Debug)]
pub struct PatternRule {
    pub label: &'static str,
    pub regex: Regex,
    pub weight: f64,
}

/// A requirement-signal phrase. The capture group holds the clause that
/// follows the signal ("experience with X, Y and Z"); captured terms are
/// assigned `tier` and `weight`.
#[derive(Debug)]
pub struct PhraseRule {
    pub regex: Regex,
    pub tier: WeightTier,
    pub weight: f64,
}

/// The full extraction configuration.
pub struct PatternTable {
    pub priority: Vec<PatternRule>,
    pub phrases: Vec<PhraseRule>,
    /// Matches 2-6 letter all-caps acronyms in the original (non-lowercased) text.
    pub acronym: Regex,
    /// Tokenizes a captured clause into candidate terms (`node.js`, `ci/cd`).
    pub term_token: Regex,
    pub stop_words: HashSet<&'static str>,
    variations: Vec<(&'static str, Vec<&'static str>)>,
    high_priority: HashSet<&'static str>,
}

impl PatternTable {
    /// Builds the built-in table. Regex literals are compiled here once;
    /// a failure is a programming error caught at startup.
    pub fn builtin() -> Self {
        let priority_sources: &[(&str, &str)] = &[
            (
                "fintech",
                r"\b(fintech|financial technology|payments?|trading|defi|blockchain|cryptocurrency|crypto)\b",
            ),
            (
                "compliance",
                r"\b(compliance|kyc|aml|regulatory|custody|oracles?|yield)\b",
            ),
            (
                "defi-infra",
                r"\b(tvl|wrapped tokens?|proof of reserve|evm|layer 2|smart contracts?)\b",
            ),
            (
                "chains",
                r"\b(ethereum|polygon|bitcoin|web3|metamask|chainlink)\b",
            ),
            (
                "leadership-titles",
                r"\b(engineering manager|tech lead|architect|cto|director)\b",
            ),
            (
                "leadership",
                r"\b(team lead|leadership|management|mentoring|scaling)\b",
            ),
            (
                "languages-web",
                r"\b(python|javascript|typescript|react|node\.?js|django|flask)\b",
            ),
            (
                "languages-systems",
                r"\b(c#|\.net|asp\.net|java|spring|golang|rust|solidity)\b",
            ),
            (
                "infra",
                r"\b(aws|azure|gcp|docker|kubernetes|microservices)\b",
            ),
            (
                "api",
                r"\b(api|rest|restful|graphql|grpc|websocket)\b",
            ),
            (
                "devops",
                r"\b(ci/cd|devops|jenkins|github actions|gitlab)\b",
            ),
            (
                "databases",
                r"\b(postgresql|mysql|mongodb|redis|elasticsearch|influxdb)\b",
            ),
            (
                "databases-enterprise",
                r"\b(sql server|oracle|cassandra|dynamodb|snowflake)\b",
            ),
            (
                "security",
                r"\b(security|oauth|jwt|encryption|authentication|authorization)\b",
            ),
            (
                "compliance-standards",
                r"\b(pci dss|sox|gdpr|ccpa|hipaa|soc 2)\b",
            ),
            (
                "methodology",
                r"\b(agile|scrum|kanban|lean|tdd|bdd)\b",
            ),
            (
                "business-impact",
                r"\b(revenue|cost reduction|efficiency|performance|scale|growth)\b",
            ),
            (
                "business-metrics",
                r"\b(million|billion|percent|\$\d+[mk]?\b|\d+\+?\s*years?)\b",
            ),
            (
                "reliability",
                r"\b(uptime|sla|latency|throughput|scalability)\b",
            ),
        ];

        let rule_count = priority_sources.len();
        let priority = priority_sources
            .iter()
            .enumerate()
            .map(|(i, (label, source))| PatternRule {
                label,
                regex: Regex::new(source).expect("invalid priority pattern"),
                // Earlier rules are more important: weights descend by position.
                weight: (rule_count - i) as f64,
            })
            .collect();

        let phrases = vec![
            PhraseRule {
                regex: Regex::new(
                    r"(?i)(?:required|must have|experience with|proficient in|knowledge of|familiar with|expertise in)\s+([^.!?\n]+)",
                )
                .expect("invalid requirement phrase pattern"),
                tier: WeightTier::Required,
                weight: 3.0,
            },
            PhraseRule {
                regex: Regex::new(
                    r"(?i)(?:skills in|background in|deep understanding of|experience in)\s+([^.!?\n]+)",
                )
                .expect("invalid requirement phrase pattern"),
                tier: WeightTier::Required,
                weight: 3.0,
            },
            PhraseRule {
                regex: Regex::new(
                    r"(?i)(?:nice to have|preferred|bonus|a plus)[:\s]\s*([^.!?\n]+)",
                )
                .expect("invalid preference phrase pattern"),
                tier: WeightTier::Preferred,
                weight: 1.5,
            },
            PhraseRule {
                regex: Regex::new(
                    r"(?i)(?:tech stack|technology stack|technologies|tools|frameworks?|built with|working with):\s*([^.!?\n]+)",
                )
                .expect("invalid tech stack pattern"),
                tier: WeightTier::Contextual,
                weight: 2.0,
            },
        ];

        let stop_words: HashSet<&'static str> = [
            "the", "and", "with", "for", "you", "will", "are", "have", "our", "this", "that",
            "from", "they", "been", "would", "there", "their", "what", "said", "each", "which",
            "were", "than", "but", "not", "all", "any", "can", "had", "was", "one", "your", "how",
            "use", "may", "she", "its", "now", "him", "could", "did", "get", "has", "his", "her",
            "let", "put", "too", "also", "back", "call", "came", "come", "just", "like", "long",
            "look", "made", "make", "many", "over", "such", "take", "very", "well", "work", "who",
            "where", "when", "why", "some", "about", "into", "through", "during", "before",
            "after", "above", "below", "between", "among", "able", "team", "role", "position",
            "company", "business", "opportunity", "candidate", "inc", "llc", "corp", "ltd",
            "years", "plus", "strong", "solid",
        ]
        .into_iter()
        .collect();

        let variations: Vec<(&'static str, Vec<&'static str>)> = vec![
            ("javascript", vec!["js", "ecmascript", "node.js", "nodejs"]),
            ("typescript", vec!["ts"]),
            ("c#", vec!["csharp", "dotnet", ".net"]),
            ("postgresql", vec!["postgres", "psql"]),
            ("react", vec!["reactjs", "react.js"]),
            ("aws", vec!["amazon web services"]),
            ("ci/cd", vec!["continuous integration", "continuous deployment", "cicd"]),
            ("api", vec!["rest api", "restful api", "web api"]),
            ("blockchain", vec!["distributed ledger", "web3"]),
            ("defi", vec!["decentralized finance", "decentralised finance"]),
            ("fintech", vec!["financial technology", "fin-tech"]),
            ("kubernetes", vec!["k8s"]),
        ];

        let high_priority: HashSet<&'static str> = [
            "fintech", "blockchain", "defi", "python", "javascript", "react", "aws", "leadership",
            "management", "api", "postgresql", "docker", "microservices", "payments",
            "compliance", "security", "agile", "scrum", "ethereum", "trading", "yield", "tvl",
            "custody",
        ]
        .into_iter()
        .collect();

        PatternTable {
            priority,
            phrases,
            acronym: Regex::new(r"\b[A-Z]{2,6}\b").expect("invalid acronym pattern"),
            term_token: Regex::new(r"\b[a-z][a-z0-9]*(?:[.\-/#+][a-z0-9]+)*\b")
                .expect("invalid term token pattern"),
            stop_words,
            variations,
            high_priority,
        }
    }

    /// Known synonyms/variants for a technology term. Empty for unknown terms.
    pub fn variants_of(&self, term: &str) -> &[&'static str] {
        let needle = term.to_lowercase();
        self.variations
            .iter()
            .find(|(base, _)| *base == needle)
            .map(|(_, variants)| variants.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a keyword warrants bounded repetition in the ATS block.
    pub fn is_high_priority(&self, term: &str) -> bool {
        self.high_priority.contains(term.to_lowercase().as_str())
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }
}
