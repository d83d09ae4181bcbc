//! Resume data model — the structured JSON shape shared by the optimizer,
//! renderer, validator, and AI parsing providers.
//!
//! Skills use `BTreeMap` rather than `HashMap` so that rendered output is
//! deterministic for a given input (same resume + JD must always produce
//! byte-identical HTML).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contact block. `name` and `email` are the only fields validation requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Personal {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// A quantified outcome attached to an achievement, e.g.
/// `{"value": 100000, "type": "revenue_impact"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One bullet-point accomplishment within a job.
///
/// `relevance_score` is an ephemeral per-request annotation written by the
/// reorderer; it is never part of the canonical resume and is omitted from
/// serialized output until an optimization has populated it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Achievement {
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    // Validation only warns about missing title/company, so the model must
    // accept their absence too.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

/// A skill category is either tiered (`{"expert": [...], "familiar": [...]}`)
/// or a flat list — both appear in real resume JSON, so accept either.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillGroup {
    Tiered(BTreeMap<String, Vec<String>>),
    Flat(Vec<String>),
}

impl SkillGroup {
    /// Every term in the group regardless of proficiency tier.
    pub fn terms(&self) -> Vec<&str> {
        match self {
            SkillGroup::Tiered(tiers) => tiers
                .values()
                .flat_map(|list| list.iter().map(String::as_str))
                .collect(),
            SkillGroup::Flat(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Full structured resume. Owned by the client; the optimizer never mutates
/// it — reordering produces a fresh `Vec<Experience>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resume {
    pub personal: Personal,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: BTreeMap<String, SkillGroup>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Resume {
    /// Returns a copy of this resume with its experience list replaced —
    /// used to build the optimized view without touching the original.
    pub fn with_experience(&self, experience: Vec<Experience>) -> Resume {
        Resume {
            experience,
            ..self.clone()
        }
    }
}
