// Optimization core: keyword extraction, relevance scoring, achievement
// reordering, ATS injection, and the pipeline that ties them together.
// Pure functions over the request payload plus the static pattern table.

pub mod ats;
pub mod handlers;
pub mod keyword_extractor;
pub mod patterns;
pub mod pipeline;
pub mod relevance_scorer;
