//! Semantic quality scoring hook
//!
//! The heuristic scorer can be extended with an embedding-based similarity
//! model. The model is injected behind a trait so the scorer itself stays
//! free of any inference runtime.

/// Sentence-pair similarity provider.
///
/// Implementations return a similarity in `[0, 1]` between two texts.
/// Scoring happens on the crawl task, so implementations must be
/// `Send + Sync`.
pub trait SimilarityModel: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Exemplar sentences of informative prose. Content is scored by its best
/// similarity against any of these.
pub const QUALITY_EXEMPLARS: &[&str] = &[
    "Researchers conducted a comprehensive study analyzing the effects and implications.",
    "The scientific evidence demonstrates significant findings about the phenomenon.",
    "According to published research, the data indicates important correlations.",
    "Scientists discovered new insights through systematic investigation and analysis.",
];
