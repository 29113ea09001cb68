//! Content quality scoring
//!
//! Distinguishes informative prose from navigation/UI residue using five
//! heuristic signals: sentence length variance, vocabulary richness,
//! information density, research language, and a noise penalty. Each signal
//! scores in `[0, 1]` and the overall score is their weighted sum. An
//! optional similarity model adds a sixth, semantic signal.

pub mod semantic;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub use semantic::{SimilarityModel, QUALITY_EXEMPLARS};

const WEIGHTS: &[(&str, f64)] = &[
    ("sentence_complexity", 0.2),
    ("vocabulary_richness", 0.15),
    ("information_density", 0.25),
    ("research_indicators", 0.3),
    ("noise_penalty", 0.1),
];

static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("SENTENCE_SPLIT regex"));

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("WORD regex"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?%?\b").expect("NUMBER regex"));

static STATS_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:million|billion|percent|average|median|rate)\b")
        .expect("STATS_TERMS regex")
});

static RESEARCH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bresearchers?\s+(?:found|discovered|showed|demonstrated)",
        r"\bstud(?:y|ies)\s+(?:show|showed|suggest|found|indicate)",
        r"\bscientists?\s+(?:found|discovered|believe|think)",
        r"\bevidence\s+suggests?",
        r"\baccording\s+to\s+(?:the\s+)?(?:study|research|scientists?|researchers?)",
        r"\bpublished\s+in\s+(?:the\s+)?",
        r"\bdata\s+(?:shows?|indicates?|suggests?)",
        r"\bfindings?\s+(?:show|showed|suggest|indicate)",
    ]
    .iter()
    .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
    .collect()
});

static NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^(?:Top\s+\d+|View\s+All|More|Next|Previous|Read\s+More)\b",
        r"^\d+\s*$",
        r"^(?:\d{1,2}\s+)?(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4}$",
        r"/(?:rss|feed|top|category|tag)/",
        r"\s*\|\s*",
    ]
    .iter()
    .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
    .collect()
});

/// Overall score plus the per-signal breakdown that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityScore {
    pub overall: f64,
    pub breakdown: BTreeMap<&'static str, f64>,
}

/// Heuristic content quality scorer with an optional semantic signal.
pub struct QualityScorer {
    min_score: f64,
    semantic: Option<Box<dyn SimilarityModel>>,
}

impl QualityScorer {
    pub fn new(min_score: f64) -> Self {
        Self {
            min_score,
            semantic: None,
        }
    }

    /// Adds a semantic similarity signal. Base signal weights are scaled by
    /// 0.9 and the semantic signal contributes the remaining 0.1.
    pub fn with_semantic_model(mut self, model: Box<dyn SimilarityModel>) -> Self {
        self.semantic = Some(model);
        self
    }

    /// Scores a block of text. Text shorter than 50 characters after
    /// trimming scores 0.0 with an empty breakdown.
    pub fn score(&self, text: &str) -> QualityScore {
        if text.trim().chars().count() < 50 {
            return QualityScore {
                overall: 0.0,
                breakdown: BTreeMap::new(),
            };
        }

        let mut breakdown = BTreeMap::new();
        breakdown.insert("sentence_complexity", score_sentence_complexity(text));
        breakdown.insert("vocabulary_richness", score_vocabulary_richness(text));
        breakdown.insert("information_density", score_information_density(text));
        breakdown.insert("research_indicators", score_research_indicators(text));
        breakdown.insert("noise_penalty", score_noise_penalty(text));

        let overall = match &self.semantic {
            None => WEIGHTS
                .iter()
                .map(|(key, weight)| breakdown[key] * weight)
                .sum(),
            Some(model) => {
                let semantic = QUALITY_EXEMPLARS
                    .iter()
                    .map(|exemplar| model.similarity(text, exemplar))
                    .fold(0.0_f64, f64::max);
                breakdown.insert("semantic_quality", semantic);
                let base: f64 = WEIGHTS
                    .iter()
                    .map(|(key, weight)| breakdown[key] * weight * 0.9)
                    .sum();
                base + semantic * 0.1
            }
        };

        QualityScore { overall, breakdown }
    }

    /// True when `text` meets the configured threshold.
    pub fn is_quality(&self, text: &str) -> bool {
        self.score(text).overall >= self.min_score
    }

    /// Keeps only the paragraphs (blank-line separated) that individually
    /// meet the threshold.
    pub fn filter_paragraphs(&self, text: &str) -> String {
        static PARAGRAPH_SPLIT: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\n\s*\n").expect("PARAGRAPH_SPLIT regex"));

        PARAGRAPH_SPLIT
            .split(text)
            .map(str::trim)
            .filter(|para| !para.is_empty() && self.is_quality(para))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl std::fmt::Debug for QualityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityScorer")
            .field("min_score", &self.min_score)
            .field("semantic", &self.semantic.is_some())
            .finish()
    }
}

/// Sentence length variance, as coefficient of variation normalized against
/// 0.7. Natural prose varies; UI strings are uniform.
fn score_sentence_complexity(text: &str) -> f64 {
    let sentences: Vec<&str> = SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() < 2 {
        return 0.3;
    }

    let word_counts: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    let mean = word_counts.iter().sum::<f64>() / word_counts.len() as f64;
    if mean == 0.0 {
        return 0.3;
    }

    // Sample standard deviation (n - 1)
    let variance = word_counts
        .iter()
        .map(|count| (count - mean).powi(2))
        .sum::<f64>()
        / (word_counts.len() - 1) as f64;
    let cv = variance.sqrt() / mean;
    (cv / 0.7).clamp(0.0, 1.0)
}

/// Type-token ratio over alphabetic words of three or more letters.
fn score_vocabulary_richness(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();

    if words.len() < 10 {
        return 0.4;
    }

    let unique: std::collections::HashSet<&&str> = words.iter().collect();
    let ttr = unique.len() as f64 / words.len() as f64;

    if ttr < 0.3 {
        0.2
    } else if ttr > 0.7 {
        1.0
    } else {
        (ttr - 0.3) / 0.4
    }
}

/// Additive signal from numbers, capitalized non-initial words, long words,
/// and statistics vocabulary.
fn score_information_density(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 10 {
        return 0.3;
    }

    let mut score: f64 = 0.0;

    if NUMBER.is_match(text) {
        score += 0.3;
    }

    let mut proper_nouns = 0;
    for sentence in SENTENCE_SPLIT.split(text) {
        // First word of a sentence is capitalized anyway
        for word in sentence.split_whitespace().skip(1) {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                if first.is_uppercase() && chars.next().is_some() {
                    proper_nouns += 1;
                }
            }
        }
    }
    if proper_nouns > 2 {
        score += 0.3;
    }

    let long_words = words.iter().filter(|w| w.chars().count() > 8).count();
    if long_words as f64 > words.len() as f64 * 0.1 {
        score += 0.2;
    }

    if STATS_TERMS.is_match(text) {
        score += 0.2;
    }

    score.min(1.0)
}

/// Fraction of research-language patterns present, capped at three.
fn score_research_indicators(text: &str) -> f64 {
    let matches = RESEARCH_PATTERNS
        .iter()
        .filter(|pattern| pattern.is_match(text))
        .count();
    (matches as f64 / 3.0).min(1.0)
}

/// Inverted ratio of lines matching navigation/UI patterns.
fn score_noise_penalty(text: &str) -> f64 {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return 1.0;
    }

    let noise_lines = lines
        .iter()
        .filter(|line| NOISE_PATTERNS.iter().any(|pattern| pattern.is_match(line)))
        .count();

    1.0 - (noise_lines as f64 / lines.len() as f64).min(1.0)
}
