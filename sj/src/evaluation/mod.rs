//! Judge response model and validation
//!
//! The judge is asked for a JSON object of the shape
//!
//! ```text
//! {
//!     "score": 0.8,
//!     "reasoning": "...",
//!     "criteria_scores": {
//!         "detection_logic": 0.9,
//!         "completeness": 0.8,
//!         "false_positive_rate": 0.7,
//!         "technical_quality": 0.9
//!     }
//! }
//! ```
//!
//! The weights quoted in the prompt are hints to the judge. `score` is taken
//! as reported and never recomputed from `criteria_scores`.

mod error;
mod validate;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{ErrorKind, ResponseError};
pub use validate::{parse_response, validate_response};

/// One of the four scoring dimensions requested from the judge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    DetectionLogic,
    Completeness,
    FalsePositiveRate,
    TechnicalQuality,
}

impl Criterion {
    /// All criteria, in prompt order
    pub const ALL: [Criterion; 4] = [
        Criterion::DetectionLogic,
        Criterion::Completeness,
        Criterion::FalsePositiveRate,
        Criterion::TechnicalQuality,
    ];

    /// JSON key under `criteria_scores`
    pub fn key(&self) -> &'static str {
        match self {
            Self::DetectionLogic => "detection_logic",
            Self::Completeness => "completeness",
            Self::FalsePositiveRate => "false_positive_rate",
            Self::TechnicalQuality => "technical_quality",
        }
    }

    /// Heading used for this criterion in the prompt
    pub fn label(&self) -> &'static str {
        match self {
            Self::DetectionLogic => "Detection Logic Accuracy",
            Self::Completeness => "Coverage Completeness",
            Self::FalsePositiveRate => "False Positive Potential",
            Self::TechnicalQuality => "Technical Implementation",
        }
    }

    /// Advisory weight quoted in the prompt
    pub fn weight(&self) -> f64 {
        match self {
            Self::DetectionLogic => 0.40,
            Self::Completeness => 0.30,
            Self::FalsePositiveRate => 0.20,
            Self::TechnicalQuality => 0.10,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-criterion scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaScores {
    pub detection_logic: f64,
    pub completeness: f64,
    pub false_positive_rate: f64,
    pub technical_quality: f64,
}

impl CriteriaScores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::DetectionLogic => self.detection_logic,
            Criterion::Completeness => self.completeness,
            Criterion::FalsePositiveRate => self.false_positive_rate,
            Criterion::TechnicalQuality => self.technical_quality,
        }
    }

    /// Iterate over `(criterion, score)` pairs in prompt order
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Weighted sum using the weights quoted in the prompt
    pub fn weighted_score(&self) -> f64 {
        let weighted: f64 = self.iter().map(|(c, s)| c.weight() * s).sum();
        debug!(weighted, "CriteriaScores::weighted_score: computed");
        weighted
    }
}

/// A validated judge verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Overall score in [0, 1], as reported by the judge
    pub score: f64,
    /// Free-text explanation
    pub reasoning: String,
    pub criteria_scores: CriteriaScores,
}

impl EvaluationResult {
    /// Difference between the reported score and the weighted criteria sum
    ///
    /// Positive when the judge scored higher than its own criteria suggest.
    pub fn weighting_gap(&self) -> f64 {
        self.score - self.criteria_scores.weighted_score()
    }
}
