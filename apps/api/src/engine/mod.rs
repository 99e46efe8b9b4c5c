// Derivation engine: everything computed from a ResumeModel on each render.
// Pure and synchronous; nothing here is persisted.

pub mod ats;
pub mod bullets;
pub mod visibility;

use serde::{Deserialize, Serialize};

use crate::models::ResumeModel;

pub use ats::{AtsCheck, AtsReport, AtsRubric, CheckResult, ScoreBand, Suggestion};
pub use bullets::{has_numeric_indicator, review_bullets, starts_with_action_verb, BulletReview};
pub use visibility::{Section, SectionVisibility};

pub const MIN_SUGGESTIONS: usize = 3;
pub const MAX_SUGGESTIONS: usize = 5;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Everything derived from a model for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    pub visibility: SectionVisibility,
    pub score: u32,
    pub band: ScoreBand,
    pub suggestions: Vec<Suggestion>,
    pub checks: Vec<CheckResult>,
}

/// Holds the tunable rubric and the suggestion cap.
#[derive(Debug, Clone)]
pub struct DerivationEngine {
    rubric: AtsRubric,
    suggestion_limit: usize,
}

impl Default for DerivationEngine {
    fn default() -> Self {
        Self::new(AtsRubric::default(), DEFAULT_SUGGESTION_LIMIT)
    }
}

impl DerivationEngine {
    /// `suggestion_limit` is clamped to 3..=5.
    pub fn new(rubric: AtsRubric, suggestion_limit: usize) -> Self {
        Self {
            rubric,
            suggestion_limit: suggestion_limit.clamp(MIN_SUGGESTIONS, MAX_SUGGESTIONS),
        }
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }

    pub fn derive(&self, model: &ResumeModel) -> Derivation {
        let visibility = SectionVisibility::from_model(model);
        let report = ats::score(model, &self.rubric, self.suggestion_limit);
        Derivation {
            visibility,
            score: report.score,
            band: report.band,
            suggestions: report.suggestions,
            checks: report.checks,
        }
    }
}

/// Derives with the default rubric and suggestion limit.
pub fn derive(model: &ResumeModel) -> Derivation {
    DerivationEngine::default().derive(model)
}
