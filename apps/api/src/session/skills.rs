//! Skill suggestion. Pluggable so a real recommender can replace the canned
//! list without touching the session or the handler.

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{ResumeModel, SkillCategory, SkillSet};
use crate::session::SessionError;

pub const DEFAULT_SUGGEST_DELAY: Duration = Duration::from_millis(800);

/// Carried in `AppState` as `Arc<dyn SkillSuggester>`.
#[async_trait]
pub trait SkillSuggester: Send + Sync {
    /// Proposes skills for `model`. May return skills the model already has;
    /// the caller de-duplicates on merge.
    async fn suggest(&self, model: &ResumeModel) -> Result<SkillSet, SessionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// StaticSkillSuggester
// ────────────────────────────────────────────────────────────────────────────

/// Waits `delay`, then returns a fixed set regardless of the model.
#[derive(Debug, Clone)]
pub struct StaticSkillSuggester {
    pub delay: Duration,
}

impl Default for StaticSkillSuggester {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SUGGEST_DELAY,
        }
    }
}

impl StaticSkillSuggester {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SkillSuggester for StaticSkillSuggester {
    async fn suggest(&self, _model: &ResumeModel) -> Result<SkillSet, SessionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(suggested_skills())
    }
}

pub fn suggested_skills() -> SkillSet {
    let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
    SkillSet {
        technical: owned(&["TypeScript", "React", "Node.js", "PostgreSQL", "GraphQL"]),
        soft: owned(&["Team Leadership", "Problem Solving"]),
        tools: owned(&["Git", "Docker", "AWS"]),
    }
}

/// Merges `suggested` into `skills`, skipping blanks and case-insensitive
/// duplicates. Returns how many skills were added.
pub fn merge_skills(skills: &mut SkillSet, suggested: &SkillSet) -> usize {
    SkillCategory::ALL
        .into_iter()
        .map(|category| {
            suggested
                .category(category)
                .iter()
                .filter(|s| skills.insert(category, s))
                .count()
        })
        .sum()
}
