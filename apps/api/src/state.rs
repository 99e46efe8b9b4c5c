use std::sync::Arc;

use crate::session::{ResumeSession, SkillSuggester};
use crate::tracker::BuildTracker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ResumeSession>,
    pub tracker: Arc<BuildTracker>,
    /// Pluggable skill suggester. Default: StaticSkillSuggester with the configured delay.
    pub skill_suggester: Arc<dyn SkillSuggester>,
}
