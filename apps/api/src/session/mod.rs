// Builder session: the single editable resume, its template/theme selection,
// and the store it is persisted to.

pub mod actions;
pub mod handlers;
pub mod skills;
pub mod store;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::engine::{review_bullets, BulletReview, Derivation, DerivationEngine};
use crate::models::{ModelError, ResumeModel, SkillSet};
use crate::render::{export_plain_text, render, ColorTheme, PlainTextExport, RenderedResume, TemplateName};

pub use actions::ResumeAction;
pub use skills::{SkillSuggester, StaticSkillSuggester};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

use skills::merge_skills;
use store::{set_blocking, COLOR_THEME_KEY, RESUME_DATA_KEY, TEMPLATE_KEY};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{section} index {index} is out of range (have {len})")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid resume data: {0}")]
    InvalidModel(#[from] ModelError),

    #[error("failed to encode session state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub model: ResumeModel,
    pub template: TemplateName,
    pub theme: ColorTheme,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestOutcome {
    pub added: usize,
    pub skills: SkillSet,
}

struct SessionState {
    model: ResumeModel,
    template: TemplateName,
    theme: ColorTheme,
}

/// One resume being edited. All state sits behind a single async mutex;
/// a mutation is persisted before it becomes visible in memory.
pub struct ResumeSession {
    state: Mutex<SessionState>,
    store: Arc<dyn KeyValueStore>,
    engine: DerivationEngine,
}

impl ResumeSession {
    /// Rehydrates from `store`. Missing or unreadable values fall back to defaults.
    pub fn load(store: Arc<dyn KeyValueStore>, engine: DerivationEngine) -> Self {
        let model = read_key(store.as_ref(), RESUME_DATA_KEY)
            .map(|text| match serde_json::from_str::<Value>(&text) {
                Ok(value) => ResumeModel::normalize(&value),
                Err(e) => {
                    warn!("Stored resume data is not valid JSON, starting fresh: {e}");
                    ResumeModel::default()
                }
            })
            .unwrap_or_default();
        let template = read_key(store.as_ref(), TEMPLATE_KEY)
            .map(|raw| TemplateName::from_persisted(&raw))
            .unwrap_or_default();
        let theme = read_key(store.as_ref(), COLOR_THEME_KEY)
            .map(|raw| ColorTheme::from_persisted(&raw))
            .unwrap_or_default();

        info!(%template, %theme, "Resume session loaded");

        Self {
            state: Mutex::new(SessionState {
                model,
                template,
                theme,
            }),
            store,
            engine,
        }
    }

    pub fn engine(&self) -> &DerivationEngine {
        &self.engine
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            model: state.model.clone(),
            template: state.template,
            theme: state.theme,
        }
    }

    pub async fn model(&self) -> ResumeModel {
        self.state.lock().await.model.clone()
    }

    /// Applies one reducer action and persists the result.
    pub async fn apply(&self, action: ResumeAction) -> Result<ResumeModel, SessionError> {
        let mut state = self.state.lock().await;
        let mut next = state.model.clone();
        actions::apply(&mut next, action)?;
        self.persist_model(&next).await?;
        state.model = next;
        Ok(state.model.clone())
    }

    /// Replaces the whole model with a normalized copy of `raw`.
    pub async fn replace(&self, raw: &Value) -> Result<ResumeModel, SessionError> {
        let next = ResumeModel::try_normalize(raw)?;
        let mut state = self.state.lock().await;
        self.persist_model(&next).await?;
        state.model = next;
        Ok(state.model.clone())
    }

    pub async fn reset(&self) -> Result<ResumeModel, SessionError> {
        self.apply(ResumeAction::Reset).await
    }

    pub async fn set_template(&self, template: TemplateName) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        set_blocking(&self.store, TEMPLATE_KEY, serde_json::to_string(&template)?).await?;
        state.template = template;
        debug!(%template, "Template selected");
        Ok(())
    }

    pub async fn set_theme(&self, theme: ColorTheme) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        set_blocking(&self.store, COLOR_THEME_KEY, serde_json::to_string(&theme)?).await?;
        state.theme = theme;
        debug!(%theme, "Colour theme selected");
        Ok(())
    }

    pub async fn derivation(&self) -> Derivation {
        let model = self.model().await;
        self.engine.derive(&model)
    }

    pub async fn bullets(&self) -> Vec<BulletReview> {
        review_bullets(&self.model().await)
    }

    /// Renders with the stored selection unless overridden.
    pub async fn preview(
        &self,
        template: Option<TemplateName>,
        theme: Option<ColorTheme>,
    ) -> RenderedResume {
        let snapshot = self.snapshot().await;
        render(
            &snapshot.model,
            template.unwrap_or(snapshot.template),
            theme.unwrap_or(snapshot.theme),
        )
    }

    pub async fn export(&self) -> PlainTextExport {
        export_plain_text(&self.model().await)
    }

    /// Runs `suggester` outside the lock, then merges its output into the
    /// current model. Concurrent calls cannot add the same skill twice.
    pub async fn suggest_skills(
        &self,
        suggester: &dyn SkillSuggester,
    ) -> Result<SkillSuggestOutcome, SessionError> {
        let basis = self.model().await;
        let suggested = suggester.suggest(&basis).await?;

        let mut state = self.state.lock().await;
        let mut next = state.model.clone();
        let added = merge_skills(&mut next.skills, &suggested);
        if added > 0 {
            self.persist_model(&next).await?;
            state.model = next;
        }
        info!(added, "Merged suggested skills");
        Ok(SkillSuggestOutcome {
            added,
            skills: state.model.skills.clone(),
        })
    }

    async fn persist_model(&self, model: &ResumeModel) -> Result<(), SessionError> {
        let text = serde_json::to_string(model)?;
        set_blocking(&self.store, RESUME_DATA_KEY, text)
            .await
            .map_err(|e| {
                warn!("Failed to persist resume data: {e}");
                SessionError::from(e)
            })
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Could not read '{key}' from store: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillCategory;
    use serde_json::json;
    use std::time::Duration;

    fn session_with(store: Arc<dyn KeyValueStore>) -> ResumeSession {
        ResumeSession::load(store, DerivationEngine::default())
    }

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let session = session_with(Arc::new(MemoryStore::new()));
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.model, ResumeModel::default());
        assert_eq!(snapshot.template, TemplateName::Classic);
        assert_eq!(snapshot.theme, ColorTheme::Teal);
    }

    #[tokio::test]
    async fn test_load_normalizes_legacy_data_and_selection() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                RESUME_DATA_KEY,
                r#"{"personalInfo":{"name":"Jane"},"skills":"Rust, Go","projects":[{"name":"Old","link":"https://github.com/j/old"}]}"#,
            )
            .unwrap();
        store.set(TEMPLATE_KEY, "\"minimal\"").unwrap();
        store.set(COLOR_THEME_KEY, "not-a-theme").unwrap();

        let session = session_with(store);
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.model.personal_info.name, "Jane");
        assert_eq!(snapshot.model.skills.technical, vec!["Rust", "Go"]);
        assert_eq!(snapshot.model.projects[0].title, "Old");
        assert_eq!(snapshot.model.projects[0].github_url, "https://github.com/j/old");
        assert_eq!(snapshot.template, TemplateName::Minimal);
        assert_eq!(snapshot.theme, ColorTheme::Teal);
    }

    #[tokio::test]
    async fn test_corrupt_resume_data_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(RESUME_DATA_KEY, "{not json").unwrap();
        let session = session_with(store);
        assert_eq!(session.model().await, ResumeModel::default());
    }

    #[tokio::test]
    async fn test_apply_persists_every_mutation() {
        let store = Arc::new(MemoryStore::new());
        let session = session_with(store.clone());
        session
            .apply(ResumeAction::SetSummary {
                value: "Engineer".to_string(),
            })
            .await
            .unwrap();

        let stored = store.get(RESUME_DATA_KEY).unwrap().unwrap();
        let reloaded = ResumeModel::from_json_str(&stored).unwrap();
        assert_eq!(reloaded.summary, "Engineer");
    }

    #[tokio::test]
    async fn test_rejected_action_leaves_store_untouched() {
        let store = Arc::new(MemoryStore::new());
        let session = session_with(store.clone());
        let err = session
            .apply(ResumeAction::RemoveExperience { index: 5 })
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange { .. }));
        assert_eq!(store.get(RESUME_DATA_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_backed_session_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        let session = session_with(store.clone());
        session
            .apply(ResumeAction::SetSummary {
                value: "Platform engineer".to_string(),
            })
            .await
            .unwrap();
        session.set_template(TemplateName::Modern).await.unwrap();

        let reloaded = session_with(store).snapshot().await;
        assert_eq!(reloaded.model.summary, "Platform engineer");
        assert_eq!(reloaded.template, TemplateName::Modern);
    }

    #[tokio::test]
    async fn test_replace_rejects_non_object() {
        let session = session_with(Arc::new(MemoryStore::new()));
        let err = session.replace(&json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidModel(_)));
    }

    #[tokio::test]
    async fn test_selection_survives_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = session_with(store.clone());
        session.set_template(TemplateName::Modern).await.unwrap();
        session.set_theme(ColorTheme::Forest).await.unwrap();

        let reloaded = session_with(store).snapshot().await;
        assert_eq!(reloaded.template, TemplateName::Modern);
        assert_eq!(reloaded.theme, ColorTheme::Forest);
    }

    #[tokio::test]
    async fn test_preview_override_does_not_change_selection() {
        let session = session_with(Arc::new(MemoryStore::new()));
        let rendered = session
            .preview(Some(TemplateName::Modern), Some(ColorTheme::Navy))
            .await;
        assert_eq!(rendered.template, TemplateName::Modern);
        assert_eq!(rendered.accent_color, "#1e3a8a");
        assert_eq!(session.snapshot().await.template, TemplateName::Classic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_suggestions_never_duplicate() {
        let session = Arc::new(session_with(Arc::new(MemoryStore::new())));
        session
            .apply(ResumeAction::AddSkill {
                category: SkillCategory::Tools,
                skill: "docker".to_string(),
            })
            .await
            .unwrap();

        let suggester = StaticSkillSuggester::new(Duration::from_millis(800));
        let (a, b) = tokio::join!(
            session.suggest_skills(&suggester),
            session.suggest_skills(&suggester)
        );
        assert_eq!(a.unwrap().added + b.unwrap().added, 9);

        let skills = session.model().await.skills;
        assert_eq!(skills.technical.len(), 5);
        assert_eq!(skills.soft.len(), 2);
        assert_eq!(skills.tools, vec!["docker", "Git", "AWS"]);
    }
}
