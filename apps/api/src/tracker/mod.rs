//! Build-track wizard: eight fixed steps, one text artifact per step, and the
//! final submission summary. Artifacts share the session's key-value store.

pub mod handlers;
pub mod steps;

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::session::store::{set_blocking, ARTIFACTS_KEY};
use crate::session::{KeyValueStore, StoreError};

pub use steps::{artifact_key, previous_step, step_by_id, step_number, BuildStep, STEPS};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("unknown build step '{0}'")]
    UnknownStep(String),

    #[error("artifact content for step '{0}' is empty")]
    EmptyArtifact(String),

    #[error("{missing} of {total} build steps are incomplete")]
    Incomplete { missing: usize, total: usize },

    #[error("failed to encode artifacts: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub content: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    pub number: usize,
    #[serde(flatten)]
    pub step: BuildStep,
    pub complete: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionLinks {
    pub lovable: String,
    pub github: String,
    pub deploy: String,
}

pub struct BuildTracker {
    artifacts: Mutex<BTreeMap<String, ArtifactRecord>>,
    store: Arc<dyn KeyValueStore>,
}

impl BuildTracker {
    /// Reads `rb_artifacts`. A missing or corrupt map starts the wizard empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let artifacts = match store.get(ARTIFACTS_KEY) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("Failed to parse stored artifacts: {e}");
                BTreeMap::new()
            }),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Could not read artifacts from store: {e}");
                BTreeMap::new()
            }
        };
        Self {
            artifacts: Mutex::new(artifacts),
            store,
        }
    }

    pub async fn artifact(&self, step_id: &str) -> Option<ArtifactRecord> {
        self.artifacts.lock().await.get(&artifact_key(step_id)).cloned()
    }

    pub async fn save_artifact(
        &self,
        step_id: &str,
        content: &str,
    ) -> Result<ArtifactRecord, TrackerError> {
        if step_by_id(step_id).is_none() {
            return Err(TrackerError::UnknownStep(step_id.to_string()));
        }
        if content.trim().is_empty() {
            return Err(TrackerError::EmptyArtifact(step_id.to_string()));
        }

        let record = ArtifactRecord {
            content: content.to_string(),
            uploaded_at: Utc::now(),
        };

        let mut artifacts = self.artifacts.lock().await;
        let mut next = artifacts.clone();
        next.insert(artifact_key(step_id), record.clone());
        set_blocking(&self.store, ARTIFACTS_KEY, serde_json::to_string(&next)?).await?;
        *artifacts = next;

        info!(step = step_id, "Artifact saved");
        Ok(record)
    }

    pub async fn is_step_complete(&self, step_id: &str) -> bool {
        self.artifacts
            .lock()
            .await
            .contains_key(&artifact_key(step_id))
    }

    /// Every step in wizard order with its completion flag.
    pub async fn all_steps_status(&self) -> Vec<StepStatus> {
        let artifacts = self.artifacts.lock().await;
        STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| StepStatus {
                number: i + 1,
                step: *step,
                complete: artifacts.contains_key(&artifact_key(step.id)),
            })
            .collect()
    }

    /// The first step, and any unknown id, has nothing before it.
    pub async fn is_previous_step_complete(&self, step_id: &str) -> bool {
        match previous_step(step_id) {
            Some(prev) => self.is_step_complete(prev.id).await,
            None => true,
        }
    }

    /// Next is allowed once the step has an artifact or a non-blank draft.
    pub async fn can_navigate_next(&self, step_id: &str, draft: &str) -> bool {
        self.is_step_complete(step_id).await || !draft.trim().is_empty()
    }

    /// Plain-text summary of the track. Refused until every step is complete.
    pub async fn submission(&self, links: &SubmissionLinks) -> Result<String, TrackerError> {
        let statuses = self.all_steps_status().await;
        let missing = statuses.iter().filter(|s| !s.complete).count();
        if missing > 0 {
            return Err(TrackerError::Incomplete {
                missing,
                total: statuses.len(),
            });
        }
        Ok(format_submission(&statuses, links))
    }
}

pub fn format_submission(statuses: &[StepStatus], links: &SubmissionLinks) -> String {
    let mut out = String::from("AI Resume Builder - Build Track Submission\n");
    out.push_str("=====================================\n\n");

    for status in statuses {
        let label = if status.complete { "COMPLETED" } else { "INCOMPLETE" };
        let _ = write!(
            out,
            "Step {}: {}\nStatus: {}\n\n",
            status.number, status.step.title, label
        );
    }

    out.push_str("\nLinks:\n");
    let _ = writeln!(out, "Lovable Link: {}", or_not_provided(&links.lovable));
    let _ = writeln!(out, "GitHub Link: {}", or_not_provided(&links.github));
    let _ = writeln!(out, "Deploy Link: {}", or_not_provided(&links.deploy));
    out
}

fn or_not_provided(link: &str) -> &str {
    let link = link.trim();
    if link.is_empty() {
        "Not provided"
    } else {
        link
    }
}
