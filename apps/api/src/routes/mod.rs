pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::session::handlers as resume;
use crate::state::AppState;
use crate::tracker::handlers as tracker;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume builder
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume)
                .put(resume::handle_replace_resume)
                .delete(resume::handle_reset_resume),
        )
        .route("/api/v1/resume/actions", post(resume::handle_apply_action))
        .route(
            "/api/v1/resume/derivation",
            get(resume::handle_get_derivation),
        )
        .route("/api/v1/resume/bullets", get(resume::handle_get_bullets))
        .route("/api/v1/resume/preview", get(resume::handle_preview))
        .route("/api/v1/resume/template", put(resume::handle_set_template))
        .route("/api/v1/resume/theme", put(resume::handle_set_theme))
        .route("/api/v1/resume/export", get(resume::handle_export))
        .route(
            "/api/v1/resume/skills/suggest",
            post(resume::handle_suggest_skills),
        )
        // Build tracker
        .route("/api/v1/tracker/steps", get(tracker::handle_list_steps))
        .route("/api/v1/tracker/steps/:id", get(tracker::handle_get_step))
        .route(
            "/api/v1/tracker/steps/:id/artifact",
            put(tracker::handle_save_artifact),
        )
        .route("/api/v1/tracker/submission", post(tracker::handle_submission))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::engine::DerivationEngine;
    use crate::session::{KeyValueStore, MemoryStore, ResumeSession, StaticSkillSuggester};
    use crate::tracker::{BuildTracker, STEPS};

    fn app() -> Router {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let state = AppState {
            session: Arc::new(ResumeSession::load(store.clone(), DerivationEngine::default())),
            tracker: Arc::new(BuildTracker::load(store)),
            skill_suggester: Arc::new(StaticSkillSuggester::new(Duration::ZERO)),
        };
        build_router(state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-builder-api");
    }

    #[tokio::test]
    async fn test_action_returns_model_and_derivation() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/resume/actions",
            Some(json!({"type": "set_personal_field", "field": "name", "value": "Jane"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"]["personalInfo"]["name"], "Jane");
        assert_eq!(body["derivation"]["score"], 10);

        let (_, resume) = send(&app, "GET", "/api/v1/resume", None).await;
        assert_eq!(resume["model"]["personalInfo"]["name"], "Jane");
        assert_eq!(resume["template"], "classic");
    }

    #[tokio::test]
    async fn test_out_of_range_action_is_rejected() {
        let (status, body) = send(
            &app(),
            "POST",
            "/api/v1/resume/actions",
            Some(json!({"type": "remove_project", "index": 7})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_put_normalizes_legacy_shape() {
        let app = app();
        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/resume",
            Some(json!({"skills": "Rust, Axum", "projects": [{"name": "Site", "link": "https://site.dev"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"]["skills"]["technical"], json!(["Rust", "Axum"]));
        assert_eq!(body["model"]["projects"][0]["title"], "Site");
        assert_eq!(body["model"]["projects"][0]["liveUrl"], "https://site.dev");
        assert_eq!(body["model"]["education"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_put_non_object_is_bad_request() {
        let (status, _) = send(&app(), "PUT", "/api/v1/resume", Some(json!("text"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_uses_selection_and_lenient_overrides() {
        let app = app();
        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/resume/theme",
            Some(json!({"theme": "Burgundy"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, preview) = send(&app, "GET", "/api/v1/resume/preview", None).await;
        assert_eq!(preview["theme"], "burgundy");
        assert_eq!(preview["accent_color"], "#800020");

        let (_, preview) = send(
            &app,
            "GET",
            "/api/v1/resume/preview?template=fancy&theme=navy",
            None,
        )
        .await;
        assert_eq!(preview["template"], "classic");
        assert_eq!(preview["theme"], "navy");
    }

    #[tokio::test]
    async fn test_export_warns_on_empty_resume() {
        let (status, body) = send(&app(), "GET", "/api/v1/resume/export", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "");
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_suggest_skills_twice_adds_once() {
        let app = app();
        let (_, first) = send(&app, "POST", "/api/v1/resume/skills/suggest", None).await;
        let (_, second) = send(&app, "POST", "/api/v1/resume/skills/suggest", None).await;
        assert_eq!(first["added"], 10);
        assert_eq!(second["added"], 0);
        assert_eq!(second["skills"]["tools"], json!(["Git", "Docker", "AWS"]));
    }

    #[tokio::test]
    async fn test_tracker_flow() {
        let app = app();
        let (status, _) = send(&app, "GET", "/api/v1/tracker/steps/99-nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/tracker/steps/01-problem/artifact",
            Some(json!({"content": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/tracker/submission",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        for step in STEPS {
            let uri = format!("/api/v1/tracker/steps/{}/artifact", step.id);
            let (status, _) = send(&app, "PUT", &uri, Some(json!({"content": "done"}))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, detail) = send(&app, "GET", "/api/v1/tracker/steps/02-market", None).await;
        assert_eq!(detail["number"], 2);
        assert_eq!(detail["complete"], true);
        assert_eq!(detail["previousStepComplete"], true);
        assert_eq!(detail["artifact"]["content"], "done");

        let (_, list) = send(&app, "GET", "/api/v1/tracker/steps", None).await;
        assert_eq!(list["completed"], 8);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/tracker/submission",
            Some(json!({"deploy": "https://rb.app"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["submission"]
            .as_str()
            .unwrap()
            .ends_with("Deploy Link: https://rb.app\n"));
    }
}
