pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::state::AppState;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session lifecycle
        .route("/api/v1/sessions", post(wizard::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(wizard::handle_get_session).delete(wizard::handle_end_session),
        )
        .route("/api/v1/sessions/:id/summary", get(wizard::handle_summary))
        // Navigation
        .route("/api/v1/sessions/:id/next", post(wizard::handle_next))
        .route("/api/v1/sessions/:id/previous", post(wizard::handle_previous))
        .route("/api/v1/sessions/:id/goto", post(wizard::handle_goto))
        // Step fields
        .route(
            "/api/v1/sessions/:id/personal",
            put(wizard::handle_update_personal),
        )
        .route(
            "/api/v1/sessions/:id/skills",
            put(wizard::handle_update_skills),
        )
        .route(
            "/api/v1/sessions/:id/job-description",
            put(wizard::handle_update_job_description),
        )
        .route(
            "/api/v1/sessions/:id/entries/:kind",
            post(wizard::handle_add_entry),
        )
        .route(
            "/api/v1/sessions/:id/entries/:kind/:index",
            put(wizard::handle_replace_entry).delete(wizard::handle_remove_entry),
        )
        // Generation
        .route(
            "/api/v1/sessions/:id/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/documents/:kind",
            get(generation::handle_download),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm_client::{LlmError, TextGenerator};
    use crate::render::{default_page_config, Renderer};
    use crate::wizard::store::SessionStore;

    struct CannedGenerator;

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok("Dear Hiring Manager,\n\nI would love to join.\n\nBest regards,\nJane Doe".to_string())
        }
    }

    struct QuotaExceeded;

    #[async_trait]
    impl TextGenerator for QuotaExceeded {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            })
        }
    }

    fn test_state(generator: Arc<dyn TextGenerator>) -> AppState {
        AppState {
            sessions: SessionStore::default(),
            generator,
            renderer: Renderer::new(default_page_config(), Vec::new()),
        }
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, bytes) = send_raw(app, method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn send_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, bytes::Bytes) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, bytes)
    }

    async fn create_session(app: &Router) -> String {
        let (status, body) = send(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_session_starts_on_step_one() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = create_session(&app).await;

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_step"]["number"], 1);
        assert_eq!(body["current_step"]["title"], "Personal Information");
        assert_eq!(body["steps"].as_array().unwrap().len(), 5);
        assert_eq!(body["documents_ready"], false);
    }

    #[tokio::test]
    async fn test_next_without_personal_info_is_rejected() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = create_session(&app).await;

        let (status, body) =
            send(&app, Method::POST, &format!("/api/v1/sessions/{id}/next"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(body["current_step"]["number"], 1);
    }

    #[tokio::test]
    async fn test_goto_later_step_skips_personal_info_check() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = create_session(&app).await;
        let goto = format!("/api/v1/sessions/{id}/goto");

        let (status, _) = send(&app, Method::POST, &goto, Some(json!({ "step": 2 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::POST, &goto, Some(json!({ "step": 4 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_step"]["number"], 4);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_entry_add_and_remove() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = create_session(&app).await;
        let entries = format!("/api/v1/sessions/{id}/entries/certifications");

        for title in ["CKA", "AWS SAA", "CKAD"] {
            let (status, body) = send(&app, Method::POST, &entries, Some(json!({ "title": title }))).await;
            assert_eq!(status, StatusCode::CREATED);
            let index = body["index"].as_u64().unwrap() as usize;
            let certifications = body["session"]["record"]["certifications"].as_array().unwrap();
            assert_eq!(certifications.len(), index + 1);
        }

        let (status, body) = send(&app, Method::DELETE, &format!("{entries}/1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["record"]["certifications"],
            json!([{ "title": "CKA" }, { "title": "CKAD" }])
        );

        let (status, _) = send(&app, Method::DELETE, &format!("{entries}/7"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_requires_final_step() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = create_session(&app).await;

        let (status, body) =
            send(&app, Method::POST, &format!("/api/v1/sessions/{id}/generate"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    /// Fills in Jane Doe's profile and walks the wizard to the final step.
    async fn complete_wizard(app: &Router) -> String {
        let id = create_session(app).await;
        let base = format!("/api/v1/sessions/{id}");

        let (status, _) = send(
            app,
            Method::PUT,
            &format!("{base}/personal"),
            Some(json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "+1 (555) 123-4567"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, Method::POST, &format!("{base}/next"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_step"]["number"], 2);

        send(app, Method::PUT, &format!("{base}/skills"), Some(json!({ "skills": "Rust, , Go,  " }))).await;
        send(
            app,
            Method::POST,
            &format!("{base}/entries/experience"),
            Some(json!({
                "title": "Backend Engineer",
                "company": "Acme",
                "duration": "2020 - Present",
                "description": "Built payment services"
            })),
        )
        .await;
        send(
            app,
            Method::POST,
            &format!("{base}/entries/education"),
            Some(json!({ "degree": "BSc CS", "institution": "State University" })),
        )
        .await;
        send(
            app,
            Method::PUT,
            &format!("{base}/job-description"),
            Some(json!({ "job_description": "Rust engineer for our billing platform." })),
        )
        .await;

        let (status, body) =
            send(app, Method::POST, &format!("{base}/goto"), Some(json!({ "step": 99 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_step"]["number"], 5);
        assert_eq!(body["record"]["skills"], json!(["Rust", "Go"]));

        id
    }

    #[tokio::test]
    async fn test_summary_counts_entries() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = complete_wizard(&app).await;

        let (status, body) =
            send(&app, Method::GET, &format!("/api/v1/sessions/{id}/summary"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], "Rust, Go");
        assert_eq!(body["experience_entries"], 1);
        assert_eq!(body["education_entries"], 1);
        assert_eq!(body["has_job_description"], true);
    }

    #[tokio::test]
    async fn test_generate_and_download_documents() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = complete_wizard(&app).await;

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/v1/sessions/{id}/documents/resume"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) =
            send(&app, Method::POST, &format!("/api/v1/sessions/{id}/generate"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["cover_letter_text"]
            .as_str()
            .unwrap()
            .starts_with("Dear Hiring Manager"));
        assert_eq!(body["resume"]["filename"], "Jane_Doe_resume.pdf");
        assert_eq!(body["cover_letter"]["filename"], "Jane_Doe_cover_letter.pdf");
        assert_eq!(body["resume"]["mime_type"], "application/pdf");

        for (kind, filename) in [
            ("resume", "Jane_Doe_resume.pdf"),
            ("cover_letter", "Jane_Doe_cover_letter.pdf"),
        ] {
            let (status, headers, bytes) = send_raw(
                &app,
                Method::GET,
                &format!("/api/v1/sessions/{id}/documents/{kind}"),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
            assert_eq!(
                headers[header::CONTENT_DISPOSITION],
                format!("attachment; filename=\"{filename}\"; filename*=UTF-8''{filename}").as_str()
            );
            assert!(bytes.starts_with(b"%PDF"));
        }

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(body["documents_ready"], true);
    }

    #[tokio::test]
    async fn test_llm_failure_is_surfaced_and_session_survives() {
        let app = build_router(test_state(Arc::new(QuotaExceeded)));
        let id = complete_wizard(&app).await;

        let (status, body) =
            send(&app, Method::POST, &format!("/api/v1/sessions/{id}/generate"), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["documents_ready"], false);
        assert_eq!(body["current_step"]["number"], 5);
    }

    #[tokio::test]
    async fn test_end_session() {
        let app = build_router(test_state(Arc::new(CannedGenerator)));
        let id = create_session(&app).await;

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
