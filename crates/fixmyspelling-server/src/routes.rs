use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use fixmyspelling_core::{CorrectionBody, CorrectionMode, ImproveReply, SpellingReply};

use crate::api_error::ApiError;
use crate::model::{TextModel, prompt};
use crate::state::AppState;

pub fn router<M: TextModel>() -> Router<AppState<M>> {
    Router::new()
        .route("/health_check", get(health_check))
        .route(
            &format!("/{}", CorrectionMode::Spelling.resource()),
            post(fix_my_spelling::<M>),
        )
        .route(
            &format!("/{}", CorrectionMode::Improve.resource()),
            post(improve_this_writing::<M>),
        )
}

async fn health_check() -> &'static str {
    "ok"
}

async fn fix_my_spelling<M: TextModel>(
    State(state): State<AppState<M>>,
    body: Result<Json<CorrectionBody>, JsonRejection>,
) -> Result<Json<SpellingReply>, ApiError> {
    let corrected = run(&state, CorrectionMode::Spelling, body?.0).await?;
    Ok(Json(SpellingReply { corrected }))
}

async fn improve_this_writing<M: TextModel>(
    State(state): State<AppState<M>>,
    body: Result<Json<CorrectionBody>, JsonRejection>,
) -> Result<Json<ImproveReply>, ApiError> {
    let improved = run(&state, CorrectionMode::Improve, body?.0).await?;
    Ok(Json(ImproveReply { improved }))
}

async fn run<M: TextModel>(
    state: &AppState<M>,
    mode: CorrectionMode,
    body: CorrectionBody,
) -> Result<String, ApiError> {
    if body.text.is_empty() {
        return Err(ApiError::InvalidRequest("text must not be empty".into()));
    }
    tracing::debug!(target: "fixmyspelling::server", %mode, chars = body.text.chars().count(), "correcting");
    Ok(state.model().generate(prompt(mode, &body.text)).await?)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use tower_http::normalize_path::NormalizePath;

    use super::*;
    use crate::config::Config;
    use crate::model::ModelError;

    /// Echoes the text after the prompt's blank line, upper-cased.
    #[derive(Default)]
    struct FakeModel {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl TextModel for FakeModel {
        async fn generate(&self, prompt: String) -> Result<String, ModelError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            if self.fail {
                return Err(ModelError::Empty);
            }
            let text = prompt.split_once("\n\n").map(|(_, t)| t).unwrap_or_default();
            Ok(text.to_uppercase())
        }
    }

    fn app(model: FakeModel) -> (NormalizePath<Router>, AppState<FakeModel>) {
        let state = AppState::new(Config::default(), model);
        (crate::app(state.clone()), state)
    }

    async fn post_json(app: NormalizePath<Router>, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "https://mail.example")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn fix_my_spelling_returns_corrected() {
        let (app, state) = app(FakeModel::default());
        let (status, body) = post_json(app, "/fix-my-spelling", json!({ "text": "helo" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "corrected": "HELO" }));
        let prompts = state.model().prompts.lock().unwrap();
        assert!(prompts[0].starts_with("Fix the spelling and grammar"));
    }

    #[tokio::test]
    async fn improve_this_writing_returns_improved() {
        let (app, state) = app(FakeModel::default());
        let (status, body) =
            post_json(app, "/improve-this-writing", json!({ "text": "me go" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "improved": "ME GO" }));
        let prompts = state.model().prompts.lock().unwrap();
        assert!(prompts[0].starts_with("Improve the clarity"));
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let (app, state) = app(FakeModel::default());
        let (status, body) = post_json(app, "/fix-my-spelling", json!({ "text": "" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("must not be empty"));
        assert!(state.model().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_text_is_rejected() {
        let (app, _) = app(FakeModel::default());
        let (status, body) = post_json(app, "/fix-my-spelling", json!({ "body": "x" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid payload.");
    }

    #[tokio::test]
    async fn model_failure_is_bad_gateway() {
        let (app, _) = app(FakeModel {
            fail: true,
            ..Default::default()
        });
        let (status, body) = post_json(app, "/improve-this-writing", json!({ "text": "x" })).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn trailing_slash_is_normalized() {
        let (app, _) = app(FakeModel::default());
        let (status, body) = post_json(app, "/fix-my-spelling/", json!({ "text": "a" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["corrected"], "A");
    }
}
