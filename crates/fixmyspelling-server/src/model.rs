//! The text model behind both endpoints.

use std::future::Future;

use fixmyspelling_core::CorrectionMode;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::ModelConfig;

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    #[diagnostic(code(model::transport))]
    Transport(#[from] reqwest::Error),

    #[error("model returned status {status}: {body}")]
    #[diagnostic(code(model::status))]
    Status { status: u16, body: String },

    #[error("model returned no text")]
    #[diagnostic(code(model::empty))]
    Empty,

    #[error("invalid model url: {0}")]
    #[diagnostic(code(model::url))]
    Url(String),
}

/// Instruction sent ahead of the user's text.
pub fn prompt(mode: CorrectionMode, text: &str) -> String {
    let instruction = match mode {
        CorrectionMode::Spelling => {
            "Fix the spelling and grammar in the following text. Only return the corrected text, nothing else:"
        }
        CorrectionMode::Improve => {
            "Improve the clarity and flow of the following text while keeping its meaning and tone. Only return the improved text, nothing else:"
        }
    };
    format!("{instruction}\n\n{text}")
}

/// A single-turn, non-streaming text generator.
pub trait TextModel: Send + Sync + 'static {
    fn generate(&self, prompt: String) -> impl Future<Output = Result<String, ModelError>> + Send;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Gemini `generateContent` over REST.
#[derive(Clone, Debug)]
pub struct GeminiModel {
    client: reqwest::Client,
    url: Url,
    api_key: String,
}

impl GeminiModel {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let url = format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );
        let url = Url::parse(&url).map_err(|e| ModelError::Url(e.to_string()))?;
        Ok(Self {
            client: reqwest::Client::new(),
            url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl TextModel for GeminiModel {
    async fn generate(&self, prompt: String) -> Result<String, ModelError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: &prompt }],
            }],
        };
        let response = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response.json().await?;
        reply.text().ok_or(ModelError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_puts_text_after_blank_line() {
        let p = prompt(CorrectionMode::Spelling, "Helo wrld");
        assert!(p.starts_with("Fix the spelling and grammar"));
        assert!(p.ends_with("nothing else:\n\nHelo wrld"));
        assert!(prompt(CorrectionMode::Improve, "x").starts_with("Improve the clarity"));
    }

    #[test]
    fn first_candidate_parts_are_joined() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"Hello "},{"text":"world"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(reply.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn no_candidates_is_empty() {
        let reply: GenerateResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert!(reply.text().is_none());
    }

    #[test]
    fn model_url_from_config() {
        let model = GeminiModel::new(&ModelConfig {
            api_base: "https://example.com/v1beta/".into(),
            model: "m-1".into(),
            api_key: "k".into(),
        })
        .unwrap();
        assert_eq!(model.url().as_str(), "https://example.com/v1beta/models/m-1:generateContent");
    }
}
