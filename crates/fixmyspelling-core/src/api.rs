//! Wire format of the remote correction service and the HTTP client for it.
//!
//! `POST {base}/fix-my-spelling` and `POST {base}/improve-this-writing` both
//! take `{ "text": string }`. They answer `{ "corrected": string }` and
//! `{ "improved": string }` respectively.

use std::future::Future;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ServiceError;
use crate::types::{CorrectionMode, CorrectionRequest};

/// Request body for both resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionBody {
    pub text: String,
}

/// Response of `fix-my-spelling`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingReply {
    pub corrected: String,
}

/// Response of `improve-this-writing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImproveReply {
    pub improved: String,
}

/// Pull the corrected string for `mode` out of a response body.
pub fn parse_reply(mode: CorrectionMode, body: &str) -> Result<String, ServiceError> {
    match mode {
        CorrectionMode::Spelling => Ok(serde_json::from_str::<SpellingReply>(body)?.corrected),
        CorrectionMode::Improve => Ok(serde_json::from_str::<ImproveReply>(body)?.improved),
    }
}

/// Issues one correction request against a resolved resource URL.
pub trait CorrectionService {
    fn correct(
        &self,
        url: &Url,
        request: &CorrectionRequest,
    ) -> impl Future<Output = Result<String, ServiceError>>;
}

/// `reqwest`-backed service. On wasm this goes through `fetch`.
#[derive(Debug, Clone, Default)]
pub struct HttpCorrectionService {
    client: reqwest::Client,
}

impl HttpCorrectionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl CorrectionService for HttpCorrectionService {
    async fn correct(&self, url: &Url, request: &CorrectionRequest) -> Result<String, ServiceError> {
        tracing::debug!(
            target: "fixmyspelling::engine",
            id = %request.id,
            mode = %request.mode,
            %url,
            "sending correction request"
        );
        let response = self
            .client
            .post(url.clone())
            .json(&CorrectionBody {
                text: request.text.clone(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_reply(request.mode, &body)
    }
}
