use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use hyper::StatusCode;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::model::ModelError;

/// Handler errors.
#[derive(Error, Debug, Diagnostic)]
pub enum ApiError {
    /// Converts from an Axum built-in extractor error.
    #[error("Invalid payload.")]
    #[diagnostic()]
    InvalidJsonBody(#[from] JsonRejection),

    /// For errors that occur during manual validation.
    #[error("Invalid request: {0}")]
    #[diagnostic()]
    InvalidRequest(String),

    #[error("The text model could not produce a result.")]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiErrorResp {
    pub error: String,
}

// The detailed cause goes to the log, the client only sees the summary.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidJsonBody(err) => {
                warn!(target: "fixmyspelling::server", "{}", err.body_text())
            }
            ApiError::InvalidRequest(_) => warn!(target: "fixmyspelling::server", "{}", self),
            ApiError::Model(err) => error!(target: "fixmyspelling::server", "{}", err),
        }

        let resp = ApiErrorResp {
            error: self.to_string(),
        };

        let status = match self {
            ApiError::InvalidJsonBody(_) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Model(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(resp)).into_response()
    }
}
