//! Error types for the correction engine.

/// Error type for platform (DOM, storage, clipboard) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Why a call to the remote correction service failed.
///
/// None of these are distinguished for the user; they all surface as
/// [`CorrectionError::Service`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("service responded with HTTP {0}")]
    Status(u16),

    #[error("request could not be sent: {0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ServiceError::Status(status.as_u16())
        } else if err.is_decode() {
            ServiceError::Malformed(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Malformed(err.to_string())
    }
}

/// Failure taxonomy of one correction flow.
///
/// `NoEditableTarget` and `EmptyInput` are silent no-ops; the other two are
/// shown in the overlay using their `Display` text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorrectionError {
    #[error("No editable element focused")]
    NoEditableTarget,

    #[error("Nothing to correct")]
    EmptyInput,

    #[error("API endpoint not configured. Please set it in extension options.")]
    EndpointUnconfigured,

    #[error("Could not connect to API")]
    Service(#[source] ServiceError),
}

impl From<ServiceError> for CorrectionError {
    fn from(err: ServiceError) -> Self {
        CorrectionError::Service(err)
    }
}

impl CorrectionError {
    /// Whether this error is shown to the user at all.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            CorrectionError::EndpointUnconfigured | CorrectionError::Service(_)
        )
    }
}

/// Validation failures on the options page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("API endpoint is required")]
    Required,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Failed to save settings")]
    SaveFailed(#[source] PlatformError),

    #[error("Failed to clear settings")]
    ClearFailed(#[source] PlatformError),
}
