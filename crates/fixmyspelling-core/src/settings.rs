//! Options page logic: endpoint validation, save and reset.

use std::time::Duration;

use url::Url;

use crate::endpoint::EndpointStore;
use crate::error::SettingsError;

/// How long a status line stays visible.
pub const STATUS_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    /// CSS class applied next to `status`.
    pub fn class(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// A status line shown below the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(err: &SettingsError) -> Self {
        Self {
            message: err.to_string(),
            kind: StatusKind::Error,
        }
    }
}

/// Trim and validate user input as an absolute http(s) URL.
pub fn validate_endpoint(input: &str) -> Result<String, SettingsError> {
    let endpoint = input.trim();
    if endpoint.is_empty() {
        return Err(SettingsError::Required);
    }
    let url = Url::parse(endpoint).map_err(|_| SettingsError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(endpoint.to_string()),
        _ => Err(SettingsError::InvalidUrl),
    }
}

/// Validate and persist the endpoint.
pub async fn save_endpoint<S: EndpointStore>(store: &S, input: &str) -> Status {
    let endpoint = match validate_endpoint(input) {
        Ok(endpoint) => endpoint,
        Err(err) => return Status::error(&err),
    };
    match store.save(&endpoint).await {
        Ok(()) => {
            tracing::info!(target: "fixmyspelling::endpoint", %endpoint, "endpoint saved");
            Status::success("Settings saved successfully!")
        }
        Err(err) => Status::error(&SettingsError::SaveFailed(err)),
    }
}

/// Remove the configured endpoint.
pub async fn reset_endpoint<S: EndpointStore>(store: &S) -> Status {
    match store.clear().await {
        Ok(()) => Status::success("API endpoint cleared"),
        Err(err) => Status::error(&SettingsError::ClearFailed(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::tests::MemoryStore;

    #[test]
    fn validation() {
        assert_eq!(validate_endpoint("   "), Err(SettingsError::Required));
        assert_eq!(validate_endpoint("example.com"), Err(SettingsError::InvalidUrl));
        assert_eq!(
            validate_endpoint("ftp://example.com/x"),
            Err(SettingsError::InvalidUrl)
        );
        assert_eq!(
            validate_endpoint(" https://api.example.com/fix-my-spelling \n").unwrap(),
            "https://api.example.com/fix-my-spelling"
        );
    }

    #[tokio::test]
    async fn save_then_reset() {
        let store = MemoryStore::default();
        let status = save_endpoint(&store, "http://localhost:8787/fix-my-spelling").await;
        assert_eq!(status, Status::success("Settings saved successfully!"));
        assert_eq!(
            store.value.borrow().as_deref(),
            Some("http://localhost:8787/fix-my-spelling")
        );

        let status = reset_endpoint(&store).await;
        assert_eq!(status.message, "API endpoint cleared");
        assert!(store.value.borrow().is_none());
    }

    #[tokio::test]
    async fn invalid_input_is_not_saved() {
        let store = MemoryStore::default();
        let status = save_endpoint(&store, "nope").await;
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, "Please enter a valid URL");
        assert!(store.value.borrow().is_none());
    }

    #[tokio::test]
    async fn storage_failures_are_reported() {
        let store = MemoryStore::default();
        store.fail.set(true);
        assert_eq!(
            save_endpoint(&store, "https://example.com/x").await.message,
            "Failed to save settings"
        );
        assert_eq!(reset_endpoint(&store).await.message, "Failed to clear settings");
    }
}
