//! Endpoint configuration: per-mode resource derivation and the cached store
//! lookup.

use std::cell::RefCell;
use std::future::Future;

use url::Url;

use crate::error::{PlatformError, ServiceError};
use crate::types::CorrectionMode;

/// Storage key of the configured base URL.
pub const ENDPOINT_KEY: &str = "apiEndpoint";

/// Asynchronous key-value persistence for the endpoint URL.
pub trait EndpointStore {
    fn load(&self) -> impl Future<Output = Result<Option<String>, PlatformError>>;
    fn save(&self, endpoint: &str) -> impl Future<Output = Result<(), PlatformError>>;
    fn clear(&self) -> impl Future<Output = Result<(), PlatformError>>;
}

/// Derive the resource URL for `mode` by replacing the final path segment of
/// the configured base.
///
/// `https://host/api/fix-my-spelling` becomes
/// `https://host/api/improve-this-writing` for [`CorrectionMode::Improve`].
pub fn derive_endpoint(base: &str, mode: CorrectionMode) -> Result<Url, ServiceError> {
    let mut url = Url::parse(base.trim()).map_err(|e| ServiceError::InvalidUrl(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ServiceError::InvalidUrl(format!("{base} cannot be a base")))?;
        segments.pop().push(mode.resource());
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Endpoint lookup cached after the first successful read.
///
/// A change notification replaces the cached value, including clearing it.
#[derive(Debug, Default)]
pub struct EndpointCache {
    cached: RefCell<Option<String>>,
}

impl EndpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> Option<String> {
        self.cached.borrow().clone()
    }

    /// Return the cached endpoint, or read it from `store`.
    ///
    /// Store failures read as "not configured". Empty values are treated the
    /// same as missing ones.
    pub async fn resolve<S: EndpointStore>(&self, store: &S) -> Option<String> {
        if let Some(endpoint) = self.cached() {
            return Some(endpoint);
        }
        // The borrow is released before awaiting.
        let loaded = match store.load().await {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(err) => {
                tracing::warn!(target: "fixmyspelling::endpoint", %err, "endpoint lookup failed");
                None
            }
        };
        if let Some(endpoint) = &loaded {
            *self.cached.borrow_mut() = Some(endpoint.clone());
        }
        loaded
    }

    /// Apply a change notification from the store.
    pub fn on_change(&self, new_value: Option<String>) {
        tracing::debug!(
            target: "fixmyspelling::endpoint",
            configured = new_value.is_some(),
            "endpoint changed"
        );
        *self.cached.borrow_mut() = new_value.filter(|v| !v.trim().is_empty());
    }
}
