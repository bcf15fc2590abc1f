use std::sync::Arc;

use crate::config::Config;
use crate::model::TextModel;

pub struct AppStateInner<M> {
    pub cfg: Config,
    pub model: M,
}

pub struct AppState<M> {
    inner: Arc<AppStateInner<M>>,
}

// Manual impl: `M` itself need not be `Clone`.
impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: TextModel> AppState<M> {
    pub fn new(cfg: Config, model: M) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, model }),
        }
    }

    pub fn cfg(&self) -> &Config {
        &self.inner.as_ref().cfg
    }

    pub fn model(&self) -> &M {
        &self.inner.as_ref().model
    }
}
