//! Lazily loaded, process-lifetime cache for the upstream API key.

use secrecy::Secret;
use std::sync::OnceLock;
use thiserror::Error;

type KeySource = Box<dyn Fn() -> Option<String> + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiKeyError {
    #[error("{0} environment variable is not set")]
    Missing(String),
}

/// Reads the API key on first use and keeps it until the process exits.
///
/// A missing or empty key is reported to the caller and not remembered, so a
/// later request re-reads the source. A key that loaded successfully is never
/// read again. Concurrent first loads may both hit the source; the first
/// stored value wins and the source is side-effect free.
pub struct ApiKeyCache {
    name: String,
    source: KeySource,
    key: OnceLock<Secret<String>>,
}

impl ApiKeyCache {
    /// Cache backed by the environment variable `var`.
    pub fn from_env(var: impl Into<String>) -> Self {
        let var = var.into();
        let lookup = var.clone();
        Self::with_source(var, move || std::env::var(&lookup).ok())
    }

    /// Cache backed by an arbitrary lookup. `name` appears in error messages.
    pub fn with_source<F>(name: impl Into<String>, source: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source: Box::new(source),
            key: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Result<&Secret<String>, ApiKeyError> {
        if let Some(key) = self.key.get() {
            return Ok(key);
        }

        let value = (self.source)()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiKeyError::Missing(self.name.clone()))?;

        tracing::debug!(source = %self.name, "Loaded upstream API key");
        Ok(self.key.get_or_init(|| Secret::new(value)))
    }
}

impl std::fmt::Debug for ApiKeyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCache")
            .field("name", &self.name)
            .field("loaded", &self.key.get().is_some())
            .finish()
    }
}
