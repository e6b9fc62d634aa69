//! Engine configuration

use crate::errors::{backend_unavailable, Result};

/// URL of the default ephemeral database
pub const MEMORY_URL: &str = "sqlite:///:memory:";

const MEMORY_URLS: &[&str] = &["sqlite://", MEMORY_URL, "sqlite::memory:", ":memory:"];

/// Settings for opening an [`Engine`](crate::Engine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Database URL; only in-memory SQLite is supported
    pub url: String,
    /// Emit every executed SQL statement on the `declmap::sql` target
    pub echo: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: MEMORY_URL.to_string(),
            echo: false,
        }
    }
}

impl EngineConfig {
    /// Configuration for the given URL with default settings
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Check that the URL names an ephemeral database
    ///
    /// # Errors
    ///
    /// Returns `BackendUnavailable` for any URL that would persist data.
    pub fn validate(&self) -> Result<()> {
        if MEMORY_URLS.contains(&self.url.as_str()) {
            Ok(())
        } else {
            Err(backend_unavailable(
                "connect",
                format!(
                    "unsupported database URL '{}': only in-memory SQLite is available",
                    self.url
                ),
            ))
        }
    }
}
