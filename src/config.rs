//! Lifecycle engine configuration.
//!
//! Configuration is plain data with sensible defaults; every field may be
//! omitted from a TOML document.
//!
//! ```toml
//! transition_policy = "strict"
//! resubmission_window_days = 30
//!
//! [templates]
//! admin_created = "New ticket for {{ uid }}."
//! ```

use crate::notification::domain::{NotificationTemplates, TemplateError};
use crate::ticket::domain::TransitionPolicy;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A notification template does not render.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Settings for [`crate::ticket::services::TicketLifecycleService`].
///
/// # Examples
///
/// ```
/// use qrt::config::LifecycleConfig;
/// use qrt::ticket::domain::TransitionPolicy;
///
/// let config = LifecycleConfig::default();
/// assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
/// assert!(config.resubmission_window().is_none());
///
/// let strict = LifecycleConfig::strict();
/// assert_eq!(strict.transition_policy, TransitionPolicy::Strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Which status changes updates may make.
    pub transition_policy: TransitionPolicy,
    /// How far back a prior ticket counts as a re-submission. `None` keeps
    /// every prior ticket relevant forever.
    pub resubmission_window_days: Option<u32>,
    /// Notification wording.
    pub templates: NotificationTemplates,
}

impl LifecycleConfig {
    /// Creates a configuration that enforces the strict transition table.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            transition_policy: TransitionPolicy::Strict,
            ..Self::default()
        }
    }

    /// Sets the re-submission window.
    #[must_use]
    pub const fn with_resubmission_window_days(mut self, days: u32) -> Self {
        self.resubmission_window_days = Some(days);
        self
    }

    /// Returns the re-submission window as a duration.
    #[must_use]
    pub fn resubmission_window(&self) -> Option<TimeDelta> {
        self.resubmission_window_days
            .map(|days| TimeDelta::days(i64::from(days)))
    }

    /// Parses configuration from a TOML document and validates templates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents and
    /// [`ConfigError::Template`] for templates that do not render.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(document)?;
        config.templates.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&document)?;
        tracing::debug!(path = %path.display(), "loaded lifecycle configuration");
        Ok(config)
    }
}
