//! Presenter configuration.
//!
//! Applications may embed a `[presenter]` table in their own TOML config
//! and hand the parsed value to
//! [`PresenterBuilder::config`](crate::presenter::PresenterBuilder::config).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading presenter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse presenter config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Presenter config validation failed: {message}")]
    ValidationError { message: String },
}

/// Behaviour switches for one presenter and the children it creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Name used in log fields. Defaults to the state type name.
    pub label: Option<String>,
    /// Log every dispatched action at trace level.
    pub trace_actions: bool,
    /// Cancel a presenter's in-flight effects when it is released
    /// (dropped, pruned from navigation, or dismissed).
    pub cancel_effects_on_release: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            label: None,
            trace_actions: true,
            cancel_effects_on_release: true,
        }
    }
}

impl PresenterConfig {
    /// Parse and validate a TOML fragment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PresenterConfig =
            toml::from_str(content).map_err(|source| ConfigError::ParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.label.as_deref(), Some(label) if label.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "label must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label to log under, falling back to the short state type name.
    pub(crate) fn resolve_label<S>(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => short_type_name::<S>().to_string(),
        }
    }

    /// Settings inherited by child and presented presenters.
    pub(crate) fn inherited(&self) -> Self {
        Self {
            label: None,
            ..self.clone()
        }
    }
}

fn short_type_name<S>() -> &'static str {
    let full = std::any::type_name::<S>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
