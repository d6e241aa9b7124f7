//! Element layer configuration

use crate::result::{ProbarError, ProbarResult};
use crate::wait::WaitOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tag name of the native selection control
pub const DEFAULT_SELECT_TAG: &str = "select";

/// Element layer configuration
///
/// ```yaml
/// wait:
///   timeout_ms: 5000
///   poll_interval_ms: 100
/// select_tag: select
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementConfig {
    /// Polling options used by `wait_for`
    pub wait: WaitOptions,
    /// Tag whose options are resolved by value before selection
    pub select_tag: String,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            wait: WaitOptions::default(),
            select_tag: DEFAULT_SELECT_TAG.to_string(),
        }
    }
}

impl ElementConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set wait options
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Set the poll interval used by `wait_for`
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.wait.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the select control tag
    #[must_use]
    pub fn with_select_tag(mut self, tag: impl Into<String>) -> Self {
        self.select_tag = tag.into();
        self
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> ProbarResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ProbarResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(target: "probar::config", path = %path.as_ref().display(), "loading element config");
        Self::from_yaml_str(&contents)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ProbarResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Validate values
    pub fn validate(&self) -> ProbarResult<()> {
        if self.wait.poll_interval_ms == 0 {
            return Err(ProbarError::config("wait.poll_interval_ms must be greater than zero"));
        }
        if self.select_tag.trim().is_empty() {
            return Err(ProbarError::config("select_tag must not be empty"));
        }
        Ok(())
    }
}
