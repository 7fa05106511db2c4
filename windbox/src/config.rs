//! WindBox configuration

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

/// Header sub-element selector used when none is configured.
pub const DEFAULT_HEADER_SELECTOR: &str = "button";

/// Content sub-element selector used when none is configured.
pub const DEFAULT_CONTENT_SELECTOR: &str = "div";

/// Configuration for mounting accordion groups.
///
/// # Example
///
/// ```
/// use windbox::{MissingParts, WindBoxConfig};
///
/// let config = WindBoxConfig::new(".faq")
///     .custom_transitions(true)
///     .missing_parts(MissingParts::Skip);
/// assert_eq!(config.validate().unwrap(), ".faq");
///
/// let config = WindBoxConfig::from_json(r#"{"selector": ".faq", "customTransitions": "yes"}"#);
/// assert!(config.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindBoxConfig {
    /// Selector for the group containers. Every match becomes one group.
    pub selector: Option<String>,

    /// When true, open/closed state is expressed through the `open` class and
    /// external styling animates it. When false, inline `display` is toggled.
    pub custom_transitions: bool,

    /// Selector for the header inside each item.
    pub header_selector: String,

    /// Selector for the content panel inside each item.
    pub content_selector: String,

    /// What to do with items lacking a header or content element.
    pub missing_parts: MissingParts,
}

impl Default for WindBoxConfig {
    fn default() -> Self {
        Self {
            selector: None,
            custom_transitions: false,
            header_selector: DEFAULT_HEADER_SELECTOR.to_string(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            missing_parts: MissingParts::default(),
        }
    }
}

impl WindBoxConfig {
    /// Create a config for the given container selector.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Default::default()
        }
    }

    /// Build from optional parts, mirroring the `create(selector, customTransitions)` call shape.
    pub fn from_parts(selector: Option<&str>, custom_transitions: Option<bool>) -> Self {
        Self {
            selector: selector.map(str::to_string),
            custom_transitions: custom_transitions.unwrap_or(false),
            ..Default::default()
        }
    }

    /// Parse loosely typed JSON configuration.
    ///
    /// Recognised keys: `selector`, `customTransitions`, `headerSelector`,
    /// `contentSelector`, `missingParts` (`"reject"` or `"skip"`). A
    /// `customTransitions` value that is present but not a boolean is
    /// rejected; `null` counts as absent.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Parse an already-decoded JSON value. See [`WindBoxConfig::from_json`].
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_value(value)?;
        raw.try_into()
    }

    pub fn custom_transitions(mut self, enabled: bool) -> Self {
        self.custom_transitions = enabled;
        self
    }

    pub fn header_selector(mut self, selector: impl Into<String>) -> Self {
        self.header_selector = selector.into();
        self
    }

    pub fn content_selector(mut self, selector: impl Into<String>) -> Self {
        self.content_selector = selector.into();
        self
    }

    pub fn missing_parts(mut self, policy: MissingParts) -> Self {
        self.missing_parts = policy;
        self
    }

    /// The visibility policy implied by `custom_transitions`.
    pub fn visibility(&self) -> Visibility {
        if self.custom_transitions {
            Visibility::CustomTransitions
        } else {
            Visibility::Inline
        }
    }

    /// Check the config and return the container selector.
    pub fn validate(&self) -> Result<&str, ConfigError> {
        let selector = self
            .selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSelector)?;

        if self.header_selector.trim().is_empty() {
            return Err(ConfigError::EmptyPartSelector("header"));
        }
        if self.content_selector.trim().is_empty() {
            return Err(ConfigError::EmptyPartSelector("content"));
        }

        Ok(selector)
    }
}

/// Policy for items that lack a header or content element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingParts {
    /// Fail construction.
    #[default]
    Reject,
    /// Leave the item out of the group.
    Skip,
}

/// How open/closed state is made visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Inline `display: none` / `display: block`.
    Inline,
    /// `display` stays `block`; the `open` class drives external styling.
    CustomTransitions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    selector: Option<String>,
    #[serde(default)]
    custom_transitions: Value,
    header_selector: Option<String>,
    content_selector: Option<String>,
    missing_parts: Option<MissingParts>,
}

impl TryFrom<RawConfig> for WindBoxConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let custom_transitions = match raw.custom_transitions {
            Value::Null => false,
            Value::Bool(enabled) => enabled,
            other => return Err(ConfigError::InvalidTransitions(other.to_string())),
        };

        let defaults = WindBoxConfig::default();
        Ok(Self {
            selector: raw.selector,
            custom_transitions,
            header_selector: raw.header_selector.unwrap_or(defaults.header_selector),
            content_selector: raw.content_selector.unwrap_or(defaults.content_selector),
            missing_parts: raw.missing_parts.unwrap_or(defaults.missing_parts),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WindBoxConfig::new(".faq");
        assert_eq!(config.header_selector, "button");
        assert_eq!(config.content_selector, "div");
        assert_eq!(config.missing_parts, MissingParts::Reject);
        assert_eq!(config.visibility(), Visibility::Inline);
    }

    #[test]
    fn test_validate_trims_selector() {
        let config = WindBoxConfig::new("  .faq ");
        assert_eq!(config.validate().unwrap(), ".faq");
    }

    #[test]
    fn test_validate_rejects_blank_part_selectors() {
        let config = WindBoxConfig::new(".faq").header_selector(" ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPartSelector("header"))
        ));
    }
}
