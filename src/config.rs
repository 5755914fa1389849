//! Widget options — the host-facing configuration surface.
//!
//! Every option is optional. Hosts either build [`WidgetOptions`] in code,
//! parse it from JSON, or let [`WidgetOptions::from_env`] pick up `WIDGET_*`
//! overrides. The answer generator is passed to the widget separately.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BUTTON_COLOR: &str = "#0070f3";
pub const DEFAULT_THEME_COLOR: &str = "#0070f3";
pub const DEFAULT_GREETING: &str = "👋 Hi there! How can I help you today?";
pub const DEFAULT_SYSTEM_INSTRUCTIONS: &str = "You are a helpful assistant";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid widget options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Visual and conversational options for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Fill color of the floating toggle button.
    pub button_color: String,
    /// Accent color for header, user bubbles, and the send button.
    pub theme_color: String,
    /// Text of the first ai message, shown on first open.
    pub greeting: String,
    /// Content of the `system` entry leading every transcript.
    pub system_instructions: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            button_color: DEFAULT_BUTTON_COLOR.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            system_instructions: DEFAULT_SYSTEM_INSTRUCTIONS.to_string(),
        }
    }
}

impl WidgetOptions {
    /// Defaults overridden by any of `WIDGET_BUTTON_COLOR`,
    /// `WIDGET_THEME_COLOR`, `WIDGET_GREETING`, `WIDGET_SYSTEM_INSTRUCTIONS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            button_color: env_or("WIDGET_BUTTON_COLOR", defaults.button_color),
            theme_color: env_or("WIDGET_THEME_COLOR", defaults.theme_color),
            greeting: env_or("WIDGET_GREETING", defaults.greeting),
            system_instructions: env_or("WIDGET_SYSTEM_INSTRUCTIONS", defaults.system_instructions),
        }
    }

    /// Parse host props such as `{"themeColor": "#00ff00"}`; missing keys keep defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `json` is not a valid options object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    #[must_use]
    pub fn with_system_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.system_instructions = instructions.into();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, button_color: impl Into<String>, theme_color: impl Into<String>) -> Self {
        self.button_color = button_color.into();
        self.theme_color = theme_color.into();
        self
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
