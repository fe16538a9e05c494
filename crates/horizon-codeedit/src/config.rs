//! Editor behavior settings.
//!
//! [`EditorConfig`] is a plain value owned by the editor and handed to each
//! component per operation, so a change takes effect on the next event.
//! It can be loaded from TOML:
//!
//! ```toml
//! auto_parentheses = true
//! tab_replace = true
//! tab_replace_size = 2
//! auto_indentation = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use horizon_codeedit_core::logging::targets;

use crate::error::{ConfigError, Result};

/// Default number of spaces a tab expands to.
pub const DEFAULT_TAB_REPLACE_SIZE: usize = 4;

/// Text-mutation behaviors of the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Insert closing delimiters and quotes automatically.
    pub auto_parentheses: bool,
    /// Expand Tab into spaces.
    pub tab_replace: bool,
    /// Tab stop width in spaces; always at least 1.
    pub tab_replace_size: usize,
    /// Carry indentation over to new lines.
    pub auto_indentation: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_parentheses: true,
            tab_replace: true,
            tab_replace_size: DEFAULT_TAB_REPLACE_SIZE,
            auto_indentation: true,
        }
    }
}

impl EditorConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EditorConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.tab_replace_size == 0 {
            return Err(ConfigError::invalid_value(
                "tab_replace_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Set auto-parentheses using builder pattern.
    pub fn with_auto_parentheses(mut self, enabled: bool) -> Self {
        self.auto_parentheses = enabled;
        self
    }

    /// Set tab replacement using builder pattern.
    pub fn with_tab_replace(mut self, enabled: bool) -> Self {
        self.tab_replace = enabled;
        self
    }

    /// Set the tab width using builder pattern. Zero is raised to 1.
    pub fn with_tab_replace_size(mut self, size: usize) -> Self {
        self.tab_replace_size = size.max(1);
        self
    }

    /// Set auto-indentation using builder pattern.
    pub fn with_auto_indentation(mut self, enabled: bool) -> Self {
        self.auto_indentation = enabled;
        self
    }

    /// Tab stop width, never zero.
    pub fn tab_width(&self) -> usize {
        self.tab_replace_size.max(1)
    }

    /// The text one indentation level inserts.
    pub fn indent_unit(&self) -> String {
        if self.tab_replace {
            " ".repeat(self.tab_width())
        } else {
            "\t".to_string()
        }
    }
}
