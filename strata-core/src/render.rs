//! Rendering templates to JSON text

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::template::Template;

/// Rendering options
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of spaces for indentation (default: 4)
    pub indent_size: usize,

    /// Use tabs instead of spaces for indentation
    pub use_tabs: bool,

    /// Emit the whole document on one line
    pub compact: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_size: 4,
            use_tabs: false,
            compact: false,
        }
    }
}

impl RenderConfig {
    /// Get the string to use for a single level of indentation
    pub fn indent_string(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_size)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to serialize template: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rendered template is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render a template as JSON with every object's keys sorted
pub fn render(template: &Template, config: &RenderConfig) -> Result<String, RenderError> {
    // Going through serde_json::Value sorts keys at every level
    let document = serde_json::to_value(template)?;

    if config.compact {
        return Ok(serde_json::to_string(&document)?);
    }

    let indent = config.indent_string();
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
