//! Error types for the styling system.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a style scheme.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed XML.
    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// File I/O error.
    #[error("Failed to read style scheme '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `<style>` entry without a `name` attribute.
    #[error("Element <{element}> is missing the '{attribute}' attribute")]
    MissingAttribute { element: String, attribute: String },

    /// Invalid attribute value.
    #[error("Invalid value for '{property}': {message}")]
    InvalidValue { property: String, message: String },
}

impl Error {
    /// Create an XML error.
    pub fn xml(position: u64, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}
