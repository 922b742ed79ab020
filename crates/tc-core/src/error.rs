//! Error types for composition operations.
//!
//! Nothing here is fatal: every error leaves the composition renderable and
//! is reported to the user as a status message.

use thiserror::Error;

/// Result alias for `tc-core` operations.
pub type Result<T> = std::result::Result<T, ComposerError>;

#[derive(Error, Debug)]
pub enum ComposerError {
    /// Malformed or unreadable image input.
    #[error("could not decode image `{source_id}`: {reason}")]
    Decode {
        source_id: String,
        reason: String,
        #[source]
        source: Option<image::ImageError>,
    },

    #[error("unknown format key `{0}`")]
    UnknownFormat(String),

    #[error("no layer with id `{0}`")]
    UnknownLayer(String),

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    /// A property value that does not parse for its field.
    #[error("invalid value `{value}` for `{field}`")]
    InvalidValue { field: String, value: String },

    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
}

impl ComposerError {
    /// Short message suitable for the status line.
    pub fn status_message(&self) -> String {
        match self {
            Self::Decode { .. } => "Could not load image".to_string(),
            other => other.to_string(),
        }
    }
}
