//! Output format presets.
//!
//! Formats are a fixed, immutable set: a pixel resolution plus a safe-area
//! guide. The safe area is cosmetic and never enforced on layer boxes.

use crate::error::{ComposerError, Result};
use crate::geometry::NormalizedBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key of one of the built-in output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FormatKey {
    #[default]
    #[serde(rename = "youtube_16_9")]
    YouTube,
    #[serde(rename = "pinterest_2_3")]
    Pinterest,
    #[serde(rename = "story_9_16")]
    Story,
}

impl FormatKey {
    pub const ALL: [FormatKey; 3] = [FormatKey::YouTube, FormatKey::Pinterest, FormatKey::Story];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube_16_9",
            Self::Pinterest => "pinterest_2_3",
            Self::Story => "story_9_16",
        }
    }

    /// The format definition for this key.
    pub fn format(self) -> Format {
        match self {
            Self::YouTube => Format {
                key: self,
                width: 1280.0,
                height: 720.0,
                safe: NormalizedBox::new(0.06, 0.08, 0.88, 0.84),
            },
            Self::Pinterest => Format {
                key: self,
                width: 1000.0,
                height: 1500.0,
                safe: NormalizedBox::new(0.06, 0.06, 0.88, 0.88),
            },
            Self::Story => Format {
                key: self,
                width: 1080.0,
                height: 1920.0,
                safe: NormalizedBox::new(0.06, 0.06, 0.88, 0.88),
            },
        }
    }
}

impl fmt::Display for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKey {
    type Err = ComposerError;

    fn from_str(s: &str) -> Result<Self> {
        FormatKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ComposerError::UnknownFormat(s.to_string()))
    }
}

/// A fixed output resolution with its safe-area guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Format {
    pub key: FormatKey,
    pub width: f32,
    pub height: f32,
    /// Normalized guide rectangle; drawn, never enforced.
    pub safe: NormalizedBox,
}

impl Format {
    /// Integer pixel dimensions, for surfaces and export filenames.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }
}
