pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod hooks;
pub mod id;
pub mod model;
pub mod raster;
pub mod text;

pub use config::EngineConfig;
pub use error::{ComposerError, Result};
pub use format::{Format, FormatKey};
pub use geometry::{
    FitMode, Handle, NormalizedBox, PixelBox, clamp, client_to_format, fit_rect, to_normalized,
    to_pixels,
};
pub use hooks::{HookSuggestion, StylePreset, generate_hooks};
pub use id::LayerId;
pub use model::*;
pub use raster::{Raster, RasterHandle, RasterId, decode_raster};
pub use text::{TextLayout, TextMeasure, find_best_font_size, font_descriptor, wrap};
