//! Engine tuning knobs.
//!
//! Defaults reproduce the composer's stock behavior. Every field is optional
//! when deserializing, so hosts can override a single constant via JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Smallest base font size a style may request, in px.
    pub min_font_size: f32,
    /// Largest base font size a style may request, in px.
    pub max_font_size: f32,
    /// Auto-fit descent step, in px.
    pub fit_step: f32,
    /// Auto-fit gives up at this size, in px.
    pub fit_floor: f32,
    /// Wrap width never drops below this, in px.
    pub min_wrap_width: f32,
    /// Side of the square resize hotspots, in px.
    pub handle_size: f32,
    /// Resize never shrinks a box below this, in px.
    pub min_box_size: f32,
    /// Normalized x/y offset applied to duplicated layers.
    pub duplicate_offset: f32,
    /// Duplicated layers never start past this normalized x/y.
    pub duplicate_max: f32,
    /// Lowest JPEG export quality (0–1).
    pub jpeg_quality_min: f32,
    /// Highest JPEG export quality (0–1).
    pub jpeg_quality_max: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_font_size: 8.0,
            max_font_size: 260.0,
            fit_step: 2.0,
            fit_floor: 10.0,
            min_wrap_width: 10.0,
            handle_size: 10.0,
            min_box_size: 30.0,
            duplicate_offset: 0.02,
            duplicate_max: 0.98,
            jpeg_quality_min: 0.4,
            jpeg_quality_max: 1.0,
        }
    }
}

impl EngineConfig {
    /// Base font size clamped into the configured range, rounded to whole px.
    pub fn clamp_font_size(&self, size: f32) -> f32 {
        crate::geometry::clamp(size.round(), self.min_font_size, self.max_font_size)
    }

    pub fn clamp_jpeg_quality(&self, q: f32) -> f32 {
        crate::geometry::clamp(q, self.jpeg_quality_min, self.jpeg_quality_max)
    }
}
