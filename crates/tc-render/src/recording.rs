//! Deterministic display-list surface.
//!
//! Records every draw call instead of rasterizing. Text is measured with a
//! fixed advance per character, and pixel sampling returns a configurable
//! color, so layout and paint order can be asserted without a browser.

use crate::error::RenderError;
use crate::export::{ExportFormat, encode_rgba};
use crate::surface::{Filter, ShadowParams, Surface, TextBaseline, TextRun, from_rect};
use image::{Rgba, RgbaImage};
use kurbo::{BezPath, Shape, Stroke};
use tc_core::model::{Color, TextAlign};
use tc_core::raster::{Raster, RasterId};
use tc_core::text::TextMeasure;
use tc_core::PixelBox;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    Scale(f32),
    Alpha(f32),
    Shadow(Option<ShadowParams>),
    Filter(Option<Filter>),
    FillRect {
        rect: PixelBox,
        color: Color,
    },
    Gradient {
        rect: PixelBox,
        stops: Vec<(f32, Color)>,
    },
    /// Paths are recorded by their bounding box.
    FillPath {
        bounds: PixelBox,
        color: Color,
    },
    StrokePath {
        bounds: PixelBox,
        width: f64,
        dashes: Vec<f64>,
        color: Color,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: String,
        align: TextAlign,
        baseline: TextBaseline,
        color: Color,
    },
    StrokeText {
        text: String,
        x: f32,
        y: f32,
        font: String,
        width: f32,
        color: Color,
    },
    Image {
        raster: RasterId,
        dest: PixelBox,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    /// Advance of one character as a fraction of the font size.
    advance: f32,
    sample: [u8; 4],
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            advance: 0.5,
            sample: [0, 0, 0, 255],
            ops: Vec::new(),
        }
    }

    /// Color returned by every [`Surface::sample_pixel`] call.
    pub fn with_sample(mut self, rgba: [u8; 4]) -> Self {
        self.sample = rgba;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text of every filled run, in draw order.
    pub fn filled_text(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Pixel size out of a CSS font shorthand such as `900 110px "Anton"`.
pub fn font_px(font: &str) -> Option<f32> {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px"))
        .and_then(|n| n.parse().ok())
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&self, font: &str, text: &str) -> f32 {
        let size = font_px(font).unwrap_or(10.0);
        text.chars().count() as f32 * size * self.advance
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn set_scale(&mut self, scale: f32) {
        self.ops.push(DrawOp::Scale(scale));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn set_shadow(&mut self, shadow: Option<ShadowParams>) {
        self.ops.push(DrawOp::Shadow(shadow));
    }

    fn set_filter(&mut self, filter: Option<Filter>) {
        self.ops.push(DrawOp::Filter(filter));
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, rect: PixelBox, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_vertical_gradient(&mut self, rect: PixelBox, stops: &[(f32, Color)]) {
        self.ops.push(DrawOp::Gradient {
            rect,
            stops: stops.to_vec(),
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.ops.push(DrawOp::FillPath {
            bounds: from_rect(path.bounding_box()),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.ops.push(DrawOp::StrokePath {
            bounds: from_rect(path.bounding_box()),
            width: stroke.width,
            dashes: stroke.dash_pattern.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, run: &TextRun<'_>, color: Color) {
        self.ops.push(DrawOp::FillText {
            text: run.text.to_string(),
            x: run.x,
            y: run.y,
            font: run.font.to_string(),
            align: run.align,
            baseline: run.baseline,
            color,
        });
    }

    fn stroke_text(&mut self, run: &TextRun<'_>, width: f32, color: Color) {
        self.ops.push(DrawOp::StrokeText {
            text: run.text.to_string(),
            x: run.x,
            y: run.y,
            font: run.font.to_string(),
            width,
            color,
        });
    }

    fn draw_image(&mut self, raster: &Raster, dest: PixelBox) {
        self.ops.push(DrawOp::Image {
            raster: raster.id(),
            dest,
        });
    }

    fn sample_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height).then_some(self.sample)
    }

    /// Encodes a flat image of the sample color.
    fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        let img = RgbaImage::from_pixel(self.width, self.height, Rgba(self.sample));
        encode_rgba(&img, format)
    }
}
