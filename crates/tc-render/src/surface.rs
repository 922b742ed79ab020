//! The host drawing surface.
//!
//! The compositor only ever talks to a [`Surface`]; the browser bridge backs
//! it with a Canvas2D context and tests back it with a display list. All
//! coordinates are format pixels; the surface applies the device scale set
//! through [`Surface::set_scale`].

use crate::error::RenderError;
use crate::export::ExportFormat;
use kurbo::{BezPath, Rect, RoundedRect, Shape, Stroke};
use tc_core::model::{Color, TextAlign};
use tc_core::raster::Raster;
use tc_core::text::TextMeasure;
use tc_core::{PixelBox, clamp};

/// Path flattening tolerance for shape → path conversion.
const TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowParams {
    pub color: Color,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// CSS-style image filter applied to subsequent image draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filter {
    pub blur: f32,
    pub saturate: f32,
}

impl Filter {
    /// `blur(22px) saturate(1.05)`
    pub fn to_css(&self) -> String {
        format!("blur({}px) saturate({})", self.blur, self.saturate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
}

impl TextBaseline {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
        }
    }
}

/// A single line of text positioned at its alignment anchor.
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    /// CSS font shorthand, see [`tc_core::font_descriptor`].
    pub font: &'a str,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

pub trait Surface: TextMeasure {
    /// Output size in device pixels.
    fn size(&self) -> (u32, u32);

    fn save(&mut self);
    fn restore(&mut self);

    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, scale: f32);
    fn set_alpha(&mut self, alpha: f32);
    /// `None` disables shadows entirely.
    fn set_shadow(&mut self, shadow: Option<ShadowParams>);
    fn set_filter(&mut self, filter: Option<Filter>);

    /// Reset every pixel to transparent.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: PixelBox, color: Color);
    /// Top-to-bottom linear gradient over `rect`; stops are `(offset, color)`.
    fn fill_vertical_gradient(&mut self, rect: PixelBox, stops: &[(f32, Color)]);
    fn fill_path(&mut self, path: &BezPath, color: Color);
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color);

    fn fill_text(&mut self, run: &TextRun<'_>, color: Color);
    /// Outline text with round joins.
    fn stroke_text(&mut self, run: &TextRun<'_>, width: f32, color: Color);

    /// Draw `raster` scaled into `dest`. `dest` may extend past the surface.
    fn draw_image(&mut self, raster: &Raster, dest: PixelBox);

    /// RGBA of one device pixel, if readable.
    fn sample_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]>;

    /// Serialize the current contents.
    fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, RenderError>;
}

pub fn rect_path(b: &PixelBox) -> BezPath {
    to_rect(b).to_path(TOLERANCE)
}

/// Rounded rectangle with the radius clamped to half the shorter side.
pub fn rounded_rect_path(b: &PixelBox, radius: f32) -> BezPath {
    let r = clamp(radius, 0.0, b.w.min(b.h) / 2.0);
    RoundedRect::from_rect(to_rect(b), r as f64).to_path(TOLERANCE)
}

pub fn to_rect(b: &PixelBox) -> Rect {
    Rect::new(
        b.x as f64,
        b.y as f64,
        (b.x + b.w) as f64,
        (b.y + b.h) as f64,
    )
}

pub fn from_rect(r: Rect) -> PixelBox {
    PixelBox::new(
        r.x0 as f32,
        r.y0 as f32,
        r.width() as f32,
        r.height() as f32,
    )
}
