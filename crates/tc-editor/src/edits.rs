//! Property edits for text and image layers.
//!
//! Numeric values are clamped to their documented ranges when applied, so
//! out-of-range input never reaches the model. The string parsers accept
//! the `(field, value)` pairs a property panel produces; an empty numeric
//! value falls back to the field's default.

use tc_core::error::{ComposerError, Result};
use tc_core::geometry::{FitMode, clamp};
use tc_core::model::{BackgroundFit, Color, ImageLayer, TextAlign, TextLayer};

#[derive(Debug, Clone, PartialEq)]
pub enum TextEdit {
    Content(String),
    FontFamily(String),
    FontWeight(u16),
    AutoFit(bool),
    FontSize(f32),
    Fill(Color),
    Align(TextAlign),
    Uppercase(bool),
    LineHeight(f32),
    StrokeOn(bool),
    StrokeWidth(f32),
    StrokeColor(Color),
    ShadowOn(bool),
    ShadowBlur(f32),
    ShadowOffsetX(f32),
    ShadowOffsetY(f32),
    ShadowColor(Color),
    PillOn(bool),
    PillPadding(f32),
    PillRadius(f32),
    PillColor(Color),
    PillOpacity(f32),
}

impl TextEdit {
    pub fn apply(self, layer: &mut TextLayer) {
        let s = &mut layer.style;
        match self {
            Self::Content(text) => layer.content = text,
            Self::FontFamily(family) => s.font.family = family,
            Self::FontWeight(w) => s.font.weight = w.clamp(100, 900),
            Self::AutoFit(on) => s.auto_fit = on,
            Self::FontSize(px) => s.font.size = clamp(px.trunc(), 8.0, 260.0),
            Self::Fill(c) => s.fill = c,
            Self::Align(a) => s.align = a,
            Self::Uppercase(on) => s.uppercase = on,
            Self::LineHeight(lh) => s.line_height = clamp(lh, 0.8, 1.8),
            Self::StrokeOn(on) => s.stroke.on = on,
            Self::StrokeWidth(w) => s.stroke.width = clamp(w, 0.0, 60.0),
            Self::StrokeColor(c) => s.stroke.color = c,
            Self::ShadowOn(on) => s.shadow.on = on,
            Self::ShadowBlur(b) => s.shadow.blur = clamp(b, 0.0, 80.0),
            Self::ShadowOffsetX(d) => s.shadow.offset_x = clamp(d, -80.0, 80.0),
            Self::ShadowOffsetY(d) => s.shadow.offset_y = clamp(d, -80.0, 80.0),
            Self::ShadowColor(c) => s.shadow.color = c,
            Self::PillOn(on) => s.pill.on = on,
            Self::PillPadding(p) => s.pill.padding = clamp(p, 0.0, 80.0),
            Self::PillRadius(r) => s.pill.radius = clamp(r, 0.0, 120.0),
            Self::PillColor(c) => s.pill.color = c,
            Self::PillOpacity(o) => s.pill.opacity = clamp(o, 0.0, 1.0),
        }
    }

    /// Parse a property-panel edit such as `("stroke_width", "18")`.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        Ok(match field {
            "content" => Self::Content(value.to_string()),
            "font_family" => Self::FontFamily(value.trim().to_string()),
            "font_weight" => Self::FontWeight(number(field, value, 900.0)? as u16),
            "auto_fit" => Self::AutoFit(flag(value)),
            "font_size" => Self::FontSize(number(field, value, 96.0)?),
            "fill" => Self::Fill(color(value)?),
            "align" => Self::Align(align(field, value)?),
            "uppercase" => Self::Uppercase(flag(value)),
            "line_height" => Self::LineHeight(number(field, value, 1.05)?),
            "stroke_on" => Self::StrokeOn(flag(value)),
            "stroke_width" => Self::StrokeWidth(number(field, value, 0.0)?),
            "stroke_color" => Self::StrokeColor(color(value)?),
            "shadow_on" => Self::ShadowOn(flag(value)),
            "shadow_blur" => Self::ShadowBlur(number(field, value, 0.0)?),
            "shadow_dx" => Self::ShadowOffsetX(number(field, value, 0.0)?),
            "shadow_dy" => Self::ShadowOffsetY(number(field, value, 0.0)?),
            "shadow_color" => Self::ShadowColor(color(value)?),
            "pill_on" => Self::PillOn(flag(value)),
            "pill_padding" => Self::PillPadding(number(field, value, 0.0)?),
            "pill_radius" => Self::PillRadius(number(field, value, 0.0)?),
            "pill_color" => Self::PillColor(color(value)?),
            "pill_opacity" => Self::PillOpacity(number(field, value, 0.35)?),
            other => return Err(ComposerError::UnknownProperty(other.to_string())),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageEdit {
    Opacity(f32),
    Fit(FitMode),
    Shadow(bool),
}

impl ImageEdit {
    pub fn apply(self, layer: &mut ImageLayer) {
        match self {
            Self::Opacity(o) => layer.opacity = clamp(o, 0.0, 1.0),
            Self::Fit(fit) => layer.fit = fit,
            Self::Shadow(on) => layer.shadow = on,
        }
    }

    pub fn parse(field: &str, value: &str) -> Result<Self> {
        Ok(match field {
            "opacity" => Self::Opacity(number(field, value, 1.0)?),
            "fit" => Self::Fit(match value.trim() {
                "contain" => FitMode::Contain,
                "cover" => FitMode::Cover,
                _ => return Err(invalid(field, value)),
            }),
            "shadow" => Self::Shadow(flag(value)),
            other => return Err(ComposerError::UnknownProperty(other.to_string())),
        })
    }
}

pub fn parse_background_fit(value: &str) -> Result<BackgroundFit> {
    match value.trim() {
        "contain" => Ok(BackgroundFit::Contain),
        "cover" => Ok(BackgroundFit::Cover),
        "contain_blur" => Ok(BackgroundFit::ContainBlur),
        _ => Err(invalid("background_fit", value)),
    }
}

fn invalid(field: &str, value: &str) -> ComposerError {
    ComposerError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn number(field: &str, value: &str, empty: f32) -> Result<f32> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(empty);
    }
    v.parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(field, value))
}

fn flag(value: &str) -> bool {
    matches!(value.trim(), "yes" | "true" | "on" | "1")
}

fn color(value: &str) -> Result<Color> {
    Color::from_hex(value).ok_or_else(|| ComposerError::InvalidColor(value.to_string()))
}

fn align(field: &str, value: &str) -> Result<TextAlign> {
    match value.trim() {
        "left" => Ok(TextAlign::Left),
        "center" => Ok(TextAlign::Center),
        "right" => Ok(TextAlign::Right),
        _ => Err(invalid(field, value)),
    }
}
