//! Text layout: greedy word-wrap and auto-fit font sizing.
//!
//! Measurement is delegated to the host surface through [`TextMeasure`].
//! Callers must measure with the same font descriptor they draw with
//! ([`font_descriptor`]), otherwise wrapped lines will not match what is
//! painted.

use crate::config::EngineConfig;
use crate::geometry::PixelBox;
use crate::model::TextStyle;
use smallvec::SmallVec;

/// Text-metrics capability of a rendering surface.
pub trait TextMeasure {
    /// Rendered advance width of `text` in `font` (a CSS font shorthand).
    fn measure_text(&self, font: &str, text: &str) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_text(&self, font: &str, text: &str) -> f32 {
        (**self).measure_text(font, text)
    }
}

/// CSS font shorthand for `style` at `size_px`: `900 110px "Bebas Neue"`.
pub fn font_descriptor(style: &TextStyle, size_px: f32) -> String {
    format!(
        "{} {}px \"{}\"",
        style.font.weight, size_px, style.font.family
    )
}

/// Result of wrapping a string into a box width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: SmallVec<[String; 4]>,
    pub line_height_px: f32,
    pub total_height_px: f32,
}

/// Greedy word-wrap of `text` into `box_width` at `font_px`.
///
/// Explicit `\n` breaks are kept; an empty paragraph yields one empty line.
/// A single word wider than the box sits alone on its line, untruncated.
pub fn wrap(
    text: &str,
    style: &TextStyle,
    box_width: f32,
    font_px: f32,
    measure: &(impl TextMeasure + ?Sized),
    config: &EngineConfig,
) -> TextLayout {
    let max_width = box_width.max(config.min_wrap_width);
    let font = font_descriptor(style, font_px);
    let mut lines: SmallVec<[String; 4]> = SmallVec::new();

    for paragraph in text.split('\n') {
        let mut words = paragraph.split_whitespace();
        let Some(first) = words.next() else {
            lines.push(String::new());
            continue;
        };
        let mut line = first.to_string();
        for word in words {
            let candidate = format!("{line} {word}");
            if measure.measure_text(&font, &candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        lines.push(line);
    }

    let line_height_px = style.line_height * font_px;
    TextLayout {
        total_height_px: lines.len() as f32 * line_height_px,
        lines,
        line_height_px,
    }
}

/// Whether `text` wrapped at `size_px` fits within the height of `bounds`.
pub fn fits(
    text: &str,
    style: &TextStyle,
    bounds: &PixelBox,
    size_px: f32,
    measure: &(impl TextMeasure + ?Sized),
    config: &EngineConfig,
) -> bool {
    wrap(text, style, bounds.w, size_px, measure, config).total_height_px <= bounds.h
}

/// Largest font size, descending from the style's base size, at which the
/// wrapped text fits `bounds`.
///
/// Linear descent by `config.fit_step`; returns the floor when nothing fits.
/// A base size already below `config.fit_floor` is its own floor, so auto-fit
/// never draws text larger than the base size (base 8px stays 8px, not 10px).
/// Because wrapping depends only on width, a taller box never yields a
/// smaller size.
pub fn find_best_font_size(
    style: &TextStyle,
    text: &str,
    bounds: &PixelBox,
    measure: &(impl TextMeasure + ?Sized),
    config: &EngineConfig,
) -> f32 {
    let start = config.clamp_font_size(style.font.size);
    let floor = config.fit_floor.min(start);
    let step = config.fit_step.max(1.0);

    let mut size = start;
    while size >= floor {
        if fits(text, style, bounds, size, measure, config) {
            log::trace!("auto-fit settled at {size}px (base {start}px)");
            return size;
        }
        size -= step;
    }
    log::debug!("auto-fit hit floor {floor}px for {:?}", text);
    floor
}

/// Font size a text layer will actually be drawn at inside `inner`.
pub fn resolve_font_size(
    style: &TextStyle,
    text: &str,
    inner: &PixelBox,
    measure: &(impl TextMeasure + ?Sized),
    config: &EngineConfig,
) -> f32 {
    if style.auto_fit {
        find_best_font_size(style, text, inner, measure, config)
    } else {
        config.clamp_font_size(style.font.size)
    }
}
