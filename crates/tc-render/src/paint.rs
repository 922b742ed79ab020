//! Composition → surface drawing commands.
//!
//! Full redraw per call: base fill, background raster, dim gradient, the
//! visible layers back to front, then the selection overlay.

use crate::surface::{
    Filter, ShadowParams, Surface, TextBaseline, TextRun, rect_path, rounded_rect_path,
};
use kurbo::{Join, Stroke};
use tc_core::geometry::{FitMode, PixelBox, clamp, fit_rect, to_pixels};
use tc_core::model::{
    BackgroundFit, Color, Composition, ImageLayer, Layer, LayerKind, TextAlign, TextLayer,
};
use tc_core::text::{font_descriptor, resolve_font_size, wrap};
use tc_core::{EngineConfig, Format, Handle};

/// `#0a1020`
const BASE_FILL: Color = Color::rgba(10.0 / 255.0, 16.0 / 255.0, 32.0 / 255.0, 1.0);
const BACKGROUND_BLUR: Filter = Filter {
    blur: 22.0,
    saturate: 1.05,
};
const TEXT_SHADOW_ALPHA: f32 = 0.55;
/// The inner text box never collapses below this on either axis.
const MIN_INNER: f32 = 10.0;

const IMAGE_SHADOW: ShadowParams = ShadowParams {
    color: Color::rgba(0.0, 0.0, 0.0, 0.45),
    blur: 18.0,
    offset_x: 6.0,
    offset_y: 6.0,
};
const PLACEHOLDER_RADIUS: f32 = 18.0;
const PLACEHOLDER_FILL: Color = Color::rgba(1.0, 1.0, 1.0, 0.10);
const PLACEHOLDER_OUTLINE: Color = Color::rgba(1.0, 1.0, 1.0, 0.25);
const PLACEHOLDER_LABEL: Color = Color::rgba(232.0 / 255.0, 238.0 / 255.0, 252.0 / 255.0, 0.8);
const PLACEHOLDER_FONT: &str = "800 16px \"Inter\"";

const SAFE_GUIDE: Color = Color::rgba(1.0, 1.0, 1.0, 0.18);
const SELECTION: Color = Color::rgba(90.0 / 255.0, 167.0 / 255.0, 1.0, 0.95);
const HANDLE_FILL: Color = Color::rgba(90.0 / 255.0, 167.0 / 255.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw the safe-area guide, selection outline and handles.
    pub overlays: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { overlays: true }
    }
}

/// Redraw the whole composition.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    comp: &Composition,
    config: &EngineConfig,
    options: RenderOptions,
) {
    let format = comp.format();
    surface.set_scale(comp.device_scale);
    paint_background(surface, comp);

    for layer in comp.layers.iter().filter(|l| l.visible) {
        paint_layer(surface, layer, &format, config);
    }

    if options.overlays {
        paint_selection(surface, comp, config);
    }
}

/// Base fill, background raster and dim gradient. Layers are not drawn.
pub fn paint_background<S: Surface + ?Sized>(surface: &mut S, comp: &Composition) {
    let format = comp.format();
    let full = PixelBox::new(0.0, 0.0, format.width, format.height);
    surface.clear();
    surface.fill_rect(full, BASE_FILL);

    let Some(raster) = &comp.background else {
        return;
    };
    let (iw, ih) = (raster.width() as f32, raster.height() as f32);
    match comp.background_fit {
        BackgroundFit::Cover => surface.draw_image(raster, fit_rect(iw, ih, full, FitMode::Cover)),
        BackgroundFit::Contain => {
            surface.draw_image(raster, fit_rect(iw, ih, full, FitMode::Contain))
        }
        BackgroundFit::ContainBlur => {
            surface.save();
            surface.set_filter(Some(BACKGROUND_BLUR));
            surface.draw_image(raster, fit_rect(iw, ih, full, FitMode::Cover));
            surface.restore();
            surface.draw_image(raster, fit_rect(iw, ih, full, FitMode::Contain));
        }
    }

    let dim = comp.dim;
    if dim > 0.0 {
        surface.fill_vertical_gradient(
            full,
            &[
                (0.0, Color::BLACK.with_alpha(dim * 0.7)),
                (0.55, Color::BLACK.with_alpha(dim)),
                (1.0, Color::BLACK.with_alpha(dim * 0.85)),
            ],
        );
    }
}

fn paint_layer<S: Surface + ?Sized>(
    surface: &mut S,
    layer: &Layer,
    format: &Format,
    config: &EngineConfig,
) {
    let b = to_pixels(layer.bounds, format);
    log::trace!(
        "paint {} `{}` at ({}, {}) {}x{}",
        layer.id,
        layer.name,
        b.x,
        b.y,
        b.w,
        b.h
    );
    match &layer.kind {
        LayerKind::Image(image) => paint_image(surface, image, &b),
        LayerKind::Text(text) => paint_text(surface, text, &b, config),
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

fn paint_text<S: Surface + ?Sized>(
    surface: &mut S,
    layer: &TextLayer,
    b: &PixelBox,
    config: &EngineConfig,
) {
    let s = &layer.style;
    let pad = if s.pill.on { s.pill.padding } else { 0.0 };
    let inner = b.inset(pad, MIN_INNER);
    let content = if s.uppercase {
        layer.content.to_uppercase()
    } else {
        layer.content.clone()
    };

    if s.pill.on {
        let color = s.pill.color.with_alpha(clamp(s.pill.opacity, 0.0, 1.0));
        surface.fill_path(&rounded_rect_path(b, s.pill.radius), color);
    }

    let size = resolve_font_size(s, &content, &inner, &*surface, config);
    let layout = wrap(&content, s, inner.w, size, &*surface, config);
    let font = font_descriptor(s, size);
    let start_y = inner.y + (inner.h - layout.total_height_px) / 2.0;
    let anchor_x = match s.align {
        TextAlign::Left => inner.x,
        TextAlign::Center => inner.x + inner.w / 2.0,
        TextAlign::Right => inner.right(),
    };

    surface.save();
    surface.set_shadow(s.shadow.on.then(|| ShadowParams {
        color: s.shadow.color.with_alpha(TEXT_SHADOW_ALPHA),
        blur: clamp(s.shadow.blur, 0.0, 80.0),
        offset_x: clamp(s.shadow.offset_x, -80.0, 80.0),
        offset_y: clamp(s.shadow.offset_y, -80.0, 80.0),
    }));
    let stroke_width = clamp(s.stroke.width, 0.0, 60.0);
    for (i, line) in layout.lines.iter().enumerate() {
        let run = TextRun {
            text: line,
            x: anchor_x,
            y: start_y + i as f32 * layout.line_height_px,
            font: &font,
            align: s.align,
            baseline: TextBaseline::Top,
        };
        if s.stroke.on && stroke_width > 0.0 {
            surface.stroke_text(&run, stroke_width, s.stroke.color);
        }
        surface.fill_text(&run, s.fill);
    }
    surface.restore();
}

// ─── Image ───────────────────────────────────────────────────────────────

fn paint_image<S: Surface + ?Sized>(surface: &mut S, layer: &ImageLayer, b: &PixelBox) {
    surface.save();
    surface.set_alpha(clamp(layer.opacity, 0.0, 1.0));
    surface.set_shadow(layer.shadow.then_some(IMAGE_SHADOW));

    match &layer.raster {
        Some(raster) => {
            let dest = fit_rect(raster.width() as f32, raster.height() as f32, *b, layer.fit);
            surface.draw_image(raster, dest);
        }
        None => {
            surface.fill_path(&rounded_rect_path(b, PLACEHOLDER_RADIUS), PLACEHOLDER_FILL);
            surface.stroke_path(&rect_path(b), &Stroke::new(2.0), PLACEHOLDER_OUTLINE);
            let (cx, cy) = b.center();
            surface.fill_text(
                &TextRun {
                    text: "Upload Image",
                    x: cx,
                    y: cy,
                    font: PLACEHOLDER_FONT,
                    align: TextAlign::Center,
                    baseline: TextBaseline::Middle,
                },
                PLACEHOLDER_LABEL,
            );
        }
    }
    surface.restore();
}

// ─── Selection overlay ───────────────────────────────────────────────────

fn paint_selection<S: Surface + ?Sized>(
    surface: &mut S,
    comp: &Composition,
    config: &EngineConfig,
) {
    let Some(layer) = comp.selected_layer() else {
        return;
    };
    if !layer.visible {
        return;
    }
    let format = comp.format();
    let b = to_pixels(layer.bounds, &format);
    let safe = to_pixels(format.safe, &format);

    surface.save();
    surface.set_shadow(None);
    let guide = Stroke::new(1.0).with_dashes(0.0, [4.0, 6.0]);
    surface.stroke_path(&rect_path(&safe), &guide, SAFE_GUIDE);

    let outline = Stroke::new(2.0)
        .with_join(Join::Miter)
        .with_dashes(0.0, [6.0, 4.0]);
    surface.stroke_path(&rect_path(&b), &outline, SELECTION);

    for handle in Handle::ALL {
        surface.fill_rect(handle.rect(&b, config.handle_size), HANDLE_FILL);
    }
    surface.restore();
}
