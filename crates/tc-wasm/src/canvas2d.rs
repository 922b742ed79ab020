//! Canvas2D backing for the compositor's [`Surface`].
//!
//! Decoded rasters are uploaded once into offscreen canvases and cached by
//! [`RasterId`]; the cache is pruned to the rasters still referenced by the
//! composition after every frame.

use kurbo::{BezPath, Join, PathEl, Stroke};
use std::collections::HashMap;
use tc_core::model::{Color, TextAlign};
use tc_core::raster::{Raster, RasterId};
use tc_core::text::TextMeasure;
use tc_core::PixelBox;
use tc_render::{ExportFormat, Filter, RenderError, ShadowParams, Surface, TextRun, encode_rgba};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    rasters: HashMap<RasterId, HtmlCanvasElement>,
}

impl Canvas2dSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            rasters: HashMap::new(),
        }
    }

    /// A detached canvas of the given size, for sampling and export.
    pub fn offscreen(width: u32, height: u32) -> Result<Self, JsValue> {
        let canvas = create_canvas(width, height)?;
        Ok(Self::new(context_2d(&canvas)?))
    }

    /// Resize the backing canvas. Resizing also resets the context state.
    pub fn resize(&self, width: u32, height: u32) {
        if let Some(canvas) = self.ctx.canvas()
            && (canvas.width() != width || canvas.height() != height)
        {
            canvas.set_width(width);
            canvas.set_height(height);
        }
    }

    /// Drop cached uploads for rasters not in `live`.
    pub fn prune_rasters(&mut self, live: &[RasterId]) {
        self.rasters.retain(|id, _| live.contains(id));
    }

    fn raster_canvas(&mut self, raster: &Raster) -> Option<&HtmlCanvasElement> {
        if !self.rasters.contains_key(&raster.id()) {
            match upload(raster) {
                Ok(canvas) => {
                    self.rasters.insert(raster.id(), canvas);
                }
                Err(e) => {
                    log::warn!("raster upload failed for `{}`: {e:?}", raster.source());
                    return None;
                }
            }
        }
        self.rasters.get(&raster.id())
    }

    fn trace(&self, path: &BezPath) {
        self.ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => self.ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => self.ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => {
                    self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathEl::ClosePath => self.ctx.close_path(),
            }
        }
    }

    fn set_text_state(&self, run: &TextRun<'_>) {
        self.ctx.set_font(run.font);
        self.ctx.set_text_align(match run.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline(run.baseline.as_str());
    }

    fn read_pixels(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Vec<u8>, JsValue> {
        let data = self
            .ctx
            .get_image_data(x as f64, y as f64, w as f64, h as f64)?;
        Ok(data.data().0)
    }
}

impl TextMeasure for Canvas2dSurface {
    fn measure_text(&self, font: &str, text: &str) -> f32 {
        self.ctx.set_font(font);
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> (u32, u32) {
        self.ctx
            .canvas()
            .map(|c| (c.width(), c.height()))
            .unwrap_or((0, 0))
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_scale(&mut self, scale: f32) {
        let s = scale as f64;
        let _ = self.ctx.set_transform(s, 0.0, 0.0, s, 0.0, 0.0);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_shadow(&mut self, shadow: Option<ShadowParams>) {
        match shadow {
            Some(s) => {
                self.ctx.set_shadow_color(&s.color.to_css());
                self.ctx.set_shadow_blur(s.blur as f64);
                self.ctx.set_shadow_offset_x(s.offset_x as f64);
                self.ctx.set_shadow_offset_y(s.offset_y as f64);
            }
            None => clear_shadow(&self.ctx),
        }
    }

    fn set_filter(&mut self, filter: Option<Filter>) {
        match filter {
            Some(f) => self.ctx.set_filter(&f.to_css()),
            None => self.ctx.set_filter("none"),
        }
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.save();
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        self.ctx.restore();
    }

    fn fill_rect(&mut self, rect: PixelBox, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.w as f64,
            rect.h as f64,
        );
    }

    fn fill_vertical_gradient(&mut self, rect: PixelBox, stops: &[(f32, Color)]) {
        let (x, y) = (rect.x as f64, rect.y as f64);
        let grad = self.ctx.create_linear_gradient(x, y, x, y + rect.h as f64);
        for (offset, color) in stops {
            let _ = grad.add_color_stop(*offset, &color.to_css());
        }
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.fill_rect(x, y, rect.w as f64, rect.h as f64);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.trace(path);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.trace(path);
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_line_join(line_join(stroke.join));
        let dashes = js_sys::Array::new();
        for d in stroke.dash_pattern.iter() {
            dashes.push(&JsValue::from_f64(*d));
        }
        let _ = self.ctx.set_line_dash(&dashes);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
    }

    fn fill_text(&mut self, run: &TextRun<'_>, color: Color) {
        self.set_text_state(run);
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(run.text, run.x as f64, run.y as f64);
    }

    fn stroke_text(&mut self, run: &TextRun<'_>, width: f32, color: Color) {
        self.set_text_state(run);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_join("round");
        self.ctx.set_stroke_style_str(&color.to_css());
        let _ = self.ctx.stroke_text(run.text, run.x as f64, run.y as f64);
    }

    fn draw_image(&mut self, raster: &Raster, dest: PixelBox) {
        let Some(source) = self.raster_canvas(raster).cloned() else {
            return;
        };
        let _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &source,
            dest.x as f64,
            dest.y as f64,
            dest.w as f64,
            dest.h as f64,
        );
    }

    fn sample_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.read_pixels(x, y, 1, 1).ok()?;
        match px.as_slice() {
            [r, g, b, a, ..] => Some([*r, *g, *b, *a]),
            _ => None,
        }
    }

    fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        let (w, h) = self.size();
        let data = self
            .read_pixels(0, 0, w, h)
            .map_err(|e| RenderError::Unsupported(format!("canvas read-back failed: {e:?}")))?;
        let pixels = image::RgbaImage::from_raw(w, h, data)
            .ok_or_else(|| RenderError::Unsupported("canvas returned short pixel data".into()))?;
        encode_rgba(&pixels, format)
    }
}

/// Clear shadow so later draws don't inherit it.
fn clear_shadow(ctx: &CanvasRenderingContext2d) {
    ctx.set_shadow_blur(0.0);
    ctx.set_shadow_offset_x(0.0);
    ctx.set_shadow_offset_y(0.0);
    ctx.set_shadow_color("transparent");
}

fn line_join(join: Join) -> &'static str {
    match join {
        Join::Round => "round",
        Join::Bevel => "bevel",
        Join::Miter => "miter",
    }
}

fn create_canvas(width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(JsValue::from)?;
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()
        .map_err(JsValue::from)
}

fn upload(raster: &Raster) -> Result<HtmlCanvasElement, JsValue> {
    let (w, h) = (raster.width(), raster.height());
    let canvas = create_canvas(w, h)?;
    let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(raster.pixels().as_raw().as_slice()), w, h)?;
    context_2d(&canvas)?.put_image_data(&data, 0.0, 0.0)?;
    Ok(canvas)
}
