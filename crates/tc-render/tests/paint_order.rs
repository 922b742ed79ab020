//! Integration tests: composition → display list.

use pretty_assertions::assert_eq;
use tc_core::geometry::NormalizedBox;
use tc_core::model::{BackgroundFit, Color, Composition, Layer, TextAlign};
use tc_core::raster::Raster;
use tc_core::{EngineConfig, PixelBox};
use tc_render::{DrawOp, RecordingSurface, RenderOptions, render};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn surface() -> RecordingSurface {
    RecordingSurface::new(1280, 720)
}

/// Text, x and y of every filled run.
fn text_runs(ops: &[DrawOp]) -> Vec<(String, f32, f32)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::FillText { text, x, y, .. } => Some((text.clone(), *x, *y)),
            _ => None,
        })
        .collect()
}

/// A fixed 40px layer in the box (128, 72, 640, 360) with line height 1.
fn fixed_text_layer(content: &str, align: TextAlign, pill: bool) -> Layer {
    let mut layer = Layer::text("t", content, NormalizedBox::new(0.1, 0.1, 0.5, 0.5));
    let style = &mut layer.as_text_mut().unwrap().style;
    style.auto_fit = false;
    style.font.size = 40.0;
    style.line_height = 1.0;
    style.align = align;
    style.pill.on = pill;
    style.pill.padding = 20.0;
    layer
}

fn render_runs(layer: Layer) -> Vec<(String, f32, f32)> {
    let mut comp = Composition::default();
    comp.layers.push(layer);
    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions { overlays: false });
    text_runs(s.ops())
}

fn images(ops: &[DrawOp]) -> Vec<PixelBox> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Image { dest, .. } => Some(*dest),
            _ => None,
        })
        .collect()
}

// ─── Background ─────────────────────────────────────────────────────────

#[test]
fn cover_background_overflows_horizontally() {
    init_logger();
    let comp = Composition {
        background: Some(Raster::from_rgba(image::RgbaImage::new(2000, 1000), "bg")),
        dim: 0.0,
        ..Composition::default()
    };
    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions::default());

    let drawn = images(s.ops());
    assert_eq!(drawn.len(), 1);
    approx::assert_relative_eq!(drawn[0].x, -80.0, epsilon = 1e-3);
    approx::assert_relative_eq!(drawn[0].w, 1440.0, epsilon = 1e-3);
    assert!(!s.ops().iter().any(|op| matches!(op, DrawOp::Gradient { .. })));
}

#[test]
fn blurred_fill_draws_cover_then_contain() {
    let comp = Composition {
        background: Some(Raster::from_rgba(image::RgbaImage::new(2000, 1000), "bg")),
        background_fit: BackgroundFit::ContainBlur,
        ..Composition::default()
    };
    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions::default());

    let drawn = images(s.ops());
    assert_eq!(drawn.len(), 2);
    approx::assert_relative_eq!(drawn[0].w, 1440.0, epsilon = 1e-3);
    approx::assert_relative_eq!(drawn[1].w, 1280.0, epsilon = 1e-3);
    approx::assert_relative_eq!(drawn[1].y, 40.0, epsilon = 1e-3);
    assert!(s.ops().iter().any(|op| matches!(op, DrawOp::Filter(Some(_)))));

    let stops = s.ops().iter().find_map(|op| match op {
        DrawOp::Gradient { stops, .. } => Some(stops.clone()),
        _ => None,
    });
    let stops = stops.expect("dim gradient");
    assert_eq!(stops.len(), 3);
    approx::assert_relative_eq!(stops[1].1.a, 0.15, epsilon = 1e-6);
}

// ─── Layers ─────────────────────────────────────────────────────────────

#[test]
fn layers_paint_back_to_front_and_skip_hidden() {
    let mut comp = Composition::default();
    comp.layers.push(Layer::text("a", "BOTTOM", NormalizedBox::new(0.1, 0.1, 0.8, 0.3)));
    comp.layers.push(Layer::text("b", "hidden", NormalizedBox::new(0.1, 0.1, 0.8, 0.3)));
    comp.layers.push(Layer::text("c", "top", NormalizedBox::new(0.1, 0.5, 0.8, 0.3)));
    comp.layers[1].visible = false;

    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions::default());
    assert_eq!(s.filled_text(), vec!["BOTTOM", "TOP"]);
}

#[test]
fn stroke_is_drawn_under_fill_on_same_baseline() {
    let mut comp = Composition::default();
    comp.layers.push(Layer::text("a", "HI", NormalizedBox::new(0.1, 0.1, 0.5, 0.3)));

    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions { overlays: false });

    let text_ops: Vec<&DrawOp> = s
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::StrokeText { .. } | DrawOp::FillText { .. }))
        .collect();
    match text_ops.as_slice() {
        [
            DrawOp::StrokeText { y: sy, width, .. },
            DrawOp::FillText { y: fy, color, .. },
        ] => {
            assert_eq!(sy, fy);
            assert_eq!(*width, 14.0);
            assert_eq!(*color, Color::WHITE);
        }
        other => panic!("unexpected text ops {other:?}"),
    }
}

#[test]
fn disabled_shadow_is_cleared_not_inherited() {
    let mut comp = Composition::default();
    let mut layer = Layer::text("a", "HI", NormalizedBox::new(0.1, 0.1, 0.5, 0.3));
    layer.as_text_mut().unwrap().style.shadow.on = false;
    comp.layers.push(layer);

    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions { overlays: false });
    assert!(s.ops().contains(&DrawOp::Shadow(None)));
}

#[test]
fn pill_uses_layer_box_and_opacity() {
    let mut comp = Composition::default();
    let mut layer = Layer::text("badge", "NEW", NormalizedBox::new(0.5, 0.5, 0.25, 0.25));
    let style = &mut layer.as_text_mut().unwrap().style;
    style.pill.on = true;
    style.pill.opacity = 0.85;
    style.pill.color = Color::from_hex("#ff0000").unwrap();
    comp.layers.push(layer);

    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions { overlays: false });

    let pill = s.ops().iter().find_map(|op| match op {
        DrawOp::FillPath { bounds, color } => Some((*bounds, *color)),
        _ => None,
    });
    let (bounds, color) = pill.expect("pill path");
    approx::assert_relative_eq!(bounds.x, 640.0, epsilon = 0.5);
    approx::assert_relative_eq!(bounds.w, 320.0, epsilon = 0.5);
    approx::assert_relative_eq!(color.a, 0.85, epsilon = 1e-6);
}

#[test]
fn right_aligned_text_anchors_to_padded_edge() {
    let runs = render_runs(fixed_text_layer("HI", TextAlign::Right, true));
    assert_eq!(runs.len(), 1);
    let (text, x, y) = &runs[0];
    assert_eq!(text, "HI");
    approx::assert_relative_eq!(*x, 748.0, epsilon = 1e-3);
    approx::assert_relative_eq!(*y, 232.0, epsilon = 1e-3);
}

#[test]
fn left_aligned_text_anchors_to_padded_edge() {
    let runs = render_runs(fixed_text_layer("HI", TextAlign::Left, true));
    assert_eq!(runs.len(), 1);
    approx::assert_relative_eq!(runs[0].1, 148.0, epsilon = 1e-3);
    approx::assert_relative_eq!(runs[0].2, 232.0, epsilon = 1e-3);

    let runs = render_runs(fixed_text_layer("HI", TextAlign::Left, false));
    approx::assert_relative_eq!(runs[0].1, 128.0, epsilon = 1e-3);
    approx::assert_relative_eq!(runs[0].2, 232.0, epsilon = 1e-3);
}

#[test]
fn pill_padding_narrows_wrap_width_and_recenters_block() {
    // 31 chars at 20px each: 620px fits the 640px box but not the 600px inner box.
    let content = "AAAAAAAAAAAAAAA BBBBBBBBBBBBBBB";

    let runs = render_runs(fixed_text_layer(content, TextAlign::Left, false));
    assert_eq!(runs.len(), 1);

    let runs = render_runs(fixed_text_layer(content, TextAlign::Left, true));
    let lines: Vec<&str> = runs.iter().map(|(t, _, _)| t.as_str()).collect();
    assert_eq!(lines, vec!["AAAAAAAAAAAAAAA", "BBBBBBBBBBBBBBB"]);
    approx::assert_relative_eq!(runs[0].2, 212.0, epsilon = 1e-3);
    approx::assert_relative_eq!(runs[1].2, 252.0, epsilon = 1e-3);
    assert!(runs.iter().all(|(_, x, _)| (*x - 148.0).abs() < 1e-3));
}

#[test]
fn empty_image_layer_draws_placeholder() {
    let mut comp = Composition::default();
    comp.layers.push(Layer::image("Logo", NormalizedBox::new(0.78, 0.78, 0.18, 0.18)));

    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions { overlays: false });
    assert_eq!(s.filled_text(), vec!["Upload Image"]);
    assert!(images(s.ops()).is_empty());
}

// ─── Overlay ────────────────────────────────────────────────────────────

#[test]
fn selection_overlay_has_guide_outline_and_eight_handles() {
    let mut comp = Composition::default();
    comp.layers.push(Layer::text("a", "HI", NormalizedBox::new(0.1, 0.1, 0.5, 0.3)));
    comp.selected = Some(comp.layers[0].id);

    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions::default());

    let dashes: Vec<Vec<f64>> = s
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::StrokePath { dashes, .. } => Some(dashes.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(dashes, vec![vec![4.0, 6.0], vec![6.0, 4.0]]);

    let handles = s
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::FillRect { rect, .. } if rect.w == 10.0))
        .count();
    assert_eq!(handles, 8);
}

#[test]
fn hidden_selection_draws_no_overlay() {
    let mut comp = Composition::default();
    comp.layers.push(Layer::text("a", "HI", NormalizedBox::new(0.1, 0.1, 0.5, 0.3)));
    comp.selected = Some(comp.layers[0].id);
    comp.layers[0].visible = false;

    let mut s = surface();
    render(&mut s, &comp, &EngineConfig::default(), RenderOptions::default());
    assert!(!s.ops().iter().any(|op| matches!(op, DrawOp::StrokePath { .. })));
}
