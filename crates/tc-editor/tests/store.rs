//! Integration tests: store lifecycle, decode tickets and auto-contrast.

use pretty_assertions::assert_eq;
use std::io::Cursor;
use tc_core::error::ComposerError;
use tc_core::model::Color;
use tc_core::raster::Raster;
use tc_editor::{ComposerStore, DecodeTarget, Mutation, Template};
use tc_render::RecordingSurface;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::RgbaImage::new(w, h)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn decode_error() -> ComposerError {
    ComposerError::Decode {
        source_id: "broken.png".into(),
        reason: "truncated".into(),
        source: None,
    }
}

// ─── Decoding ───────────────────────────────────────────────────────────

#[test]
fn background_bytes_load_through_ticket() {
    let mut store = ComposerStore::default();
    let ticket = store.begin_decode(DecodeTarget::Background);
    assert!(store.load_raster(ticket, &png_bytes(8, 4), "bg.png"));

    let bg = store.composition().background.as_ref().unwrap();
    assert_eq!((bg.width(), bg.height()), (8, 4));
    assert_eq!(store.status(), "Background loaded");
}

#[test]
fn older_ticket_cannot_overwrite_newer_one() {
    let mut store = ComposerStore::default();
    let first = store.begin_decode(DecodeTarget::Background);
    let second = store.begin_decode(DecodeTarget::Background);

    assert!(store.finish_decode(second, Ok(Raster::from_rgba(image::RgbaImage::new(2, 2), "new"))));
    let rev = store.revision();
    assert!(!store.finish_decode(first, Ok(Raster::from_rgba(image::RgbaImage::new(2, 2), "old"))));

    assert_eq!(store.revision(), rev);
    assert_eq!(store.composition().background.as_ref().unwrap().source(), "new");
}

#[test]
fn failed_decode_only_sets_status() {
    let mut store = ComposerStore::default();
    let good = store.begin_decode(DecodeTarget::Background);
    store.finish_decode(good, Ok(Raster::from_rgba(image::RgbaImage::new(2, 2), "kept")));
    let rev = store.revision();

    let bad = store.begin_decode(DecodeTarget::Background);
    assert!(!store.finish_decode(bad, Err(decode_error())));

    assert_eq!(store.status(), "Could not load image");
    assert_eq!(store.revision(), rev);
    assert_eq!(store.composition().background.as_ref().unwrap().source(), "kept");
}

#[test]
fn garbage_bytes_report_load_failure() {
    let mut store = ComposerStore::default();
    store.apply(Mutation::AddImageLayer);
    let id = store.selected_id().unwrap();
    let ticket = store.begin_decode(DecodeTarget::Layer(id));

    assert!(!store.load_raster(ticket, b"not an image", "logo.png"));
    assert_eq!(store.status(), "Could not load image");
    assert!(store.composition().layer(id).unwrap().as_image().unwrap().raster.is_none());
}

#[test]
fn layer_decode_lands_on_image_layer() {
    let mut store = ComposerStore::default();
    store.apply(Mutation::AddImageLayer);
    let id = store.selected_id().unwrap();
    let ticket = store.begin_decode(DecodeTarget::Layer(id));

    assert!(store.load_raster(ticket, &png_bytes(3, 3), "logo.png"));
    let image = store.composition().layer(id).unwrap().as_image().unwrap();
    assert_eq!(image.source(), Some("logo.png"));
    assert_eq!(store.status(), "Logo/Image loaded into layer");
}

#[test]
fn decode_for_deleted_layer_is_dropped() {
    let mut store = ComposerStore::default();
    store.apply(Mutation::AddImageLayer);
    let id = store.selected_id().unwrap();
    let ticket = store.begin_decode(DecodeTarget::Layer(id));
    store.apply(Mutation::Remove { id });

    let rev = store.revision();
    assert!(!store.load_raster(ticket, &png_bytes(3, 3), "logo.png"));
    assert_eq!(store.revision(), rev);
}

#[test]
fn decodes_for_different_targets_are_independent() {
    let mut store = ComposerStore::default();
    store.apply(Mutation::AddImageLayer);
    let id = store.selected_id().unwrap();
    let bg = store.begin_decode(DecodeTarget::Background);
    let logo = store.begin_decode(DecodeTarget::Layer(id));

    assert!(store.load_raster(logo, &png_bytes(3, 3), "logo.png"));
    assert!(store.load_raster(bg, &png_bytes(3, 3), "bg.png"));
}

// ─── Project lifecycle ──────────────────────────────────────────────────

#[test]
fn new_project_clears_background_and_resets_layers() {
    let mut store = ComposerStore::default();
    let ticket = store.begin_decode(DecodeTarget::Background);
    store.load_raster(ticket, &png_bytes(2, 2), "bg.png");
    store.apply(Mutation::ApplyTemplate(Template::PinterestTitle));

    store.apply(Mutation::NewProject);
    let comp = store.composition();
    assert!(comp.background.is_none());
    assert_eq!(comp.layers.len(), 2);
    assert_eq!(comp.selected, Some(comp.layers[0].id));
    assert_eq!(store.status(), "New project created");
}

#[test]
fn deleting_selection_falls_back_to_layer_below() {
    let mut store = ComposerStore::default();
    store.apply(Mutation::AddTextLayer);
    let added = store.selected_id().unwrap();
    let badge = store.composition().layers[1].id;

    store.apply(Mutation::Remove { id: added });
    assert_eq!(store.selected_id(), Some(badge));
}

#[test]
fn z_order_moves_are_bounded() {
    let mut store = ComposerStore::default();
    let top = store.composition().layers[1].id;
    assert!(!store.apply(Mutation::BringForward { id: top }));
    assert!(store.apply(Mutation::SendBackward { id: top }));
    assert_eq!(store.composition().layers[0].id, top);
}

// ─── Auto-contrast ──────────────────────────────────────────────────────

#[test]
fn auto_contrast_needs_a_background() {
    let mut store = ComposerStore::default();
    let mut scratch = RecordingSurface::new(1280, 720).with_sample([255, 255, 255, 255]);
    assert!(!store.apply_auto_contrast(&mut scratch));
}

#[test]
fn bright_background_gets_dark_text() {
    let mut store = ComposerStore::default();
    let ticket = store.begin_decode(DecodeTarget::Background);
    store.load_raster(ticket, &png_bytes(2, 2), "bg.png");

    let mut scratch = RecordingSurface::new(1280, 720).with_sample([240, 240, 240, 255]);
    assert!(store.apply_auto_contrast(&mut scratch));

    let text = store.composition().selected_layer().unwrap().as_text().unwrap();
    assert_eq!(text.style.fill, Color::BLACK);
    assert_eq!(text.style.stroke.color, Color::WHITE);
}
