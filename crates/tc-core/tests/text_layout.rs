//! Integration tests: normalized box → pixel box → wrap / auto-fit.

use tc_core::geometry::{NormalizedBox, to_normalized, to_pixels};
use tc_core::text::{TextMeasure, find_best_font_size, font_descriptor, wrap};
use tc_core::{EngineConfig, FormatKey, TextStyle};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fixed-advance measurer: every char is half the font size wide.
struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    fn measure_text(&self, font: &str, text: &str) -> f32 {
        let size: f32 = font
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.strip_suffix("px"))
            .and_then(|s| s.parse().ok())
            .expect("font descriptor carries a px size");
        text.chars().count() as f32 * size * 0.5
    }
}

fn hook_style() -> TextStyle {
    let mut style = TextStyle::default();
    style.font.size = 130.0;
    style
}

// ─── Scenario: two-paragraph hook on a 16:9 thumbnail ───────────────────

#[test]
fn mistakes_hook_solves_down_to_two_lines() {
    init_logger();
    let cfg = EngineConfig::default();
    let format = FormatKey::YouTube.format();
    let bounds = to_pixels(NormalizedBox::new(0.06, 0.14, 0.62, 0.40), &format);
    let style = hook_style();
    let text = "3 MISTAKES\nYOU MUST AVOID";

    let size = find_best_font_size(&style, text, &bounds, &FixedAdvance, &cfg);
    assert_eq!(size, 112.0);

    let layout = wrap(text, &style, bounds.w, size, &FixedAdvance, &cfg);
    assert_eq!(layout.lines.as_slice(), ["3 MISTAKES", "YOU MUST AVOID"]);
    assert!(layout.total_height_px <= bounds.h);

    let font = font_descriptor(&style, size);
    for line in &layout.lines {
        assert!(FixedAdvance.measure_text(&font, line) <= bounds.w);
    }
}

#[test]
fn base_size_wraps_to_three_lines_and_overflows() {
    let cfg = EngineConfig::default();
    let format = FormatKey::YouTube.format();
    let bounds = to_pixels(NormalizedBox::new(0.06, 0.14, 0.62, 0.40), &format);
    let layout = wrap(
        "3 MISTAKES\nYOU MUST AVOID",
        &hook_style(),
        bounds.w,
        130.0,
        &FixedAdvance,
        &cfg,
    );
    assert_eq!(layout.lines.len(), 3);
    assert!(layout.total_height_px > bounds.h);
}

#[test]
fn nothing_fits_returns_the_floor() {
    init_logger();
    let cfg = EngineConfig::default();
    let bounds = tc_core::PixelBox::new(0.0, 0.0, 700.0, 1.0);
    let size = find_best_font_size(&hook_style(), "TOO TALL", &bounds, &FixedAdvance, &cfg);
    assert_eq!(size, cfg.fit_floor);
}

#[test]
fn base_size_below_floor_is_never_grown() {
    init_logger();
    let cfg = EngineConfig::default();
    let mut style = TextStyle::default();
    style.font.size = 8.0;
    let bounds = tc_core::PixelBox::new(0.0, 0.0, 700.0, 1.0);
    let size = find_best_font_size(&style, "TOO TALL", &bounds, &FixedAdvance, &cfg);
    assert_eq!(size, 8.0);
}

// ─── Properties ─────────────────────────────────────────────────────────

#[test]
fn taller_boxes_never_shrink_the_font() {
    init_logger();
    let cfg = EngineConfig::default();
    let style = hook_style();
    let text = "THE FASTEST WAY TO GROW ON YOUTUBE";

    let mut previous = 0.0;
    for h in (20..=600).step_by(20) {
        let bounds = tc_core::PixelBox::new(0.0, 0.0, 700.0, h as f32);
        let size = find_best_font_size(&style, text, &bounds, &FixedAdvance, &cfg);
        assert!(
            size >= previous,
            "height {h} gave {size}px, below {previous}px"
        );
        previous = size;
    }
}

#[test]
fn wrapped_lines_fit_width_unless_single_word() {
    let cfg = EngineConfig::default();
    let style = TextStyle::default();
    let text = "a bb ccc dddd eeeee ffffffffffffffffffff gg hhh";
    for width in [40.0, 80.0, 120.0, 300.0] {
        let layout = wrap(text, &style, width, 10.0, &FixedAdvance, &cfg);
        let font = font_descriptor(&style, 10.0);
        for line in &layout.lines {
            let w = FixedAdvance.measure_text(&font, line);
            assert!(
                w <= width || !line.contains(' '),
                "line {line:?} is {w}px in a {width}px box"
            );
        }
    }
}

#[test]
fn boxes_round_trip_through_every_format() {
    let b = NormalizedBox::new(0.123, 0.456, 0.321, 0.222);
    for key in FormatKey::ALL {
        let f = key.format();
        let back = to_normalized(to_pixels(b, &f), &f);
        approx::assert_relative_eq!(back.x, b.x, max_relative = 1e-6);
        approx::assert_relative_eq!(back.y, b.y, max_relative = 1e-6);
        approx::assert_relative_eq!(back.w, b.w, max_relative = 1e-6);
        approx::assert_relative_eq!(back.h, b.h, max_relative = 1e-6);
    }
}
