//! Auto-contrast: pick text colors that read against the background.
//!
//! The background (with dim) is painted to a scratch surface and sampled at
//! three points along the layer box's diagonal.

use crate::paint::paint_background;
use crate::surface::Surface;
use tc_core::geometry::{NormalizedBox, clamp, to_pixels};
use tc_core::model::{Color, Composition};

/// Average luminance above which text switches to black.
pub const LUMINANCE_THRESHOLD: f32 = 145.0;

/// Sample points as fractions of the layer box.
const SAMPLES: [(f32, f32); 3] = [(0.25, 0.35), (0.50, 0.50), (0.75, 0.65)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastPick {
    pub fill: Color,
    pub stroke: Color,
    /// Average sampled luminance, 0–255.
    pub luminance: f32,
}

/// Rec. 709 luma of an 8-bit RGB triple.
pub fn luminance([r, g, b, _]: [u8; 4]) -> f32 {
    0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32
}

/// Choose fill/stroke colors for a text box placed at `bounds`.
///
/// Returns `None` when the composition has no background raster or the
/// scratch surface cannot be read back.
pub fn auto_contrast<S: Surface + ?Sized>(
    scratch: &mut S,
    comp: &Composition,
    bounds: NormalizedBox,
) -> Option<ContrastPick> {
    comp.background.as_ref()?;

    // Sampling happens in format pixels.
    scratch.set_scale(1.0);
    paint_background(scratch, comp);

    let format = comp.format();
    let b = to_pixels(bounds, &format);
    let (max_x, max_y) = (format.width - 1.0, format.height - 1.0);

    let mut sum = 0.0;
    for (fx, fy) in SAMPLES {
        let x = clamp((b.x + b.w * fx).floor(), 0.0, max_x) as u32;
        let y = clamp((b.y + b.h * fy).floor(), 0.0, max_y) as u32;
        sum += luminance(scratch.sample_pixel(x, y)?);
    }
    let avg = sum / SAMPLES.len() as f32;
    log::debug!("auto-contrast sampled luminance {avg:.1}");

    let (fill, stroke) = if avg > LUMINANCE_THRESHOLD {
        (Color::BLACK, Color::WHITE)
    } else {
        (Color::WHITE, Color::BLACK)
    };
    Some(ContrastPick {
        fill,
        stroke,
        luminance: avg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingSurface;
    use tc_core::raster::Raster;

    fn with_background() -> Composition {
        Composition {
            background: Some(Raster::from_rgba(image::RgbaImage::new(4, 4), "bg.png")),
            ..Composition::default()
        }
    }

    #[test]
    fn bright_background_gets_black_text() {
        let mut scratch = RecordingSurface::new(1280, 720).with_sample([240, 240, 240, 255]);
        let pick = auto_contrast(
            &mut scratch,
            &with_background(),
            NormalizedBox::new(0.1, 0.1, 0.5, 0.3),
        )
        .unwrap();
        assert_eq!(pick.fill, Color::BLACK);
        assert_eq!(pick.stroke, Color::WHITE);
    }

    #[test]
    fn mid_gray_keeps_white_text() {
        let mut scratch = RecordingSurface::new(1280, 720).with_sample([140, 140, 140, 255]);
        let pick = auto_contrast(
            &mut scratch,
            &with_background(),
            NormalizedBox::new(0.1, 0.1, 0.5, 0.3),
        )
        .unwrap();
        assert_eq!(pick.fill, Color::WHITE);
    }

    #[test]
    fn no_background_no_pick() {
        let mut scratch = RecordingSurface::new(1280, 720);
        let comp = Composition::default();
        assert!(auto_contrast(&mut scratch, &comp, NormalizedBox::new(0.0, 0.0, 1.0, 1.0)).is_none());
    }
}
