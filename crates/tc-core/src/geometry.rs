//! Geometry mapping between normalized layer boxes and format pixels.
//!
//! Layer placement is stored as fractions of the active format, so switching
//! formats reflows pixel positions without touching the stored boxes. The
//! mapping never clamps; callers that need a box kept inside the format clamp
//! explicitly with [`clamp`].

use crate::format::Format;
use serde::{Deserialize, Serialize};

/// A layer's placement as fractions (0–1) of the format's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl NormalizedBox {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Absolute pixel box in format coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PixelBox {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive containment test (edges count as inside).
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Shrink by `pad` on every side, keeping each dimension at least `min`.
    pub fn inset(&self, pad: f32, min: f32) -> Self {
        Self {
            x: self.x + pad,
            y: self.y + pad,
            w: (self.w - pad * 2.0).max(min),
            h: (self.h - pad * 2.0).max(min),
        }
    }
}

/// Normalized box → pixels for `format`.
pub fn to_pixels(b: NormalizedBox, format: &Format) -> PixelBox {
    PixelBox {
        x: b.x * format.width,
        y: b.y * format.height,
        w: b.w * format.width,
        h: b.h * format.height,
    }
}

/// Pixel box → normalized for `format`. Exact inverse of [`to_pixels`].
pub fn to_normalized(b: PixelBox, format: &Format) -> NormalizedBox {
    NormalizedBox {
        x: b.x / format.width,
        y: b.y / format.height,
        w: b.w / format.width,
        h: b.h / format.height,
    }
}

/// Clamp `n` into `[lo, hi]`. When the bounds cross, `lo` wins.
///
/// Unlike `f32::clamp` this never panics, which matters for boxes larger
/// than the space they are clamped into.
pub fn clamp(n: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(n))
}

/// Map a pointer position in displayed (CSS) pixels onto format pixels.
///
/// `display_w`/`display_h` are the on-screen size of the canvas element,
/// which is scaled responsively and rarely matches the format resolution.
pub fn client_to_format(
    client_x: f32,
    client_y: f32,
    display_w: f32,
    display_h: f32,
    format: &Format,
) -> (f32, f32) {
    if display_w <= 0.0 || display_h <= 0.0 {
        return (client_x, client_y);
    }
    (
        client_x * (format.width / display_w),
        client_y * (format.height / display_h),
    )
}

/// How a raster is scaled into a destination box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Fit entirely inside the box, preserving aspect ratio.
    #[default]
    Contain,
    /// Fill the box entirely, preserving aspect ratio; may overflow.
    Cover,
}

/// Placement of a `src_w`×`src_h` raster centered in `dest` under `mode`.
///
/// Cover placements extend past `dest`; cropping is left to the surface.
pub fn fit_rect(src_w: f32, src_h: f32, dest: PixelBox, mode: FitMode) -> PixelBox {
    if src_w <= 0.0 || src_h <= 0.0 {
        return dest;
    }
    let sx = dest.w / src_w;
    let sy = dest.h / src_h;
    let scale = match mode {
        FitMode::Contain => sx.min(sy),
        FitMode::Cover => sx.max(sy),
    };
    let w = src_w * scale;
    let h = src_h * scale;
    PixelBox {
        x: dest.x + (dest.w - w) / 2.0,
        y: dest.y + (dest.h - h) / 2.0,
        w,
        h,
    }
}

/// One of the eight resize handles around a selected box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

/// Which edges of a box a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Handle {
    /// Hit-test order; first match wins.
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::E,
        Handle::Se,
        Handle::S,
        Handle::Sw,
        Handle::W,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nw => "nw",
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
        }
    }

    pub fn edges(self) -> Edges {
        let (left, top, right, bottom) = match self {
            Self::Nw => (true, true, false, false),
            Self::N => (false, true, false, false),
            Self::Ne => (false, true, true, false),
            Self::E => (false, false, true, false),
            Self::Se => (false, false, true, true),
            Self::S => (false, false, false, true),
            Self::Sw => (true, false, false, true),
            Self::W => (true, false, false, false),
        };
        Edges {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The point on `b` this handle is centered on.
    pub fn anchor(self, b: &PixelBox) -> (f32, f32) {
        let (cx, cy) = b.center();
        match self {
            Self::Nw => (b.x, b.y),
            Self::N => (cx, b.y),
            Self::Ne => (b.right(), b.y),
            Self::E => (b.right(), cy),
            Self::Se => (b.right(), b.bottom()),
            Self::S => (cx, b.bottom()),
            Self::Sw => (b.x, b.bottom()),
            Self::W => (b.x, cy),
        }
    }

    /// The square hotspot of side `size` centered on this handle's anchor.
    pub fn rect(self, b: &PixelBox, size: f32) -> PixelBox {
        let (ax, ay) = self.anchor(b);
        PixelBox::new(ax - size / 2.0, ay - size / 2.0, size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatKey;
    use approx::assert_relative_eq;

    #[test]
    fn pixels_scale_by_format() {
        let f = FormatKey::YouTube.format();
        let px = to_pixels(NormalizedBox::new(0.06, 0.14, 0.62, 0.40), &f);
        assert_relative_eq!(px.w, 793.6, epsilon = 1e-3);
        assert_relative_eq!(px.h, 288.0, epsilon = 1e-3);
    }

    #[test]
    fn roundtrip_on_every_format() {
        let b = NormalizedBox::new(0.123, 0.456, 0.321, 0.2);
        for key in FormatKey::ALL {
            let f = key.format();
            let back = to_normalized(to_pixels(b, &f), &f);
            assert_relative_eq!(back.x, b.x, epsilon = 1e-6);
            assert_relative_eq!(back.y, b.y, epsilon = 1e-6);
            assert_relative_eq!(back.w, b.w, epsilon = 1e-6);
            assert_relative_eq!(back.h, b.h, epsilon = 1e-6);
        }
    }

    #[test]
    fn clamp_lower_bound_wins_when_crossed() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 0.0, -20.0), 0.0);
    }

    #[test]
    fn cover_overflows_evenly() {
        let dest = PixelBox::new(0.0, 0.0, 1280.0, 720.0);
        let r = fit_rect(2000.0, 1000.0, dest, FitMode::Cover);
        assert_relative_eq!(r.w, 1440.0, epsilon = 1e-3);
        assert_relative_eq!(r.h, 720.0, epsilon = 1e-3);
        assert_relative_eq!(r.x, -80.0, epsilon = 1e-3);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn contain_letterboxes() {
        let dest = PixelBox::new(10.0, 10.0, 100.0, 100.0);
        let r = fit_rect(200.0, 100.0, dest, FitMode::Contain);
        assert_eq!(r, PixelBox::new(10.0, 35.0, 100.0, 50.0));
    }

    #[test]
    fn client_coordinates_scale_to_format() {
        let f = FormatKey::YouTube.format();
        let (x, y) = client_to_format(320.0, 180.0, 640.0, 360.0, &f);
        assert_eq!((x, y), (640.0, 360.0));
    }

    #[test]
    fn handle_rects_center_on_anchors() {
        let b = PixelBox::new(100.0, 100.0, 200.0, 150.0);
        assert_eq!(Handle::Se.rect(&b, 10.0), PixelBox::new(295.0, 245.0, 10.0, 10.0));
        assert_eq!(Handle::N.rect(&b, 10.0), PixelBox::new(195.0, 95.0, 10.0, 10.0));
        assert!(Handle::W.edges().left && !Handle::W.edges().right);
    }
}
