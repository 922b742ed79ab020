//! Core composition data model.
//!
//! A composition is a background plus an ordered stack of layers. Layer
//! order is render order: index 0 is painted first (bottom), the last layer
//! is on top. Layers are either text or image; each carries a fully
//! enumerated style record with defaults so partial construction is safe.

use crate::config::EngineConfig;
use crate::format::{Format, FormatKey};
use crate::geometry::{FitMode, NormalizedBox, clamp};
use crate::id::LayerId;
use crate::raster::RasterHandle;
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let nibble = |i: usize| hex_val(bytes[i]);
        let pair = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        let (r, g, b, a) = match bytes.len() {
            3 => (nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, 255),
            4 => (
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
                nibble(3)? * 17,
            ),
            6 => (pair(0)?, pair(2)?, pair(4)?, 255),
            8 => (pair(0)?, pair(2)?, pair(4)?, pair(6)?),
            _ => return None,
        };
        Some(Self::rgba8(r, g, b, a as f32 / 255.0))
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// CSS `rgba(r,g,b,a)` form, as consumed by canvas style setters.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({r},{g},{b},{a})")
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Same color with its alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

// ─── Text styling ────────────────────────────────────────────────────────

/// Horizontal text alignment; selects the anchor point of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub weight: u16, // 100..900
    /// Base size in px; auto-fit only ever shrinks from here.
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Bebas Neue".into(),
            weight: 900,
            size: 110.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStroke {
    pub on: bool,
    pub color: Color,
    pub width: f32,
}

impl Default for TextStroke {
    fn default() -> Self {
        Self {
            on: true,
            color: Color::BLACK,
            width: 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextShadow {
    pub on: bool,
    pub color: Color,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for TextShadow {
    fn default() -> Self {
        Self {
            on: true,
            color: Color::BLACK,
            blur: 18.0,
            offset_x: 6.0,
            offset_y: 6.0,
        }
    }
}

/// Rounded background box behind a text layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pill {
    pub on: bool,
    pub color: Color,
    /// 0–1, applied on top of `color`.
    pub opacity: f32,
    /// Inset applied to the text box on every side.
    pub padding: f32,
    pub radius: f32,
}

impl Default for Pill {
    fn default() -> Self {
        Self {
            on: false,
            color: Color::BLACK,
            opacity: 0.35,
            padding: 18.0,
            radius: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font: FontSpec,
    pub auto_fit: bool,
    pub fill: Color,
    pub align: TextAlign,
    pub uppercase: bool,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub stroke: TextStroke,
    pub shadow: TextShadow,
    pub pill: Pill,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            auto_fit: true,
            fill: Color::WHITE,
            align: TextAlign::Center,
            uppercase: true,
            line_height: 1.05,
            stroke: TextStroke::default(),
            shadow: TextShadow::default(),
            pill: Pill::default(),
        }
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    /// Raw content; explicit `\n` line breaks are preserved.
    pub content: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageLayer {
    /// `None` until an upload decodes; rendered as a placeholder meanwhile.
    #[serde(skip)]
    pub raster: Option<RasterHandle>,
    pub fit: FitMode,
    pub opacity: f32,
    pub shadow: bool,
}

impl Default for ImageLayer {
    fn default() -> Self {
        Self {
            raster: None,
            fit: FitMode::Contain,
            opacity: 1.0,
            shadow: false,
        }
    }
}

impl ImageLayer {
    /// Origin identifier of the assigned raster, if any.
    pub fn source(&self) -> Option<&str> {
        self.raster.as_ref().map(|r| r.source())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    Text(TextLayer),
    Image(ImageLayer),
}

/// A positioned, stylable element in the render stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    /// Normalized placement; format independent.
    #[serde(rename = "box")]
    pub bounds: NormalizedBox,
    #[serde(flatten)]
    pub kind: LayerKind,
}

impl Layer {
    /// A text layer with stock styling.
    pub fn text(name: &str, content: &str, bounds: NormalizedBox) -> Self {
        Self {
            id: LayerId::fresh(),
            name: name.to_string(),
            visible: true,
            bounds,
            kind: LayerKind::Text(TextLayer {
                content: content.to_string(),
                style: TextStyle::default(),
            }),
        }
    }

    /// An image layer with no raster yet.
    pub fn image(name: &str, bounds: NormalizedBox) -> Self {
        Self {
            id: LayerId::fresh(),
            name: name.to_string(),
            visible: true,
            bounds,
            kind: LayerKind::Image(ImageLayer::default()),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, LayerKind::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextLayer> {
        match &self.kind {
            LayerKind::Text(t) => Some(t),
            LayerKind::Image(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLayer> {
        match &mut self.kind {
            LayerKind::Text(t) => Some(t),
            LayerKind::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageLayer> {
        match &self.kind {
            LayerKind::Image(i) => Some(i),
            LayerKind::Text(_) => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageLayer> {
        match &mut self.kind {
            LayerKind::Image(i) => Some(i),
            LayerKind::Text(_) => None,
        }
    }

    /// Copy with a fresh id, a "copy" name and a small positional offset.
    ///
    /// Plain fields are deep-copied; the raster handle is shared.
    pub fn duplicate(&self, config: &EngineConfig) -> Self {
        let mut copy = self.clone();
        copy.id = LayerId::fresh();
        let base = if self.name.is_empty() {
            "Layer"
        } else {
            self.name.as_str()
        };
        copy.name = format!("{base} copy");
        copy.bounds.x = clamp(
            self.bounds.x + config.duplicate_offset,
            0.0,
            config.duplicate_max,
        );
        copy.bounds.y = clamp(
            self.bounds.y + config.duplicate_offset,
            0.0,
            config.duplicate_max,
        );
        copy
    }
}

// ─── Composition ─────────────────────────────────────────────────────────

/// How the background raster fills the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundFit {
    Contain,
    #[default]
    Cover,
    /// Blurred cover copy underneath a sharp contain copy.
    ContainBlur,
}

/// The full document state: format, background and layer stack.
#[derive(Debug, Clone, Serialize)]
pub struct Composition {
    pub format: FormatKey,
    #[serde(skip)]
    pub background: Option<RasterHandle>,
    pub background_fit: BackgroundFit,
    /// Gradient overlay strength, 0–1.
    pub dim: f32,
    /// Render order: first = bottom, last = top.
    pub layers: Vec<Layer>,
    pub selected: Option<LayerId>,
    /// Supersampling multiplier applied to the output surface.
    pub device_scale: f32,
}

impl Default for Composition {
    fn default() -> Self {
        Self {
            format: FormatKey::YouTube,
            background: None,
            background_fit: BackgroundFit::Cover,
            dim: 0.15,
            layers: Vec::new(),
            selected: None,
            device_scale: 1.0,
        }
    }
}

impl Composition {
    pub fn format(&self) -> Format {
        self.format.format()
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.and_then(|id| self.layer(id))
    }

    /// Remove a layer. Selection falls back to the layer below it, then to
    /// the bottom layer, then to nothing.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let idx = self.index_of(id)?;
        let removed = self.layers.remove(idx);
        if self.selected == Some(id) {
            self.selected = idx
                .checked_sub(1)
                .and_then(|i| self.layers.get(i))
                .or_else(|| self.layers.first())
                .map(|l| l.id);
        }
        Some(removed)
    }

    /// Swap a layer with the one above it. Returns true if z-order changed.
    pub fn bring_forward(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx + 1 < self.layers.len() => {
                self.layers.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Swap a layer with the one below it. Returns true if z-order changed.
    pub fn send_backward(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(idx) if idx > 0 => {
                self.layers.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }
}
