//! Decoded raster images shared between layers.
//!
//! Rasters are immutable once decoded. Layers hold them through
//! [`RasterHandle`] (an `Arc`), so duplicating a layer shares the decoded
//! pixels and their origin instead of decoding again.

use crate::error::{ComposerError, Result};
use image::RgbaImage;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared handle to a decoded raster.
pub type RasterHandle = Arc<Raster>;

/// Process-unique raster identity, used by hosts to cache uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RasterId(u64);

impl RasterId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        RasterId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

pub struct Raster {
    id: RasterId,
    /// Where the pixels came from (file name, object URL, clipboard tag).
    source: Arc<str>,
    pixels: RgbaImage,
}

impl Raster {
    /// Wrap already-decoded RGBA pixels.
    pub fn from_rgba(pixels: RgbaImage, source: &str) -> RasterHandle {
        Arc::new(Self {
            id: RasterId::next(),
            source: Arc::from(source),
            pixels,
        })
    }

    pub fn id(&self) -> RasterId {
        self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Decode an encoded image blob (PNG, JPEG, ...) into a shared raster.
///
/// The format is sniffed from the header, not from `source`.
pub fn decode_raster(bytes: &[u8], source: &str) -> Result<RasterHandle> {
    if bytes.is_empty() {
        return Err(ComposerError::Decode {
            source_id: source.to_string(),
            reason: "empty input".to_string(),
            source: None,
        });
    }
    let img = image::load_from_memory(bytes).map_err(|e| ComposerError::Decode {
        source_id: source.to_string(),
        reason: e.to_string(),
        source: Some(e),
    })?;
    let rgba = img.to_rgba8();
    log::debug!(
        "decoded raster `{source}` ({}x{})",
        rgba.width(),
        rgba.height()
    );
    Ok(Raster::from_rgba(rgba, source))
}
