//! Raster export: encoders and download naming.

use crate::error::RenderError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, RgbaImage};
use tc_core::{EngineConfig, Format};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Png,
    /// Quality in 0–1.
    Jpeg { quality: f32 },
}

impl ExportFormat {
    /// JPEG with `quality` clamped to the configured range.
    pub fn jpeg(quality: f32, config: &EngineConfig) -> Self {
        Self::Jpeg {
            quality: config.clamp_jpeg_quality(quality),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpeg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// `design_{key}_{w}x{h}_{timestamp}.{ext}`, with `:` and `.` in the
/// ISO-8601 timestamp replaced by `-`.
pub fn export_filename(format: &Format, export: ExportFormat, iso_timestamp: &str) -> String {
    let (w, h) = format.pixel_size();
    let ts = iso_timestamp.replace([':', '.'], "-");
    format!(
        "design_{}_{w}x{h}_{ts}.{}",
        format.key.as_str(),
        export.extension()
    )
}

/// Encode RGBA pixels. JPEG drops the alpha channel.
pub fn encode_rgba(pixels: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
    let (w, h) = pixels.dimensions();
    let mut out = Vec::new();
    match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut out).write_image(
                pixels.as_raw(),
                w,
                h,
                image::ExtendedColorType::Rgba8,
            )?;
        }
        ExportFormat::Jpeg { quality } => {
            let rgb = DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
            let q = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
            JpegEncoder::new_with_quality(&mut out, q).write_image(
                rgb.as_raw(),
                w,
                h,
                image::ExtendedColorType::Rgb8,
            )?;
        }
    }
    log::debug!("encoded {w}x{h} {} ({} bytes)", format.extension(), out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tc_core::FormatKey;

    #[test]
    fn filename_scrubs_timestamp() {
        let name = export_filename(
            &FormatKey::Pinterest.format(),
            ExportFormat::Png,
            "2024-05-01T12:30:45.123Z",
        );
        assert_eq!(name, "design_pinterest_2_3_1000x1500_2024-05-01T12-30-45-123Z.png");
    }

    #[test]
    fn jpeg_quality_is_clamped() {
        let cfg = EngineConfig::default();
        assert_eq!(ExportFormat::jpeg(0.1, &cfg), ExportFormat::Jpeg { quality: 0.4 });
        assert_eq!(ExportFormat::jpeg(3.0, &cfg), ExportFormat::Jpeg { quality: 1.0 });
    }

    #[test]
    fn encodes_decodable_png_and_jpeg() {
        let img = RgbaImage::from_pixel(8, 4, image::Rgba([10, 200, 30, 255]));
        for fmt in [ExportFormat::Png, ExportFormat::Jpeg { quality: 0.9 }] {
            let bytes = encode_rgba(&img, fmt).unwrap();
            let back = image::load_from_memory(&bytes).unwrap();
            assert_eq!((back.width(), back.height()), (8, 4));
            assert_eq!(
                image::ImageFormat::from_mime_type(fmt.mime()),
                image::guess_format(&bytes).ok()
            );
        }
    }
}
