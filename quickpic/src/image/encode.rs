//! PNG encoding and data URLs

use base64::{engine::general_purpose, Engine as _};
use imageproc::image::codecs::png::{CompressionType, FilterType, PngEncoder};
use imageproc::image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::Result;

pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

/// Compress an RGBA canvas to PNG with the specified compression level
pub fn compress_to_png<W>(img: &RgbaImage, writer: &mut W, compression: PngCompression) -> Result<()>
where
    W: std::io::Write,
{
    let compression_type = match compression {
        PngCompression::Fast => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
        PngCompression::Best => CompressionType::Best,
    };

    let encoder = PngEncoder::new_with_quality(writer, compression_type, FilterType::Adaptive);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;

    Ok(())
}

pub fn encode_png(img: &RgbaImage, compression: PngCompression) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    compress_to_png(img, &mut buffer, compression)?;
    log::trace!("Encoded {}x{} PNG, {} bytes", img.width(), img.height(), buffer.len());
    Ok(buffer)
}

/// `data:image/png;base64,...` for already encoded PNG bytes
pub fn to_data_url(png: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(png);
    format!("data:{PNG_MIME};base64,{encoded}")
}
