//! Image decoding: raster formats through the image crate, SVG through resvg

use imageproc::image::{DynamicImage, ImageDecoder, ImageReader, ImageResult, RgbaImage};
use resvg::{tiny_skia, usvg};

use std::io::Cursor;

use crate::error::{Error, Result};

/// Same allocation budget the image crate's default `Limits` give raster decoding
const MAX_DECODED_BYTES: u64 = 512 * 1024 * 1024;

/// Decode image bytes into an RGBA surface at the image's native size
///
/// `name` is only used for SVG detection and error messages.
pub fn decode(name: &str, data: &[u8]) -> Result<RgbaImage> {
    let img = if is_svg(name, data) {
        log::debug!("Rasterizing SVG {name}");
        rasterize_svg(data).map_err(|e| Error::decode(name, e))?
    } else {
        decode_raster(data)
            .map_err(|e| Error::decode(name, e))?
            .into_rgba8()
    };

    if img.width() == 0 || img.height() == 0 {
        return Err(Error::decode(name, "image has no pixels"));
    }

    Ok(img)
}

/// Decode with the EXIF orientation applied, as a browser would display it
fn decode_raster(data: &[u8]) -> ImageResult<DynamicImage> {
    let mut decoder = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

fn is_svg(name: &str, data: &[u8]) -> bool {
    if name.to_lowercase().ends_with(".svg") {
        return true;
    }
    let head = &data[..data.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Render an SVG at its intrinsic size, the way a browser draws an `<img>` of it
fn rasterize_svg(data: &[u8]) -> std::result::Result<RgbaImage, String> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default()).map_err(|e| e.to_string())?;

    let size = tree.size();
    let width = (size.width().ceil() as u32).max(1);
    let height = (size.height().ceil() as u32).max(1);

    let bytes = u64::from(width) * u64::from(height) * 4;
    if bytes > MAX_DECODED_BYTES {
        return Err(format!(
            "{width}x{height} exceeds the {} MiB decode limit",
            MAX_DECODED_BYTES / (1024 * 1024)
        ));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| format!("cannot allocate {width}x{height} pixmap"))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let raw = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(width, height, raw).ok_or_else(|| "pixmap size mismatch".to_string())
}
