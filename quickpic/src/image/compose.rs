//! Centered compositing onto a fixed-size transparent canvas

use fast_image_resize as fr;
use fr::images::Image as FrImage;
use imageproc::image::{imageops, Rgba, RgbaImage};

use crate::canvas::Canvas;
use crate::error::{Error, Result};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// What to do with a source that is larger than the canvas on either axis
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OversizePolicy {
    /// Draw at native size and let the canvas bounds clip it
    #[default]
    Crop,
    /// Refuse to compose
    Reject,
    /// Downscale, keeping the aspect ratio, until it fits
    Fit,
}

/// Offset that centers a `source`-sized image inside `canvas`
///
/// Negative when the source is larger. Odd leftovers round toward negative
/// infinity so the source stays on the pixel grid.
pub fn centering_offset(canvas: (u32, u32), source: (u32, u32)) -> (i64, i64) {
    let x = (i64::from(canvas.0) - i64::from(source.0)).div_euclid(2);
    let y = (i64::from(canvas.1) - i64::from(source.1)).div_euclid(2);
    (x, y)
}

pub fn is_oversized(canvas: (u32, u32), source: (u32, u32)) -> bool {
    source.0 > canvas.0 || source.1 > canvas.1
}

/// A composed canvas plus where the source ended up on it
#[derive(Debug, Clone)]
pub struct Composite {
    pub image: RgbaImage,
    pub offset: (i64, i64),
    /// Size the source was drawn at, which differs from its native size only
    /// under [`OversizePolicy::Fit`]
    pub drawn_dimensions: (u32, u32),
}

/// Draw `source` unscaled and centered on a transparent `canvas`
pub fn compose(source: &RgbaImage, canvas: Canvas, policy: OversizePolicy) -> Result<Composite> {
    let (canvas_width, canvas_height) = canvas.dimensions();
    if canvas_width == 0 || canvas_height == 0 {
        return Err(Error::InvalidCanvas {
            width: canvas_width,
            height: canvas_height,
        });
    }

    let target = (canvas_width, canvas_height);
    let (width, height) = source.dimensions();

    let fitted;
    let layer = if is_oversized(target, (width, height)) {
        match policy {
            OversizePolicy::Crop => {
                log::warn!(
                    "Source {width}x{height} exceeds {canvas_width}x{canvas_height} canvas, cropping"
                );
                source
            }
            OversizePolicy::Reject => {
                return Err(Error::Oversized {
                    width,
                    height,
                    canvas_width,
                    canvas_height,
                })
            }
            OversizePolicy::Fit => {
                fitted = fit_within(source, target)?;
                &fitted
            }
        }
    } else {
        source
    };

    let offset = centering_offset(target, layer.dimensions());
    log::debug!(
        "Placing {}x{} layer at ({}, {})",
        layer.width(),
        layer.height(),
        offset.0,
        offset.1
    );

    let mut result = RgbaImage::from_pixel(canvas_width, canvas_height, TRANSPARENT);
    // replace, not overlay: source pixels land bit-exact
    imageops::replace(&mut result, layer, offset.0, offset.1);

    Ok(Composite {
        image: result,
        offset,
        drawn_dimensions: layer.dimensions(),
    })
}

/// Largest size with the source's aspect ratio that fits in `target`, never upscaled
pub fn fitted_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (width, height) = source;
    let (target_width, target_height) = target;
    if !is_oversized(target, source) {
        return source;
    }

    // integer cross-multiplication keeps the limiting side exact
    let (w, h, tw, th) = (
        u64::from(width),
        u64::from(height),
        u64::from(target_width),
        u64::from(target_height),
    );
    if tw * h <= th * w {
        (target_width, (h * tw / w).max(1) as u32)
    } else {
        ((w * th / h).max(1) as u32, target_height)
    }
}

fn fit_within(img: &RgbaImage, target: (u32, u32)) -> Result<RgbaImage> {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = fitted_dimensions((width, height), target);
    log::debug!("Fitting {width}x{height} source into {new_width}x{new_height}");

    let src_image = FrImage::from_vec_u8(width, height, img.as_raw().clone(), fr::PixelType::U8x4)
        .map_err(|e| Error::Resize(e.to_string()))?;

    let mut dst_buffer = vec![0u8; new_width as usize * new_height as usize * 4];
    let mut dst_image =
        FrImage::from_slice_u8(new_width, new_height, &mut dst_buffer, fr::PixelType::U8x4)
            .map_err(|e| Error::Resize(e.to_string()))?;

    // Downscaling only: Lanczos3 preserves detail
    let algorithm = fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3);
    let mut resizer = fr::Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            Some(&fr::ResizeOptions::new().resize_alg(algorithm)),
        )
        .map_err(|e| Error::Resize(e.to_string()))?;

    RgbaImage::from_raw(new_width, new_height, dst_buffer)
        .ok_or_else(|| Error::Resize("resized buffer has the wrong length".to_string()))
}
