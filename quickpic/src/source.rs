use imageproc::image::RgbaImage;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Extensions the upload filter lists explicitly next to `image/*`
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "svg"];

// Everything else `image/*` would let through that we can decode
const OTHER_IMAGE_EXTENSIONS: [&str; 10] = [
    "gif", "bmp", "ico", "tif", "tiff", "tga", "pnm", "qoi", "avif", "hdr",
];

/// Whether a file name passes the `image/*, .jpg, .jpeg, .png, .webp, .svg` filter
///
/// Names without an extension pass, since pasted images often have none.
pub fn is_accepted(name: &str) -> bool {
    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        None => true,
        Some(ext) => {
            let ext = ext.to_lowercase();
            ACCEPTED_EXTENSIONS.contains(&ext.as_str())
                || OTHER_IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
    }
}

/// A decoded user image, alive for one tool session
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    original_name: String,
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let data = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(name, &data)
    }

    pub fn from_bytes(original_name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let original_name = original_name.into();
        if !is_accepted(&original_name) {
            log::debug!("`{original_name}` is not a listed image type, sniffing content");
        }

        let pixels = crate::image::decode(&original_name, data)?;
        log::info!(
            "Loaded `{original_name}` ({}x{})",
            pixels.width(),
            pixels.height()
        );

        Ok(SourceImage {
            original_name,
            pixels,
        })
    }

    /// Wrap pixels that are already decoded
    pub fn from_pixels(original_name: impl Into<String>, pixels: RgbaImage) -> Result<Self> {
        let original_name = original_name.into();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(Error::decode(&original_name, "image has no pixels"));
        }
        Ok(SourceImage {
            original_name,
            pixels,
        })
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_filter() {
        assert!(is_accepted("photo.JPG"));
        assert!(is_accepted("icon.svg"));
        assert!(is_accepted("anim.gif"));
        assert!(is_accepted("clipboard"));
        assert!(!is_accepted("notes.txt"));
        assert!(!is_accepted("archive.tar.gz"));
    }

    #[test]
    fn empty_pixels_are_rejected() {
        assert!(SourceImage::from_pixels("x.png", RgbaImage::new(0, 3)).is_err());
        let src = SourceImage::from_pixels("x.png", RgbaImage::new(2, 3)).unwrap();
        assert_eq!(src.dimensions(), (2, 3));
        assert_eq!(src.original_name(), "x.png");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SourceImage::open("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
