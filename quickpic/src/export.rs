use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// Original name without its last `.extension`
///
/// Falls back to the whole name when there is no dot or nothing would be
/// left in front of it.
pub fn base_name(original: &str) -> &str {
    match original.rfind('.') {
        Some(0) | None => original,
        Some(idx) => &original[..idx],
    }
}

/// Download name for a composed image, e.g. `photo-1284x2778.png`
pub fn output_file_name(original: &str, canvas: Canvas) -> String {
    // don't use Path::with_extension, it treats a leading dot name as a stem
    let (width, height) = canvas.dimensions();
    format!("{}-{width}x{height}.png", base_name(original))
}

/// The finished PNG, ready to be saved or inlined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub png: Vec<u8>,
    pub dimensions: (u32, u32),
    pub source_dimensions: (u32, u32),
    pub offset: (i64, i64),
}

impl Artifact {
    pub fn data_url(&self) -> String {
        crate::image::to_data_url(&self.png)
    }

    /// Write the PNG into `dir` under its download name
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }

        let path = dir.join(&self.file_name);
        fs::write(&path, &self.png).map_err(|e| Error::io(&path, e))?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Tool;

    #[test]
    fn base_name_strips_last_extension_only() {
        assert_eq!(base_name("photo.JPG"), "photo");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("image"), "image");
        assert_eq!(base_name(".hidden"), ".hidden");
        assert_eq!(base_name("trailing."), "trailing");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn output_names_carry_canvas_size() {
        assert_eq!(
            output_file_name("photo.JPG", Tool::Splash.into()),
            "photo-1284x2778.png"
        );
        assert_eq!(
            output_file_name("Dr. STONE v01.webp", Tool::Square.into()),
            "Dr. STONE v01-1284x2778.png"
        );
        assert_eq!(
            output_file_name("logo", Canvas::custom(512, 512).unwrap()),
            "logo-512x512.png"
        );
    }
}
