use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::image::{OversizePolicy, PngCompression};

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub canvas: Canvas,
    pub oversize: OversizePolicy,
    pub png_compression: PngCompression,
}

impl ToolConfig {
    pub fn load() -> Option<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Missing or unreadable files give `None`
    pub fn load_from(path: impl AsRef<Path>) -> Option<Self> {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
    }

    /// Persist to the user config file, returning where it went
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path().ok_or_else(|| {
            Error::io(
                "~/.config/quickpic",
                io::Error::new(io::ErrorKind::NotFound, "no home directory"),
            )
        })?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| Error::io(path, e.into()))?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    pub fn config_path() -> Option<PathBuf> {
        let home = std::env::home_dir()?;
        Some(home.join(".config").join("quickpic").join("config.json"))
    }

    pub fn canvas_dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }
}
