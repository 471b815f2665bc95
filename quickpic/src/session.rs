use std::path::{Path, PathBuf};

use crate::config::ToolConfig;
use crate::error::{Error, Result};
use crate::export::{output_file_name, Artifact};
use crate::image;
use crate::source::SourceImage;

/// One tool instance: at most one loaded image, rendered on demand
///
/// Loading a new image replaces the current one; there is no queue.
#[derive(Debug, Default)]
pub struct Session {
    config: ToolConfig,
    source: Option<SourceImage>,
}

impl Session {
    pub fn new(config: ToolConfig) -> Self {
        Session {
            config,
            source: None,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Load `source`, handing back whatever it superseded
    pub fn load(&mut self, source: SourceImage) -> Option<SourceImage> {
        let previous = self.source.replace(source);
        if let Some(previous) = &previous {
            log::debug!("Replacing `{}`", previous.original_name());
        }
        previous
    }

    pub fn cancel(&mut self) {
        if let Some(source) = self.source.take() {
            log::debug!("Discarded `{}`", source.original_name());
        }
    }

    /// Compose and encode the loaded image
    pub fn render(&self) -> Result<Artifact> {
        let source = self.source.as_ref().ok_or(Error::NothingLoaded)?;
        render(source, &self.config)
    }

    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.render()?.write_to(dir)
    }
}

pub(crate) fn render(source: &SourceImage, config: &ToolConfig) -> Result<Artifact> {
    let composite = image::compose(source.pixels(), config.canvas, config.oversize)?;
    let png = image::encode_png(&composite.image, config.png_compression)?;

    Ok(Artifact {
        file_name: output_file_name(source.original_name(), config.canvas),
        png,
        dimensions: composite.image.dimensions(),
        source_dimensions: source.dimensions(),
        offset: composite.offset,
    })
}
