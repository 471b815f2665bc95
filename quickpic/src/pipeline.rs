use std::path::PathBuf;

use crate::config::ToolConfig;
use crate::error::Result;
use crate::export::Artifact;
use crate::session;
use crate::source::SourceImage;

/// Where an image comes from: a picked/dropped file or pasted bytes
#[derive(Debug, Clone)]
pub enum Input {
    Path(PathBuf),
    Bytes { name: String, data: Vec<u8> },
}

impl Input {
    pub fn load(&self) -> Result<SourceImage> {
        match self {
            Input::Path(path) => SourceImage::open(path),
            Input::Bytes { name, data } => SourceImage::from_bytes(name.clone(), data),
        }
    }
}

/// load -> composite -> export
pub fn run(input: &Input, config: &ToolConfig) -> Result<Artifact> {
    let source = input.load()?;
    log::debug!(
        "Composing `{}` onto {} canvas",
        source.original_name(),
        config.canvas.name()
    );
    session::render(&source, config)
}
