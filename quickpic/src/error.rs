use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be interpreted as an image
    #[error("failed to decode `{name}`: {reason}")]
    Decode { name: String, reason: String },

    #[error(
        "source image is {width}x{height}, larger than the {canvas_width}x{canvas_height} canvas"
    )]
    Oversized {
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("no image loaded")]
    NothingLoaded,

    #[error("failed to resize image: {0}")]
    Resize(String),

    #[error("failed to encode PNG")]
    Encode(#[from] imageproc::image::ImageError),

    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn decode(name: &str, reason: impl std::fmt::Display) -> Self {
        Error::Decode {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
