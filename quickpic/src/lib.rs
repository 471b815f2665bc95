pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
pub mod image;
pub mod pipeline;
pub mod session;
pub mod source;

// Re-export commonly used types
pub use canvas::{Canvas, Tool};
pub use config::ToolConfig;
pub use error::{Error, Result};
pub use export::{base_name, output_file_name, Artifact};
pub use image::{OversizePolicy, PngCompression};
pub use pipeline::Input;
pub use session::Session;
pub use source::SourceImage;
