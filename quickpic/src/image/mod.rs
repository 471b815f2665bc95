//! Decode, compose and encode stages of the canvas tools

mod compose;
mod decode;
mod encode;

pub use compose::{
    centering_offset, compose, fitted_dimensions, is_oversized, Composite, OversizePolicy,
};
pub use decode::decode;
pub use encode::{compress_to_png, encode_png, to_data_url, PngCompression, PNG_MIME};
