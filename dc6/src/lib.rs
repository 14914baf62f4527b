//! DC6 sprite sheet decoding
//!
//! A DC6 holds a number of directions, each with the same number of frames.
//! Every frame is a palette indexed bitmap stored as run-length encoded
//! scanlines, bottom row first.
pub mod cursor;
pub mod error;
mod options;
mod palette;
mod parser;
pub mod rle;
mod types;
mod utils;

#[cfg(test)]
mod tests;

pub use error::Dc6Error;
pub use options::DecodeOptions;
pub use palette::{resolve, Dc6Palette, PALETTE_SIZE};
pub use parser::decode_frames;
pub use types::*;

/// Decodes a whole sprite sheet with default options.
///
/// Either every frame is read and decoded or an error comes back. There is no partial result.
pub fn decode(bytes: &[u8]) -> Result<Dc6, Dc6Error> {
    Dc6::open_from_bytes(bytes)
}
