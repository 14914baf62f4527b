#[derive(Debug, thiserror::Error)]
pub enum Dc6Error {
    #[error(
        "Truncated input while reading {field} at offset {offset}: \
        need ({requested}) bytes, have ({remaining})"
    )]
    TruncatedInput {
        field: &'static str,
        offset: usize,
        requested: usize,
        remaining: usize,
    },
    #[error("Palette index {index} is out of range for a palette of {palette_len} colors")]
    PaletteIndexOutOfRange { index: u8, palette_len: usize },
    #[error("Frame of {width}x{height} exceeds the limit of {limit} pixels")]
    FrameTooLarge {
        width: u32,
        height: u32,
        limit: usize,
    },
    #[error("Frames add up to more than the limit of {limit} pixels")]
    SpriteTooLarge { limit: usize },
    #[error("Direction count {direction_count} exceeds the limit of {limit}")]
    TooManyDirections { direction_count: u32, limit: u32 },
    #[error("No frame {frame} in direction {direction}")]
    FrameNotFound { direction: usize, frame: usize },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
