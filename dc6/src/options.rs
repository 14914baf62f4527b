/// Knobs for [`crate::Dc6::open_from_bytes_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode frame scanlines on the rayon thread pool.
    pub parallel: bool,
    /// Largest `width * height` a single frame may declare.
    pub max_frame_pixels: usize,
    /// Largest `width * height` summed over every frame.
    pub max_total_pixels: usize,
    /// Largest direction count a header may declare.
    pub max_directions: u32,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_FRAME_PIXELS: usize = 1 << 26;
    pub const DEFAULT_MAX_TOTAL_PIXELS: usize = 1 << 28;
    pub const DEFAULT_MAX_DIRECTIONS: u32 = 1 << 16;

    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_frame_pixels: Self::DEFAULT_MAX_FRAME_PIXELS,
            max_total_pixels: Self::DEFAULT_MAX_TOTAL_PIXELS,
            max_directions: Self::DEFAULT_MAX_DIRECTIONS,
        }
    }
}
