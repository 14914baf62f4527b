use std::{ffi::OsStr, path::Path};

use image::RgbaImage;

use crate::{error::Dc6Error, options::DecodeOptions, parser::parse_dc6, Dc6};

impl Dc6 {
    pub fn open_from_bytes(i: &[u8]) -> Result<Dc6, Dc6Error> {
        Self::open_from_bytes_with(i, &DecodeOptions::default())
    }

    pub fn open_from_bytes_with(i: &[u8], options: &DecodeOptions) -> Result<Dc6, Dc6Error> {
        parse_dc6(i, options)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Dc6, Dc6Error> {
        let file = std::fs::read(path)?;

        Self::open_from_bytes(&file)
    }

    /// Renders one frame with the current palette.
    pub fn to_rgba8(&self, direction: usize, frame: usize) -> Result<RgbaImage, Dc6Error> {
        let dc6_frame = self
            .frame(direction, frame)
            .ok_or(Dc6Error::FrameNotFound { direction, frame })?;

        let palette = self.palette();
        let mut image = RgbaImage::new(dc6_frame.width(), dc6_frame.height());

        for (x, y, pixel) in image.enumerate_pixels_mut() {
            // frames from a decode always have full index data
            let color_index = dc6_frame.pixel_index(x, y).unwrap_or(0);
            *pixel = palette.resolve(color_index)?;
        }

        Ok(image)
    }
}
