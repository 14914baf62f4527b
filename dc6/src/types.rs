use std::sync::{Arc, PoisonError, RwLock};

use image::Rgba;

use crate::{error::Dc6Error, palette::Dc6Palette};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dc6Header {
    pub version: i32,
    pub flags: u32,
    /// Read but never checked. Every sprite is decoded as scanline RLE.
    pub encoding: u32,
    pub termination: [u8; 4],
    pub direction_count: u32,
    pub frames_per_direction: u32,
}

impl Dc6Header {
    /// Header size in bytes.
    pub const SIZE: usize = 24;

    pub fn total_frames(&self) -> u64 {
        self.direction_count as u64 * self.frames_per_direction as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dc6FrameHeader {
    pub flipped: u32,
    pub width: u32,
    pub height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    // reserved
    pub unknown: u32,
    /// Pointer-like value kept as is. Frames are read back to back, never by following this.
    pub next_block: u32,
    /// Byte length of the compressed scanlines.
    pub length: u32,
}

impl Dc6FrameHeader {
    pub const SIZE: usize = 32;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dc6Frame {
    pub header: Dc6FrameHeader,
    /// Compressed scanlines, exactly `header.length` bytes.
    pub frame_data: Vec<u8>,
    pub terminator: [u8; 3],
    /// Top-down rows of palette indices, `width * height` long once decoded.
    pub index_data: Vec<u8>,
}

impl Dc6Frame {
    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn is_decoded(&self) -> bool {
        self.index_data.len() == self.header.width as usize * self.header.height as usize
    }

    pub fn pixel_index(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.header.width || y >= self.header.height {
            return None;
        }

        self.index_data
            .get(x as usize + y as usize * self.header.width as usize)
            .copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dc6Direction {
    pub frames: Vec<Dc6Frame>,
}

/// A decoded sprite sheet.
///
/// Cloning gives back independent buffers. The palette is shared with the
/// clone since it is only ever swapped out, never edited.
#[derive(Debug)]
pub struct Dc6 {
    pub header: Dc6Header,
    /// Frame pointer table, kept for fidelity. Not used to locate frames.
    pub frame_pointers: Vec<u32>,
    pub directions: Vec<Dc6Direction>,
    palette: RwLock<Option<Arc<Dc6Palette>>>,
}

impl Dc6 {
    pub(crate) fn new(
        header: Dc6Header,
        frame_pointers: Vec<u32>,
        directions: Vec<Dc6Direction>,
    ) -> Self {
        Self {
            header,
            frame_pointers,
            directions,
            palette: RwLock::new(None),
        }
    }

    pub fn direction_count(&self) -> usize {
        self.directions.len()
    }

    pub fn frames_per_direction(&self) -> usize {
        self.header.frames_per_direction as usize
    }

    pub fn frame(&self, direction: usize, frame: usize) -> Option<&Dc6Frame> {
        self.directions.get(direction)?.frames.get(frame)
    }

    /// All frames in file order.
    pub fn frames(&self) -> impl Iterator<Item = &Dc6Frame> {
        self.directions
            .iter()
            .flat_map(|direction| direction.frames.iter())
    }

    /// Current palette. The grayscale default is created and kept on first use.
    pub fn palette(&self) -> Arc<Dc6Palette> {
        if let Some(palette) = self
            .palette
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return palette.clone();
        }

        self.palette
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(|| Arc::new(Dc6Palette::grayscale()))
            .clone()
    }

    /// Replaces the palette. `None` goes back to the grayscale default.
    pub fn set_palette(&self, palette: Option<Dc6Palette>) {
        let palette = Arc::new(palette.unwrap_or_else(Dc6Palette::grayscale));

        *self.palette.write().unwrap_or_else(PoisonError::into_inner) = Some(palette);
    }

    pub fn resolve(&self, index: u8) -> Result<Rgba<u8>, Dc6Error> {
        self.palette().resolve(index)
    }

    fn palette_snapshot(&self) -> Option<Arc<Dc6Palette>> {
        self.palette
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clone for Dc6 {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            frame_pointers: self.frame_pointers.clone(),
            directions: self.directions.clone(),
            palette: RwLock::new(self.palette_snapshot()),
        }
    }
}

impl PartialEq for Dc6 {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.frame_pointers == other.frame_pointers
            && self.directions == other.directions
            && self.palette_snapshot() == other.palette_snapshot()
    }
}

impl Eq for Dc6 {}
