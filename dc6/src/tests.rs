//! In-memory sprite files for tests.

pub const TERMINATION: [u8; 4] = [0xee; 4];
pub const FRAME_TERMINATOR: [u8; 3] = [0xee; 3];

/// One frame, header included, as it sits in a file.
pub fn frame_bytes(width: u32, height: u32, frame_data: &[u8]) -> Vec<u8> {
    let mut res = vec![];

    res.extend(0u32.to_le_bytes()); // flipped
    res.extend(width.to_le_bytes());
    res.extend(height.to_le_bytes());
    res.extend((-4i32).to_le_bytes());
    res.extend(7i32.to_le_bytes());
    res.extend(0u32.to_le_bytes()); // unknown
    res.extend(0u32.to_le_bytes()); // next block
    res.extend((frame_data.len() as u32).to_le_bytes());
    res.extend_from_slice(frame_data);
    res.extend(FRAME_TERMINATOR);

    res
}

pub struct SpriteBuilder {
    direction_count: u32,
    frames_per_direction: u32,
    frames: Vec<Vec<u8>>,
}

impl SpriteBuilder {
    pub fn new(direction_count: u32, frames_per_direction: u32) -> Self {
        Self {
            direction_count,
            frames_per_direction,
            frames: vec![],
        }
    }

    pub fn frame(mut self, width: u32, height: u32, frame_data: &[u8]) -> Self {
        self.frames.push(frame_bytes(width, height, frame_data));
        self
    }

    pub fn header_bytes(&self) -> Vec<u8> {
        let mut res = vec![];

        res.extend(6i32.to_le_bytes());
        res.extend(1u32.to_le_bytes());
        res.extend(0u32.to_le_bytes());
        res.extend(TERMINATION);
        res.extend(self.direction_count.to_le_bytes());
        res.extend(self.frames_per_direction.to_le_bytes());

        res
    }

    /// Writes the header, the pointer table and whichever frames were added.
    pub fn build(&self) -> Vec<u8> {
        let mut res = self.header_bytes();

        let total_frames = (self.direction_count * self.frames_per_direction) as usize;
        let mut pointer = (res.len() + total_frames * 4) as u32;

        for frame_index in 0..total_frames {
            res.extend(pointer.to_le_bytes());

            if let Some(frame) = self.frames.get(frame_index) {
                pointer += frame.len() as u32;
            }
        }

        self.frames.iter().for_each(|frame| res.extend(frame));

        res
    }
}
