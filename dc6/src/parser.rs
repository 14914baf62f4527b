use rayon::prelude::*;

use crate::{
    cursor::ByteCursor,
    error::Dc6Error,
    options::DecodeOptions,
    rle::decode_scanlines,
    Dc6, Dc6Direction, Dc6Frame, Dc6FrameHeader, Dc6Header,
};

const TERMINATOR_SIZE: usize = 3;

pub fn parse_header(cursor: &mut ByteCursor) -> Result<Dc6Header, Dc6Error> {
    let version = cursor.read_i32("version")?;
    let flags = cursor.read_u32("flags")?;
    let encoding = cursor.read_u32("encoding")?;
    let termination = cursor.read_array::<4>("termination")?;
    let direction_count = cursor.read_u32("direction count")?;
    let frames_per_direction = cursor.read_u32("frames per direction")?;

    Ok(Dc6Header {
        version,
        flags,
        encoding,
        termination,
        direction_count,
        frames_per_direction,
    })
}

pub fn parse_frame_pointers(
    cursor: &mut ByteCursor,
    total_frames: u64,
) -> Result<Vec<u32>, Dc6Error> {
    // count is untrusted
    let mut frame_pointers = vec![];

    for _ in 0..total_frames {
        frame_pointers.push(cursor.read_u32("frame pointer")?);
    }

    Ok(frame_pointers)
}

pub fn parse_frame_header(cursor: &mut ByteCursor) -> Result<Dc6FrameHeader, Dc6Error> {
    Ok(Dc6FrameHeader {
        flipped: cursor.read_u32("frame flipped")?,
        width: cursor.read_u32("frame width")?,
        height: cursor.read_u32("frame height")?,
        offset_x: cursor.read_i32("frame offset x")?,
        offset_y: cursor.read_i32("frame offset y")?,
        unknown: cursor.read_u32("frame unknown")?,
        next_block: cursor.read_u32("frame next block")?,
        length: cursor.read_u32("frame length")?,
    })
}

/// Reads one frame without decoding its scanlines.
pub fn parse_frame(cursor: &mut ByteCursor) -> Result<Dc6Frame, Dc6Error> {
    let header = parse_frame_header(cursor)?;
    let frame_data = cursor
        .read_bytes("frame data", header.length as usize)?
        .to_vec();
    let terminator = cursor.read_array::<TERMINATOR_SIZE>("frame terminator")?;

    Ok(Dc6Frame {
        header,
        frame_data,
        terminator,
        index_data: vec![],
    })
}

/// Reads every frame body and groups them into directions.
///
/// Frame `n` in file order belongs to direction `n / frames_per_direction`.
pub fn parse_directions(
    cursor: &mut ByteCursor,
    header: &Dc6Header,
) -> Result<Vec<Dc6Direction>, Dc6Error> {
    let frames_per_direction = header.frames_per_direction as usize;

    let mut directions: Vec<Dc6Direction> = vec![];

    for _ in 0..header.direction_count {
        let mut frames = vec![];

        for _ in 0..frames_per_direction {
            frames.push(parse_frame(cursor)?);
        }

        directions.push(Dc6Direction { frames });
    }

    Ok(directions)
}

fn check_direction_count(header: &Dc6Header, limit: u32) -> Result<(), Dc6Error> {
    if header.direction_count > limit {
        return Err(Dc6Error::TooManyDirections {
            direction_count: header.direction_count,
            limit,
        });
    }

    Ok(())
}

/// Bounds every index buffer before any of them is allocated.
fn check_frame_sizes(
    directions: &[Dc6Direction],
    options: &DecodeOptions,
) -> Result<(), Dc6Error> {
    let mut total_pixels = 0usize;

    for frame in directions.iter().flat_map(|direction| direction.frames.iter()) {
        let Dc6FrameHeader { width, height, .. } = frame.header;

        let pixels = (width as usize)
            .checked_mul(height as usize)
            .filter(|&pixels| pixels <= options.max_frame_pixels)
            .ok_or(Dc6Error::FrameTooLarge {
                width,
                height,
                limit: options.max_frame_pixels,
            })?;

        total_pixels = total_pixels
            .checked_add(pixels)
            .filter(|&total| total <= options.max_total_pixels)
            .ok_or(Dc6Error::SpriteTooLarge {
                limit: options.max_total_pixels,
            })?;
    }

    Ok(())
}

impl Dc6Frame {
    /// Fills `index_data` from `frame_data`.
    pub fn decode(&mut self) {
        self.index_data =
            decode_scanlines(&self.frame_data, self.header.width, self.header.height);
    }
}

/// Decodes the scanlines of every frame.
pub fn decode_frames(directions: &mut [Dc6Direction], parallel: bool) {
    if parallel {
        directions
            .par_iter_mut()
            .flat_map(|direction| direction.frames.par_iter_mut())
            .for_each(Dc6Frame::decode);
    } else {
        directions
            .iter_mut()
            .flat_map(|direction| direction.frames.iter_mut())
            .for_each(Dc6Frame::decode);
    }
}

pub fn parse_dc6(i: &[u8], options: &DecodeOptions) -> Result<Dc6, Dc6Error> {
    let mut cursor = ByteCursor::new(i);

    let header = parse_header(&mut cursor)?;

    log::debug!(
        "dc6 version {} flags {:#x} encoding {} with {} directions of {} frames",
        header.version,
        header.flags,
        header.encoding,
        header.direction_count,
        header.frames_per_direction
    );

    check_direction_count(&header, options.max_directions)?;

    let frame_pointers = parse_frame_pointers(&mut cursor, header.total_frames())?;
    let mut directions = parse_directions(&mut cursor, &header)?;

    if cursor.remaining() > 0 {
        log::debug!("{} bytes left after the last frame", cursor.remaining());
    }

    check_frame_sizes(&directions, options)?;
    decode_frames(&mut directions, options.parallel);

    log::trace!("decoded {} frames", header.total_frames());

    Ok(Dc6::new(header, frame_pointers, directions))
}
