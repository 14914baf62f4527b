//! Scanline run-length decoding.
//!
//! Rows are stored bottom to top. Each control byte is one of
//! - `0x80`: end of the current row
//! - high bit set: skip `byte & 0x7f` transparent pixels
//! - high bit clear: copy the next `byte` literal indices
const END_OF_SCANLINE: u8 = 0x80;
const MAX_RUN_LENGTH: u8 = 0x7f;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scanline {
    EndOfLine,
    Transparent(u8),
    Opaque(u8),
}

impl From<u8> for Scanline {
    fn from(b: u8) -> Self {
        if b == END_OF_SCANLINE {
            Self::EndOfLine
        } else if b & END_OF_SCANLINE != 0 {
            Self::Transparent(b & MAX_RUN_LENGTH)
        } else {
            Self::Opaque(b)
        }
    }
}

/// Decodes one frame's compressed scanlines into `width * height` top-down palette indices.
///
/// Transparent pixels stay `0`. Literal writes that land outside the buffer,
/// or whose source lies past the end of `frame_data`, are skipped instead of
/// failing. Decoding stops at the end of the top row, which is stored last,
/// or when `frame_data` runs out, whichever comes first.
pub fn decode_scanlines(frame_data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let mut index_data = vec![0u8; width as usize * height as usize];

    let width = width as i64;
    let mut x: i64 = 0;
    let mut y: i64 = height as i64 - 1;
    let mut offset = 0usize;
    let mut clamped = 0usize;
    let mut reached_last_row = false;

    while offset < frame_data.len() {
        let control = frame_data[offset];
        offset += 1;

        match Scanline::from(control) {
            Scanline::EndOfLine => {
                if y == 0 {
                    reached_last_row = true;
                    break;
                }

                y -= 1;
                x = 0;
            }
            Scanline::Transparent(n) => x += n as i64,
            Scanline::Opaque(n) => {
                let n = n as usize;

                for i in 0..n {
                    let target = y
                        .checked_mul(width)
                        .and_then(|row| row.checked_add(x + i as i64))
                        .and_then(|target| usize::try_from(target).ok());

                    let slot = target.and_then(|target| index_data.get_mut(target));

                    match (slot, frame_data.get(offset + i)) {
                        (Some(slot), Some(&value)) => *slot = value,
                        _ => clamped += 1,
                    }
                }

                offset += n;
                x += n as i64;
            }
        }
    }

    if clamped > 0 {
        log::warn!("skipped {clamped} out of range pixel writes");
    }

    if !reached_last_row {
        log::trace!("scanlines ended at row {y} without a final end of line");
    }

    index_data
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classify_control_bytes() {
        assert_eq!(Scanline::from(0x80), Scanline::EndOfLine);
        assert_eq!(Scanline::from(0x85), Scanline::Transparent(5));
        assert_eq!(Scanline::from(0xff), Scanline::Transparent(0x7f));
        assert_eq!(Scanline::from(0x00), Scanline::Opaque(0));
        assert_eq!(Scanline::from(0x7f), Scanline::Opaque(0x7f));
    }

    #[test]
    fn single_end_of_line() {
        let res = decode_scanlines(&[0x80], 4, 1);

        assert_eq!(res, vec![0; 4]);
    }

    #[test]
    fn literal_run_on_bottom_row() {
        let res = decode_scanlines(&[0x03, 0x0a, 0x0b, 0x0c, 0x80], 4, 1);

        assert_eq!(res, vec![0x0a, 0x0b, 0x0c, 0x00]);
    }

    #[test]
    fn rows_are_bottom_up() {
        // bottom row: skip 1, then 1 literal; top row: 2 literals
        let data = [0x81, 0x01, 0x05, 0x80, 0x02, 0x07, 0x08, 0x80];
        let res = decode_scanlines(&data, 2, 2);

        assert_eq!(res, vec![0x07, 0x08, 0x00, 0x05]);
    }

    #[test]
    fn trailing_bytes_after_last_row_are_ignored() {
        let data = [0x01, 0x09, 0x80, 0x01, 0x42];
        let res = decode_scanlines(&data, 1, 1);

        assert_eq!(res, vec![0x09]);
    }

    #[test]
    fn input_may_end_without_end_of_line() {
        let data = [0x80, 0x02, 0x01, 0x02];
        let res = decode_scanlines(&data, 2, 2);

        assert_eq!(res, vec![0x01, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn clamps_literal_past_input() {
        // run claims 3 literals but only 1 follows
        let res = decode_scanlines(&[0x03, 0x0a], 3, 1);

        assert_eq!(res, vec![0x0a, 0x00, 0x00]);
    }

    #[test]
    fn clamps_literal_past_buffer() {
        let res = decode_scanlines(&[0x03, 0x01, 0x02, 0x03, 0x80], 2, 1);

        assert_eq!(res, vec![0x01, 0x02]);
    }

    #[test]
    fn empty_frame() {
        assert!(decode_scanlines(&[0x02, 0x01, 0x02, 0x80, 0x80], 0, 0).is_empty());
        assert_eq!(decode_scanlines(&[], 2, 2), vec![0; 4]);
    }
}
