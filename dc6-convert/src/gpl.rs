//! GIMP palette (.gpl) files
//!
//! ```text
//! GIMP Palette
//! Name: units
//! Columns: 16
//! #
//!   0   0   0	black
//! 255 255 255	white
//! ```
use std::path::Path;

use dc6::Dc6Palette;
use eyre::{eyre, Context};
use nom::{
    character::complete::{space0, space1, u8 as dec_u8},
    combinator::rest,
    IResult, Parser,
};

const MAGIC: &str = "GIMP Palette";

fn parse_color(i: &str) -> IResult<&str, [u8; 3]> {
    let (i, (_, r, _, g, _, b, _)) =
        (space0, dec_u8, space1, dec_u8, space1, dec_u8, rest).parse(i)?;

    Ok((i, [r, g, b]))
}

pub fn parse_gpl(s: &str) -> eyre::Result<Dc6Palette> {
    let mut lines = s
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    match lines.next() {
        Some((_, MAGIC)) => (),
        _ => return Err(eyre!("not a GIMP palette, missing `{MAGIC}` header")),
    }

    let mut colors = vec![];

    for (line_number, line) in lines {
        if line.starts_with("Name:") || line.starts_with("Columns:") {
            continue;
        }

        let Ok((_, color)) = parse_color(line) else {
            return Err(eyre!("cannot parse color on line {}: `{line}`", line_number + 1));
        };

        colors.push(color);
    }

    Ok(Dc6Palette::from_rgb(&colors))
}

pub fn open_gpl(path: impl AsRef<Path>) -> eyre::Result<Dc6Palette> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read palette {}", path.display()))?;

    parse_gpl(&s).wrap_err_with(|| format!("cannot parse palette {}", path.display()))
}

#[cfg(test)]
mod test {
    use dc6::PALETTE_SIZE;
    use image::Rgba;

    use super::*;

    #[test]
    fn parse_small_palette() {
        let s = "\
GIMP Palette
Name: units
Columns: 16
#
  0   0   0\tblack
255 128   1\tsomething orange
 12  34  56
";
        let palette = parse_gpl(s).unwrap();

        assert_eq!(palette.len(), 3);
        assert_eq!(palette.resolve(0).unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(palette.resolve(1).unwrap(), Rgba([255, 128, 1, 255]));
        assert_eq!(palette.resolve(2).unwrap(), Rgba([12, 34, 56, 255]));
    }

    #[test]
    fn missing_magic() {
        assert!(parse_gpl("0 0 0\n").is_err());
        assert!(parse_gpl("").is_err());
    }

    #[test]
    fn bad_color() {
        assert!(parse_gpl("GIMP Palette\n0 0\n").is_err());
        assert!(parse_gpl("GIMP Palette\n256 0 0\n").is_err());
    }

    #[test]
    fn too_many_colors() {
        let s = std::iter::once("GIMP Palette".to_string())
            .chain((0..300).map(|i| format!("{} 0 0", i % 256)))
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(parse_gpl(&s).unwrap().len(), PALETTE_SIZE);
    }
}
