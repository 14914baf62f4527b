use image::Rgba;

use crate::error::Dc6Error;

/// Number of colors the format assumes a palette holds.
pub const PALETTE_SIZE: usize = 256;

/// Ordered color table that palette indices resolve against.
///
/// Palettes are never mutated in place. A sprite set replaces its palette
/// wholesale, so the same table can be shared between clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dc6Palette(Vec<Rgba<u8>>);

impl Dc6Palette {
    /// Keeps at most [`PALETTE_SIZE`] colors.
    pub fn new(mut colors: Vec<Rgba<u8>>) -> Self {
        if colors.len() > PALETTE_SIZE {
            log::warn!(
                "palette has {} colors, dropping everything after {PALETTE_SIZE}",
                colors.len()
            );

            colors.truncate(PALETTE_SIZE);
        }

        Self(colors)
    }

    /// Opaque colors from RGB triplets.
    pub fn from_rgb(colors: &[[u8; 3]]) -> Self {
        Self::new(
            colors
                .iter()
                .map(|&[r, g, b]| Rgba([r, g, b, u8::MAX]))
                .collect(),
        )
    }

    /// Index `i` maps to `(i, i, i, 255)`.
    pub fn grayscale() -> Self {
        Self(
            (0..PALETTE_SIZE)
                .map(|i| Rgba([i as u8, i as u8, i as u8, u8::MAX]))
                .collect(),
        )
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn resolve(&self, index: u8) -> Result<Rgba<u8>, Dc6Error> {
        self.0
            .get(index as usize)
            .copied()
            .ok_or(Dc6Error::PaletteIndexOutOfRange {
                index,
                palette_len: self.0.len(),
            })
    }
}

/// Resolves against `palette`, or against the grayscale default when there is none.
pub fn resolve(index: u8, palette: Option<&Dc6Palette>) -> Result<Rgba<u8>, Dc6Error> {
    match palette {
        Some(palette) => palette.resolve(index),
        None => Ok(Rgba([index, index, index, u8::MAX])),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn grayscale_is_deterministic() {
        let palette = Dc6Palette::grayscale();

        assert_eq!(palette.len(), PALETTE_SIZE);

        for i in 0..=u8::MAX {
            assert_eq!(palette.resolve(i).unwrap(), Rgba([i, i, i, 255]));
            assert_eq!(resolve(i, None).unwrap(), Rgba([i, i, i, 255]));
        }
    }

    #[test]
    fn short_palette_fails_only_out_of_range() {
        let palette = Dc6Palette::from_rgb(&[[255, 0, 0], [0, 255, 0]]);

        assert_eq!(resolve(1, Some(&palette)).unwrap(), Rgba([0, 255, 0, 255]));

        let err = resolve(2, Some(&palette)).unwrap_err();
        assert!(matches!(
            err,
            Dc6Error::PaletteIndexOutOfRange {
                index: 2,
                palette_len: 2
            }
        ));
    }

    #[test]
    fn oversized_palette_is_truncated() {
        let palette = Dc6Palette::new(vec![Rgba([1, 2, 3, 4]); 300]);

        assert_eq!(palette.len(), PALETTE_SIZE);
    }
}
