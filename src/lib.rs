pub extern crate ttf_parser;

mod atlas;
mod edge;
mod math;
mod raster;

use ttf_parser::Face;

pub use crate::{
    atlas::{composite, measure_cells, Bitmap, CellGeometry},
    raster::{rasterize_sdf, GlyphBitmap},
};

/// First codepoint of the supported range; codepoint `c` occupies cell
/// `c - FIRST_CODEPOINT`.
pub const FIRST_CODEPOINT: u32 = '!' as u32;

/// The printable ASCII range the atlas covers, in cell order. Space is
/// excluded because it yields unusable metrics in some fonts.
pub fn printable_ascii() -> impl Clone + Iterator<Item = char> {
    (b'!'..=b'~').map(char::from)
}

#[derive(Clone, Copy, Debug)]
pub enum Error {
    InvalidFontSize,
    InvalidPadding,
    InvalidOnEdgeValue,
    /// No codepoint in the range produced any visible ink.
    EmptyGlyphSet,
    /// A glyph's computed placement escapes its cell; compositing refuses
    /// to clip or write out of bounds.
    GlyphOutOfCell { cell: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFontSize => write!(f, "Invalid font size"),
            Self::InvalidPadding => write!(f, "Invalid padding value"),
            Self::InvalidOnEdgeValue => write!(f, "Invalid on-edge value"),
            Self::EmptyGlyphSet => {
                write!(f, "no codepoint in the range produced a visible glyph")
            }
            Self::GlyphOutOfCell { cell } => {
                write!(f, "glyph placement escapes the bounds of cell {cell}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Immutable run configuration, validated once before any glyph is touched.
#[derive(Clone, Copy, Debug)]
pub struct Params {
    pub pixel_height: f32,
    pub padding: f32,
    pub onedge_value: f32,
}

impl Params {
    pub fn new(pixel_height: f32, padding: f32, onedge_value: f32) -> Result<Self, Error> {
        if !(pixel_height > 0.0) {
            return Err(Error::InvalidFontSize);
        }
        if !(padding >= 0.0) {
            return Err(Error::InvalidPadding);
        }
        if !(0.0..=255.0).contains(&onedge_value) {
            return Err(Error::InvalidOnEdgeValue);
        }
        Ok(Self {
            pixel_height,
            padding,
            onedge_value,
        })
    }

    /// Distance-to-byte slope, `onedge_value / padding`. A zero padding
    /// yields a hard-edged field instead of a division by zero.
    pub fn dist_scale(&self) -> f32 {
        if self.padding > 0.0 {
            self.onedge_value / self.padding
        } else {
            0.0
        }
    }

    /// The padding in whole pixels, as the rasterizer and compositor
    /// consume it.
    pub fn padding_pixels(&self) -> i32 {
        self.padding as i32
    }
}

/// A finished atlas: the pixel payload plus the measurements a text
/// renderer needs to compute UV rectangles and pen advances at runtime.
#[derive(Clone, Debug)]
pub struct MonoAtlas {
    pub image: Bitmap,
    pub cells: CellGeometry,
}

/// Runs the whole pipeline for one face: rasterize every codepoint in the
/// printable ASCII range, measure the common cell, composite the strip.
///
/// Codepoints without an outline are logged and leave their cell blank;
/// the run only fails if *no* codepoint produced ink.
pub fn build_atlas(face: &Face<'_>, params: &Params) -> Result<MonoAtlas, Error> {
    let scale = params.pixel_height / f32::from(face.height());
    let padding = params.padding_pixels();
    let dist_scale = params.dist_scale();
    let glyphs: Vec<Option<GlyphBitmap>> = printable_ascii()
        .map(|codepoint| {
            let bitmap = raster::rasterize_sdf(
                face,
                scale,
                codepoint,
                padding,
                params.onedge_value,
                dist_scale,
            );
            if bitmap.is_none() {
                log::warn!("no outline for {codepoint:?}, leaving its cell blank");
            }
            bitmap
        })
        .collect();
    let cells = atlas::measure_cells(&glyphs)?;
    let image = atlas::composite(&cells, &glyphs, padding)?;
    Ok(MonoAtlas { image, cells })
}

#[cfg(test)]
mod tests {
    use super::{printable_ascii, Error, Params, FIRST_CODEPOINT};

    #[test]
    fn range_covers_ninety_four_codepoints() {
        let range: Vec<char> = printable_ascii().collect();
        assert_eq!(range.len(), 94);
        assert_eq!(range.first(), Some(&'!'));
        assert_eq!(range.last(), Some(&'~'));
        assert!(!range.contains(&' '));
        for (index, ch) in range.iter().enumerate() {
            assert_eq!(*ch as u32 - FIRST_CODEPOINT, index as u32);
        }
    }

    #[test]
    fn params_reject_out_of_range_values() {
        assert!(matches!(
            Params::new(0.0, 5.0, 180.0),
            Err(Error::InvalidFontSize)
        ));
        assert!(matches!(
            Params::new(f32::NAN, 5.0, 180.0),
            Err(Error::InvalidFontSize)
        ));
        assert!(matches!(
            Params::new(22.0, -1.0, 180.0),
            Err(Error::InvalidPadding)
        ));
        assert!(matches!(
            Params::new(22.0, 5.0, 256.0),
            Err(Error::InvalidOnEdgeValue)
        ));
        assert!(matches!(
            Params::new(22.0, 5.0, -0.5),
            Err(Error::InvalidOnEdgeValue)
        ));
        assert!(Params::new(22.0, 5.0, 180.0).is_ok());
    }

    #[test]
    fn dist_scale_handles_zero_padding() {
        let params = Params::new(22.0, 5.0, 180.0).unwrap();
        assert_eq!(params.dist_scale(), 36.0);
        let hard_edge = Params::new(22.0, 0.0, 180.0).unwrap();
        assert_eq!(hard_edge.dist_scale(), 0.0);
    }
}
