//! Cell measurement and atlas compositing.
//!
//! The atlas is a monospace strip: one fixed-size cell per codepoint, laid
//! out left to right in ascending codepoint order, so a renderer can find a
//! glyph's UV rectangle from its index alone.

use crate::{raster::GlyphBitmap, Error};

/// A bounds-checked 2D view over a flat, row-major, single-channel buffer.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocates a zero-filled bitmap; zero reads as "far outside" in SDF
    /// terms, so untouched pixels are already correct.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Copies `src` so its top-left corner lands at `(x, y)`. Row slicing
    /// panics if the region escapes the buffer; callers validate placement
    /// first.
    fn blit(&mut self, src: &GlyphBitmap, x: u32, y: u32) {
        let src_width = src.width as usize;
        for row in 0..src.height as usize {
            let src_start = row * src_width;
            let dst_start = (y as usize + row) * self.width as usize + x as usize;
            self.data[dst_start..dst_start + src_width]
                .copy_from_slice(&src.pixels[src_start..src_start + src_width]);
        }
    }
}

/// The shared cell rectangle and baseline covering every glyph's extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellGeometry {
    pub cell_width: u32,
    pub cell_height: u32,
    /// Rows from a cell's top edge down to the glyph origin.
    pub baseline: i32,
    pub glyph_count: u32,
    /// Leftmost bitmap offset seen across the set, the common horizontal
    /// anchor.
    pub min_x: i32,
}

/// Scans every glyph bitmap and produces the tightest cell that holds all
/// of them without clipping, plus the baseline they share.
///
/// Slots that are `None` or zero-sized contribute nothing to the bounds.
/// A set with no visible ink at all has no renderable atlas and is an
/// input error.
pub fn measure_cells(glyphs: &[Option<GlyphBitmap>]) -> Result<CellGeometry, Error> {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    for glyph in glyphs.iter().flatten() {
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        min_x = min_x.min(glyph.x_offset);
        min_y = min_y.min(glyph.y_offset);
        max_x = max_x.max(glyph.x_offset + glyph.width as i32);
        max_y = max_y.max(glyph.y_offset + glyph.height as i32);
    }
    if min_x > max_x || min_y > max_y {
        return Err(Error::EmptyGlyphSet);
    }
    Ok(CellGeometry {
        cell_width: (max_x - min_x) as u32,
        cell_height: (max_y - min_y) as u32,
        baseline: -min_y,
        glyph_count: glyphs.len() as u32,
        min_x,
    })
}

/// Copies every glyph into its cell of a freshly allocated atlas.
///
/// Cell `i` spans columns `[i * cell_width, (i + 1) * cell_width)`; within
/// it a glyph sits at `padding + x_offset` from the cell's left edge and
/// `baseline + y_offset` from its top, which lines every glyph up on one
/// baseline row and one nominal pen position. A placement that would escape
/// its cell is a hard error, never a silent clip.
pub fn composite(
    cells: &CellGeometry,
    glyphs: &[Option<GlyphBitmap>],
    padding: i32,
) -> Result<Bitmap, Error> {
    debug_assert_eq!(glyphs.len() as u32, cells.glyph_count);
    let mut atlas = Bitmap::new(cells.cell_width * cells.glyph_count, cells.cell_height);
    for (index, glyph) in glyphs.iter().enumerate() {
        let Some(glyph) = glyph else { continue };
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let x = padding + glyph.x_offset;
        let y = cells.baseline + glyph.y_offset;
        let fits = x >= 0
            && y >= 0
            && x + glyph.width as i32 <= cells.cell_width as i32
            && y + glyph.height as i32 <= cells.cell_height as i32;
        if !fits {
            return Err(Error::GlyphOutOfCell { cell: index });
        }
        let cell_origin = index as u32 * cells.cell_width;
        atlas.blit(glyph, cell_origin + x as u32, y as u32);
    }
    Ok(atlas)
}
