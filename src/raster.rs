//! Per-glyph SDF rasterization over `ttf-parser` outlines.
//!
//! Each supported codepoint is rendered to a tight single-channel bitmap
//! where every byte encodes the signed pixel distance to the glyph outline,
//! remapped so `onedge_value` lands exactly on the boundary and values grow
//! toward the inside of the glyph.

use ttf_parser::Face;

use crate::edge::Segment;

/// One rasterized glyph: the tight ink-plus-padding region and its placement
/// relative to the pen origin.
#[derive(Clone, Debug)]
pub struct GlyphBitmap {
    /// Row-major, one byte per pixel, `width * height` long.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Horizontal offset of the bitmap's left edge from the pen origin.
    pub x_offset: i32,
    /// Vertical offset of the bitmap's top edge from the baseline, y-down
    /// (negative for any glyph with ink above the baseline).
    pub y_offset: i32,
}

/// Collects a glyph outline as curve segments scaled into pixel space
/// (y-up), grouped per contour so tangent lookups never cross a contour
/// boundary.
struct Contours {
    scale: f32,
    closed: Vec<Vec<Segment>>,
    current: Vec<Segment>,
    first: (f32, f32),
    cursor: (f32, f32),
}

impl Contours {
    fn new(scale: f32) -> Self {
        Self {
            scale,
            closed: Vec::new(),
            current: Vec::new(),
            first: (0.0, 0.0),
            cursor: (0.0, 0.0),
        }
    }

    fn scaled(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale, y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for Contours {
    fn move_to(&mut self, x: f32, y: f32) {
        self.first = self.scaled(x, y);
        self.cursor = self.first;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.scaled(x, y);
        if to != self.cursor {
            self.current.push(Segment::line(self.cursor, to));
        }
        self.cursor = to;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ctrl = self.scaled(x1, y1);
        let to = self.scaled(x, y);
        self.current.push(Segment::quad(self.cursor, ctrl, to));
        self.cursor = to;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let ctrl_start = self.scaled(x1, y1);
        let ctrl_end = self.scaled(x2, y2);
        let to = self.scaled(x, y);
        self.current
            .push(Segment::cubic(self.cursor, ctrl_start, ctrl_end, to));
        self.cursor = to;
    }

    fn close(&mut self) {
        if self.cursor != self.first {
            self.current.push(Segment::line(self.cursor, self.first));
        }
        if !self.current.is_empty() {
            self.closed.push(std::mem::take(&mut self.current));
        }
        self.cursor = self.first;
    }
}

/// Rasterizes one codepoint to a signed-distance bitmap.
///
/// Returns `None` when the face has no outline for the codepoint (control
/// characters, space in some fonts); callers are expected to leave the
/// corresponding atlas cell blank.
pub fn rasterize_sdf(
    face: &Face<'_>,
    scale: f32,
    codepoint: char,
    padding: i32,
    onedge_value: f32,
    dist_scale: f32,
) -> Option<GlyphBitmap> {
    let glyph_id = face.glyph_index(codepoint)?;
    let mut outline = Contours::new(scale);
    let bbox = face.outline_glyph(glyph_id, &mut outline)?;
    if outline.closed.is_empty() {
        return None;
    }

    // pixel bounds of the ink, extended by the padding on every side
    let x0 = (f32::from(bbox.x_min) * scale).floor() as i32 - padding;
    let x1 = (f32::from(bbox.x_max) * scale).ceil() as i32 + padding;
    let y0 = (f32::from(bbox.y_min) * scale).floor() as i32 - padding;
    let y1 = (f32::from(bbox.y_max) * scale).ceil() as i32 + padding;
    let width = (x1 - x0) as u32;
    let height = (y1 - y0) as u32;

    let mut pixels = vec![0; width as usize * height as usize];
    for row in 0..height {
        let py = y1 as f32 - (row as f32 + 0.5);
        for col in 0..width {
            let px = x0 as f32 + col as f32 + 0.5;
            pixels[row as usize * width as usize + col as usize] =
                sample(&outline.closed, (px, py), onedge_value, dist_scale);
        }
    }
    Some(GlyphBitmap {
        pixels,
        width,
        height,
        x_offset: x0,
        y_offset: -y1,
    })
}

/// Signed distance at one sample point, encoded as a byte.
fn sample(contours: &[Vec<Segment>], point: (f32, f32), onedge_value: f32, dist_scale: f32) -> u8 {
    let mut nearest = None;
    let mut nearest_sq = f32::INFINITY;
    for (ci, contour) in contours.iter().enumerate() {
        for (si, segment) in contour.iter().enumerate() {
            let t = segment.nearest_t(point);
            let (cx, cy) = segment.point(t);
            let dist_sq = (cx - point.0).powi(2) + (cy - point.1).powi(2);
            if dist_sq < nearest_sq {
                nearest_sq = dist_sq;
                nearest = Some((ci, si, t));
            }
        }
    }
    let Some((ci, si, t)) = nearest else { return 0 };
    let contour = &contours[ci];
    let segment = &contour[si];
    let (cx, cy) = segment.point(t);
    // the tangent at a joint between two segments is ambiguous, so average
    // the normalized directions on both sides of the corner
    let (dx, dy) = if t == 0.0 {
        let prev = &contour[(si + contour.len() - 1) % contour.len()];
        blend(prev.direction(1.0), segment.direction(t))
    } else if t == 1.0 {
        let next = &contour[(si + 1) % contour.len()];
        blend(segment.direction(t), next.direction(0.0))
    } else {
        segment.direction(t)
    };
    // TrueType outer contours wind clockwise in y-up coordinates, putting
    // the filled side on the right of the direction of travel
    let side = (dx * (point.1 - cy) - dy * (point.0 - cx)).signum();
    let dist = nearest_sq.sqrt();
    (onedge_value - side * dist * dist_scale).clamp(0.0, 255.0) as u8
}

fn blend(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    let a_len = (a.0.powi(2) + a.1.powi(2)).sqrt();
    let b_len = (b.0.powi(2) + b.1.powi(2)).sqrt();
    (a.0 / a_len + b.0 / b_len, a.1 / a_len + b.1 / b_len)
}

#[cfg(test)]
mod tests {
    use super::sample;
    use crate::edge::Segment;

    const ONEDGE: f32 = 128.0;
    const DIST_SCALE: f32 = 10.0;

    /// 10x10 square wound clockwise in y-up coordinates (a TrueType outer
    /// contour).
    fn square() -> Vec<Vec<Segment>> {
        let corners = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];
        let sides = (0..4)
            .map(|i| Segment::line(corners[i], corners[(i + 1) % 4]))
            .collect();
        vec![sides]
    }

    #[test]
    fn inside_is_brighter_than_onedge() {
        let value = sample(&square(), (5.0, 5.0), ONEDGE, DIST_SCALE);
        assert_eq!(value, (ONEDGE + 5.0 * DIST_SCALE) as u8);
    }

    #[test]
    fn outside_is_darker_than_onedge() {
        let value = sample(&square(), (12.0, 5.0), ONEDGE, DIST_SCALE);
        assert_eq!(value, (ONEDGE - 2.0 * DIST_SCALE) as u8);
    }

    #[test]
    fn boundary_maps_to_onedge() {
        let value = sample(&square(), (0.0, 5.0), ONEDGE, DIST_SCALE);
        assert_eq!(value, ONEDGE as u8);
    }

    #[test]
    fn corner_sign_is_resolved_by_blending() {
        // diagonally outside the (10, 10) corner, nearest point is the
        // corner itself where both adjacent tangents disagree
        let value = sample(&square(), (12.0, 12.0), ONEDGE, DIST_SCALE);
        assert!(value < ONEDGE as u8);
    }

    #[test]
    fn distances_clamp_to_byte_range() {
        assert_eq!(sample(&square(), (5.0, 5.0), ONEDGE, 100.0), 255);
        assert_eq!(sample(&square(), (40.0, 5.0), ONEDGE, 100.0), 0);
    }

    #[test]
    fn no_contours_reads_as_far_outside() {
        assert_eq!(sample(&[], (0.0, 0.0), ONEDGE, DIST_SCALE), 0);
    }
}
