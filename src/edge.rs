//! Outline segments in pixel space and nearest-point queries against them.

use crate::math::Polynomial;

/// Finds the `t` in `[0, 1]` minimizing a squared-distance polynomial by
/// running Newton's method on its derivative from a handful of seeds and
/// keeping the best candidate, endpoints included.
macro_rules! minimize_t {
    ($dist_sq:expr) => {{
        let dist_sq = $dist_sq;
        let deriv = dist_sq.derivative();
        let start = dist_sq.value(0.0);
        let end = dist_sq.value(1.0);
        let (mut best_sq, mut best_t) = if start < end { (start, 0.0) } else { (end, 1.0) };
        for seed in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let root = deriv.newtons_root(seed, 8);
            if (0.0..=1.0).contains(&root) {
                let candidate = dist_sq.value(root);
                if candidate < best_sq {
                    best_sq = candidate;
                    best_t = root;
                }
            }
        }
        best_t
    }};
}

#[derive(Clone, Copy, Debug)]
pub enum Segment {
    Line {
        start: (f32, f32),
        end: (f32, f32),
    },
    Quad {
        x: Polynomial<3>,
        y: Polynomial<3>,
    },
    Cubic {
        x: Polynomial<4>,
        y: Polynomial<4>,
    },
}

impl Segment {
    pub fn line(start: (f32, f32), end: (f32, f32)) -> Self {
        Self::Line { start, end }
    }

    pub fn quad(start: (f32, f32), ctrl: (f32, f32), end: (f32, f32)) -> Self {
        let basis = |s: f32, c: f32, e: f32| Polynomial {
            coeffs: [s, 2.0 * (c - s), s - 2.0 * c + e],
        };
        Self::Quad {
            x: basis(start.0, ctrl.0, end.0),
            y: basis(start.1, ctrl.1, end.1),
        }
    }

    pub fn cubic(
        start: (f32, f32),
        ctrl_start: (f32, f32),
        ctrl_end: (f32, f32),
        end: (f32, f32),
    ) -> Self {
        let basis = |s: f32, c1: f32, c2: f32, e: f32| Polynomial {
            coeffs: [
                s,
                3.0 * (c1 - s),
                3.0 * (s - 2.0 * c1 + c2),
                -s + 3.0 * c1 - 3.0 * c2 + e,
            ],
        };
        Self::Cubic {
            x: basis(start.0, ctrl_start.0, ctrl_end.0, end.0),
            y: basis(start.1, ctrl_start.1, ctrl_end.1, end.1),
        }
    }

    pub fn point(&self, t: f32) -> (f32, f32) {
        match self {
            Self::Line { start, end } => {
                let x = start.0 * (1.0 - t) + end.0 * t;
                let y = start.1 * (1.0 - t) + end.1 * t;
                (x, y)
            }
            Self::Quad { x, y } => (x.value(t), y.value(t)),
            Self::Cubic { x, y } => (x.value(t), y.value(t)),
        }
    }

    pub fn direction(&self, t: f32) -> (f32, f32) {
        match self {
            Self::Line { start, end } => (end.0 - start.0, end.1 - start.1),
            Self::Quad { x, y } => (x.derivative().value(t), y.derivative().value(t)),
            Self::Cubic { x, y } => (x.derivative().value(t), y.derivative().value(t)),
        }
    }

    pub fn nearest_t(&self, point: (f32, f32)) -> f32 {
        match self {
            Self::Line { start, end } => {
                let vx = end.0 - start.0;
                let vy = end.1 - start.1;
                let ux = point.0 - start.0;
                let uy = point.1 - start.1;
                let vv = vx * vx + vy * vy;
                if vv == 0.0 {
                    return 0.0;
                }
                let t = (vx * ux + vy * uy) / vv;
                t.clamp(0.0, 1.0)
            }
            Self::Quad { x, y } => {
                let mut dx = *x;
                let mut dy = *y;
                dx.coeffs[0] -= point.0;
                dy.coeffs[0] -= point.1;
                minimize_t!(dx.squared() + dy.squared())
            }
            Self::Cubic { x, y } => {
                let mut dx = *x;
                let mut dy = *y;
                dx.coeffs[0] -= point.0;
                dy.coeffs[0] -= point.1;
                minimize_t!(dx.squared() + dy.squared())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Segment;

    fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn line_projection_is_clamped() {
        let seg = Segment::line((0.0, 0.0), (10.0, 0.0));
        assert_eq!(seg.nearest_t((5.0, 3.0)), 0.5);
        assert_eq!(seg.nearest_t((-4.0, 1.0)), 0.0);
        assert_eq!(seg.nearest_t((15.0, 1.0)), 1.0);
    }

    #[test]
    fn quad_endpoints_and_midpoint() {
        let seg = Segment::quad((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        assert_eq!(seg.point(0.0), (0.0, 0.0));
        assert_eq!(seg.point(1.0), (2.0, 0.0));
        // apex of a symmetric parabola
        let (x, y) = seg.point(0.5);
        assert!((x - 1.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quad_nearest_point_above_apex() {
        let seg = Segment::quad((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        let t = seg.nearest_t((1.0, 5.0));
        let nearest = seg.point(t);
        assert!(dist(nearest, (1.0, 1.0)) < 1e-3);
    }

    #[test]
    fn cubic_straight_line_degenerates_cleanly() {
        // control points on the chord, so the cubic is the segment itself
        let seg = Segment::cubic((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
        let t = seg.nearest_t((0.0, 3.0));
        let nearest = seg.point(t);
        assert!(dist(nearest, (1.5, 1.5)) < 1e-2);
    }

    #[test]
    fn degenerate_line_does_not_produce_nan() {
        let seg = Segment::line((1.0, 1.0), (1.0, 1.0));
        assert_eq!(seg.nearest_t((4.0, 4.0)), 0.0);
    }
}
