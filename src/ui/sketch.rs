//! Line-art scene for the timeline hero.
//!
//! Two skylines, a ground line and a connector are drawn stroke by stroke
//! while a camera pans and zooms between them.  Everything here is plain
//! geometry in world units: x spans `0..2`, y spans `0..1` (up is positive).
//! [`scene`] turns a phase and its local progress into what to draw.

use crate::core::phase::Phase;

pub type Point = (f64, f64);

pub const GROUND: &[Point] = &[(0.0, 0.1), (0.95, 0.1)];

pub const SKYLINE_A: &[Point] = &[
    (0.05, 0.1),
    (0.05, 0.45),
    (0.15, 0.45),
    (0.15, 0.3),
    (0.25, 0.3),
    (0.25, 0.7),
    (0.3, 0.78),
    (0.35, 0.7),
    (0.35, 0.3),
    (0.45, 0.3),
    (0.45, 0.55),
    (0.55, 0.55),
    (0.55, 0.85),
    (0.6, 0.92),
    (0.65, 0.85),
    (0.65, 0.4),
    (0.75, 0.4),
    (0.75, 0.6),
    (0.85, 0.6),
    (0.85, 0.1),
];

pub const CONNECTOR: &[Point] = &[(0.9, 0.1), (1.0, 0.18), (1.1, 0.1)];

pub const SKYLINE_B: &[Point] = &[
    (1.05, 0.1),
    (1.05, 0.35),
    (1.2, 0.35),
    (1.2, 0.65),
    (1.3, 0.65),
    (1.3, 0.9),
    (1.35, 0.9),
    (1.35, 0.5),
    (1.5, 0.5),
    (1.5, 0.75),
    (1.6, 0.8),
    (1.7, 0.75),
    (1.7, 0.3),
    (1.85, 0.3),
    (1.85, 0.45),
    (1.95, 0.45),
    (1.95, 0.1),
];

/// Visible window onto the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub cx: f64,
    pub cy: f64,
    /// World width on screen.
    pub span: f64,
}

impl Camera {
    const CLOSE_A: Camera = Camera { cx: 0.5, cy: 0.5, span: 1.1 };
    const WIDE_A: Camera = Camera { cx: 0.8, cy: 0.5, span: 1.6 };
    const CLOSE_B: Camera = Camera { cx: 1.5, cy: 0.5, span: 1.1 };
    const BOTH: Camera = Camera { cx: 1.0, cy: 0.5, span: 2.2 };

    pub fn x_bounds(&self) -> [f64; 2] {
        [self.cx - self.span / 2.0, self.cx + self.span / 2.0]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let h = self.span * 0.85;
        [self.cy - h / 2.0, self.cy + h / 2.0]
    }

    fn lerp(self, to: Camera, t: f64) -> Camera {
        let t = smoothstep(t);
        Camera {
            cx: self.cx + (to.cx - self.cx) * t,
            cy: self.cy + (to.cy - self.cy) * t,
            span: self.span + (to.span - self.span) * t,
        }
    }
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// A polyline and how much of it (by length) is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub points: &'static [Point],
    pub drawn: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    /// Only strokes with something drawn.
    pub strokes: Vec<Stroke>,
}

pub fn scene(phase: Phase, t: f64) -> Scene {
    use Phase::*;
    let t = t.clamp(0.0, 1.0);
    let (camera, ground, a, connector, b) = match phase {
        Initial => (Camera::CLOSE_A, 0.0, 0.0, 0.0, 0.0),
        InitialLine => (Camera::CLOSE_A, t, 0.0, 0.0, 0.0),
        Drawing => (Camera::CLOSE_A, 1.0, t, 0.0, 0.0),
        ZoomOut => (Camera::CLOSE_A.lerp(Camera::WIDE_A, t), 1.0, 1.0, 0.0, 0.0),
        Connecting => (Camera::WIDE_A, 1.0, 1.0, t, 0.0),
        ZoomInEnd => (Camera::WIDE_A.lerp(Camera::CLOSE_B, t), 1.0, 1.0, 1.0, 0.0),
        Drawing2 => (Camera::CLOSE_B, 1.0, 1.0, 1.0, t),
        ZoomOutBoth => (Camera::CLOSE_B.lerp(Camera::BOTH, t), 1.0, 1.0, 1.0, 1.0),
        LogoReveal | LogoDocked => (Camera::BOTH, 1.0, 1.0, 1.0, 1.0),
    };

    let strokes = [(GROUND, ground), (SKYLINE_A, a), (CONNECTOR, connector), (SKYLINE_B, b)]
        .into_iter()
        .filter(|(_, drawn)| *drawn > 0.0)
        .map(|(points, drawn)| Stroke { points, drawn })
        .collect();
    Scene { camera, strokes }
}

fn distance(a: Point, b: Point) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Segments covering the first `drawn` fraction of the polyline's length.
/// The last segment is cut short where the pen currently is.
pub fn visible_segments(points: &[Point], drawn: f64) -> Vec<(Point, Point)> {
    let mut budget = polyline_length(points) * drawn.clamp(0.0, 1.0);
    let mut out = Vec::new();
    for w in points.windows(2) {
        if budget <= 0.0 {
            break;
        }
        let (a, b) = (w[0], w[1]);
        let len = distance(a, b);
        if len <= budget {
            out.push((a, b));
            budget -= len;
        } else {
            let f = budget / len;
            out.push((a, (a.0 + (b.0 - a.0) * f, a.1 + (b.1 - a.1) * f)));
            budget = 0.0;
        }
    }
    out
}
