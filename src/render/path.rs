use crate::math::{Vec2, cubic_point};
use super::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { control: Vec2, to: Vec2 },
    CubicTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Close,
}

/// A single-contour outline built from line and curve segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub segments: Vec<Segment>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.segments.push(Segment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.segments.push(Segment::LineTo(p));
        self
    }

    pub fn quad_to(mut self, control: Vec2, to: Vec2) -> Self {
        self.segments.push(Segment::QuadTo { control, to });
        self
    }

    pub fn cubic_to(mut self, c1: Vec2, c2: Vec2, to: Vec2) -> Self {
        self.segments.push(Segment::CubicTo { c1, c2, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(Segment::Close);
        self
    }

    /// Build a closed polygon from points
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut outline = Self::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            outline = outline.move_to(*first);
            for p in iter {
                outline = outline.line_to(*p);
            }
            outline = outline.close();
        }
        outline
    }

    fn start(&self) -> Option<Vec2> {
        match self.segments.first() {
            Some(Segment::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    fn end(&self) -> Option<Vec2> {
        self.segments.iter().rev().find_map(|s| match s {
            Segment::MoveTo(p) | Segment::LineTo(p) => Some(*p),
            Segment::QuadTo { to, .. } | Segment::CubicTo { to, .. } => Some(*to),
            Segment::Close => None,
        })
    }

    /// Ends with an explicit close, or its last point returns to the start
    pub fn is_closed(&self) -> bool {
        if matches!(self.segments.last(), Some(Segment::Close)) {
            return self.start().is_some();
        }
        match (self.start(), self.end()) {
            (Some(a), Some(b)) => self.segments.len() > 1 && a.distance(&b) < 1e-9,
            _ => false,
        }
    }

    /// Approximate the outline with a polyline, `steps` points per curve
    pub fn flatten(&self, steps: usize) -> Vec<Vec2> {
        let steps = steps.max(1);
        let mut points = Vec::new();
        let mut cursor = Vec2::ZERO;
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) | Segment::LineTo(p) => {
                    points.push(p);
                    cursor = p;
                }
                Segment::QuadTo { control, to } => {
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        let mt = 1.0 - t;
                        points.push(cursor.scale(mt * mt) + control.scale(2.0 * mt * t) + to.scale(t * t));
                    }
                    cursor = to;
                }
                Segment::CubicTo { c1, c2, to } => {
                    for i in 1..=steps {
                        points.push(cubic_point(cursor, c1, c2, to, i as f64 / steps as f64));
                    }
                    cursor = to;
                }
                Segment::Close => {}
            }
        }
        points
    }

    /// Emit the outline as a fresh path on the surface
    pub fn trace(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => surface.move_to(p.x, p.y),
                Segment::LineTo(p) => surface.line_to(p.x, p.y),
                Segment::QuadTo { control, to } => {
                    surface.quadratic_curve_to(control.x, control.y, to.x, to.y)
                }
                Segment::CubicTo { c1, c2, to } => {
                    surface.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y)
                }
                Segment::Close => surface.close_path(),
            }
        }
    }

    pub fn fill(&self, surface: &mut dyn Surface, color: &str) {
        surface.set_fill_color(color);
        self.trace(surface);
        surface.fill();
    }
}
