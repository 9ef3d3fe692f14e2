use super::Vec2;

/// Quadratic Bézier curve, used for stems
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadBezier {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl QuadBezier {
    pub fn new(start: Vec2, control: Vec2, end: Vec2) -> Self {
        Self { start, control, end }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0)
    pub fn point(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        self.start.scale(mt * mt) + self.control.scale(2.0 * mt * t) + self.end.scale(t * t)
    }

    /// First derivative at t (not normalized)
    pub fn tangent(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        (self.control - self.start).scale(2.0 * mt) + (self.end - self.control).scale(2.0 * t)
    }

    /// Sample `segments + 1` evenly spaced parameters across `[0, upto]`
    pub fn sample_params(segments: usize, upto: f64) -> impl Iterator<Item = f64> {
        let segments = segments.max(1);
        (0..=segments).map(move |i| (i as f64 / segments as f64) * upto)
    }

    /// Sample the curve up to `upto` with `segments` segments
    pub fn sample(&self, segments: usize, upto: f64) -> Vec<Vec2> {
        Self::sample_params(segments, upto)
            .map(|t| self.point(t))
            .collect()
    }
}

/// Cubic Bézier evaluation, used to inspect petal outlines
pub fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p1: Vec2, t: f64) -> Vec2 {
    let mt = 1.0 - t;
    p0.scale(mt * mt * mt)
        + c1.scale(3.0 * mt * mt * t)
        + c2.scale(3.0 * mt * t * t)
        + p1.scale(t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem() -> QuadBezier {
        QuadBezier::new(
            Vec2::new(100.0, 400.0),
            Vec2::new(112.0, 350.0),
            Vec2::new(106.0, 300.0),
        )
    }

    #[test]
    fn test_quad_endpoints() {
        let c = stem();
        assert_eq!(c.point(0.0), c.start);
        let end = c.point(1.0);
        assert!((end.x - c.end.x).abs() < 1e-9);
        assert!((end.y - c.end.y).abs() < 1e-9);
    }

    #[test]
    fn test_quad_tangent_at_ends() {
        let c = stem();
        let t0 = c.tangent(0.0);
        assert!((t0.x - 24.0).abs() < 1e-9);
        assert!((t0.y + 100.0).abs() < 1e-9);
        let t1 = c.tangent(1.0);
        assert!((t1.x + 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_tip_matches_direct_evaluation() {
        let c = stem();
        for reveal in [0.25, 0.6, 1.0] {
            let samples = c.sample(15, reveal);
            assert_eq!(samples.len(), 16);
            let last = samples[samples.len() - 1];
            let tip = c.point(reveal);
            assert!((last.x - tip.x).abs() < 1e-9);
            assert!((last.y - tip.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cubic_endpoints() {
        let p0 = Vec2::ZERO;
        let p1 = Vec2::new(0.0, 20.0);
        let a = cubic_point(p0, Vec2::new(-5.0, 6.0), Vec2::new(-3.0, 14.0), p1, 0.0);
        let b = cubic_point(p0, Vec2::new(-5.0, 6.0), Vec2::new(-3.0, 14.0), p1, 1.0);
        assert_eq!(a, p0);
        assert!((b.y - 20.0).abs() < 1e-9);
    }
}
