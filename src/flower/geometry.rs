//! Procedural flower shapes
//!
//! Pure functions that turn morphology and animation state into outlines.
//! Coordinates follow the canvas convention: y grows downward, so stems
//! grow toward negative y.

use crate::math::{QuadBezier, Vec2};
use crate::render::Outline;

/// Segments used to sample the stem ribbon
pub const STEM_SEGMENTS: usize = 15;
/// Stem width at the tip, relative to the base
pub const STEM_TIP_RATIO: f64 = 0.4;
/// Drop distance of a falling seed
pub const SEED_DROP: f64 = 20.0;

const WIND_SPEED: f64 = 0.0008;
const MIN_TANGENT: f64 = 1e-9;

/// Oat-grain seed outline centered on the origin
pub fn seed_outline() -> Outline {
    Outline::new()
        .move_to(Vec2::new(0.0, -10.0))
        .quad_to(Vec2::new(4.4, 0.0), Vec2::new(0.0, 10.0))
        .quad_to(Vec2::new(-4.4, 0.0), Vec2::new(0.0, -10.0))
}

/// Groove down the middle of the seed
pub fn seed_crease() -> (Vec2, Vec2) {
    (Vec2::new(0.0, -7.0), Vec2::new(0.0, 7.0))
}

/// Two layered sine waves: a slow primary gust plus a faster flutter at
/// half strength. Roughly in `[-1.5, 1.5]`.
pub fn wind_force(now: f64, x: f64, wind_phase: f64) -> f64 {
    let t = now * WIND_SPEED;
    let base = (t + x * 0.002 + wind_phase).sin();
    let secondary = (t * 2.5 + x * 0.01).sin() * 0.5;
    base + secondary
}

/// Tall flowers sway more
pub fn sway_sensitivity(final_height: f64) -> f64 {
    final_height.powf(1.5) / 100.0
}

/// Stem curve from the ground point up to the final tip
pub fn stem_curve(ground: Vec2, final_height: f64, control_offset: f64, sway: f64) -> QuadBezier {
    QuadBezier::new(
        ground,
        Vec2::new(ground.x + control_offset + sway * 0.4, ground.y - final_height * 0.5),
        Vec2::new(ground.x + control_offset * 0.6 + sway, ground.y - final_height),
    )
}

/// Stem width at the ground
pub fn stem_base_width(final_height: f64, total_scale: f64) -> f64 {
    (4.0 + final_height / 40.0) * total_scale
}

/// Tapered ribbon around the stem curve, up to `reveal`.
///
/// Returns a closed polygon: the left edge walking up, then the right edge
/// walking back down. A degenerate tangent reuses the previous normal.
pub fn stem_ribbon(curve: &QuadBezier, reveal: f64, segments: usize, base_width: f64) -> Vec<Vec2> {
    let tip_width = base_width * STEM_TIP_RATIO;
    let mut left = Vec::with_capacity(segments + 1);
    let mut right = Vec::with_capacity(segments + 1);
    let mut normal = Vec2::RIGHT;

    for t in QuadBezier::sample_params(segments, reveal) {
        if t > 1.0 {
            break;
        }
        let p = curve.point(t);
        let tangent = curve.tangent(t);
        let len = tangent.length();
        if len > MIN_TANGENT {
            normal = tangent.perpendicular().scale(1.0 / len);
        }

        let half = (base_width - (base_width - tip_width) * t) / 2.0;
        left.push(p + normal.scale(half));
        right.push(p - normal.scale(half));
    }

    left.extend(right.into_iter().rev());
    left
}

/// Leaf blade in local space, pointing along +x
pub fn leaf_outline(length: f64, width: f64) -> Outline {
    Outline::new()
        .move_to(Vec2::ZERO)
        .quad_to(Vec2::new(length * 0.4, -width), Vec2::new(length, -width * 0.2))
        .quad_to(Vec2::new(length * 0.4, width * 0.6), Vec2::ZERO)
}

/// Leaf rotation in degrees: the stored angle mirrored by side, bent by
/// how far the stem leans
pub fn leaf_angle(angle: f64, side: f64, stem_bend: f64) -> f64 {
    let base = if side > 0.0 { -angle } else { 180.0 + angle };
    base + stem_bend
}

/// Leaf bend in degrees for a given control point lean
pub fn stem_bend(curve: &QuadBezier) -> f64 {
    ((curve.control.x - curve.start.x) / 20.0) * 15.0
}

/// Petal in local space, pointing along +y from the bloom center.
///
/// `profile` fixes the silhouette: higher values taper the tip earlier
/// and pinch the outer half.
pub fn petal_outline(length: f64, width: f64, offset: f64, profile: f64) -> Outline {
    let tip_taper = 0.5 + profile * 0.4;
    let base_bulge = 0.3 + (1.0 - profile) * 0.2;
    let narrow = 1.0 - profile * 0.6;

    Outline::new()
        .move_to(Vec2::ZERO)
        .cubic_to(
            Vec2::new(-width, offset + length * base_bulge),
            Vec2::new(-width * narrow, offset + length * tip_taper),
            Vec2::new(0.0, offset + length),
        )
        .cubic_to(
            Vec2::new(width * narrow, offset + length * tip_taper),
            Vec2::new(width, offset + length * base_bulge),
            Vec2::ZERO,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn straight_stem() -> QuadBezier {
        stem_curve(Vec2::new(200.0, 500.0), 100.0, 0.0, 0.0)
    }

    #[test]
    fn test_seed_outline_closed() {
        assert!(seed_outline().is_closed());
    }

    #[test]
    fn test_stem_curve_reaches_height() {
        let c = stem_curve(Vec2::new(10.0, 300.0), 120.0, 20.0, 5.0);
        assert_eq!(c.start, Vec2::new(10.0, 300.0));
        assert!((c.end.y - 180.0).abs() < 1e-9);
        assert!((c.end.x - (10.0 + 12.0 + 5.0)).abs() < 1e-9);
        assert!((c.control.x - (10.0 + 20.0 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_ribbon_tapers() {
        let curve = straight_stem();
        let base = stem_base_width(100.0, 1.0);
        let pts = stem_ribbon(&curve, 1.0, STEM_SEGMENTS, base);
        assert_eq!(pts.len(), 2 * (STEM_SEGMENTS + 1));

        let n = STEM_SEGMENTS + 1;
        // Straight vertical stem: left/right edges are offset in x only
        let base_span = pts[0].distance(&pts[2 * n - 1]);
        let tip_span = pts[n - 1].distance(&pts[n]);
        assert!((base_span - base).abs() < 1e-9);
        assert!((tip_span - base * STEM_TIP_RATIO).abs() < 1e-9);
    }

    #[test]
    fn test_ribbon_follows_reveal() {
        let curve = straight_stem();
        let pts = stem_ribbon(&curve, 0.5, STEM_SEGMENTS, 6.0);
        let top = pts[STEM_SEGMENTS];
        let mid = curve.point(0.5);
        assert!((top.y - mid.y).abs() < 1e-9);
    }

    #[test]
    fn test_ribbon_degenerate_tangent_is_finite() {
        // Control point on top of the start and end: zero tangent everywhere
        let p = Vec2::new(50.0, 50.0);
        let curve = QuadBezier::new(p, p, p);
        let pts = stem_ribbon(&curve, 1.0, STEM_SEGMENTS, 5.0);
        assert!(pts.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
        assert!((pts[0].x - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_ribbon_zero_reveal_collapses() {
        let curve = straight_stem();
        let pts = stem_ribbon(&curve, 0.0, STEM_SEGMENTS, 5.0);
        // Every sample sits at the ground point
        assert!(pts.iter().all(|v| (v.y - 500.0).abs() < 1e-9));
    }

    #[test]
    fn test_leaf_outline_closed() {
        let leaf = leaf_outline(20.0, 7.0);
        assert!(leaf.is_closed());
        let far = leaf.flatten(10).iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((far - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_leaf_angle_mirrors_by_side() {
        assert_eq!(leaf_angle(45.0, 1.0, 0.0), -45.0);
        assert_eq!(leaf_angle(45.0, -1.0, 0.0), 225.0);
        assert_eq!(leaf_angle(45.0, 1.0, 7.5), -37.5);
    }

    #[test]
    fn test_petal_outline_closed_and_long() {
        for profile in [0.0, 0.5, 0.99] {
            let petal = petal_outline(25.0, 8.0, 2.0, profile);
            assert!(petal.is_closed());
            let reach = petal.flatten(16).iter().map(|p| p.y).fold(f64::MIN, f64::max);
            assert!((reach - 27.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_petal_symmetric() {
        let pts = petal_outline(20.0, 6.0, 0.0, 0.3).flatten(8);
        // Second half mirrors the first
        let left_min = pts.iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let right_max = pts.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((left_min + right_max).abs() < 1e-9);
    }

    #[test]
    fn test_wind_bounded() {
        for i in 0..500 {
            let w = wind_force(i as f64 * 37.0, 120.0, PI / 3.0);
            assert!(w.abs() <= 1.5 + 1e-9);
        }
    }

    #[test]
    fn test_taller_sways_more() {
        assert!(sway_sensitivity(150.0) > sway_sensitivity(40.0));
        assert!((sway_sensitivity(100.0) - 10.0).abs() < 1e-9);
    }
}
