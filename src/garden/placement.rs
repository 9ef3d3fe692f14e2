//! Where new flowers go and how big they get

use rand::Rng;

use crate::config::Placement;
use crate::flower::Flower;
use crate::math::{clamp, Vec2};

/// Size factor for a flower planted at `point`.
///
/// Only the most recent `density_window` flowers are considered. Crowded
/// spots get `crowded_scale`, open ground gets 1.0, and the scale ramps
/// linearly in between.
pub fn density_modifier(flowers: &[Flower], point: Vec2, rules: &Placement) -> f64 {
    let start = flowers.len().saturating_sub(rules.density_window);
    let nearest = flowers[start..]
        .iter()
        .map(|f| f.position.distance(&point))
        .fold(f64::INFINITY, f64::min);

    if nearest.is_infinite() || nearest > rules.far_distance {
        return 1.0;
    }
    if nearest < rules.near_distance {
        return rules.crowded_scale;
    }

    let span = rules.far_distance - rules.near_distance;
    if span <= 0.0 {
        return 1.0;
    }
    let t = (nearest - rules.near_distance) / span;
    clamp(rules.crowded_scale + t * (1.0 - rules.crowded_scale), rules.crowded_scale, 1.0)
}

/// Planting points for one request: the tapped point, sometimes followed
/// by a companion shifted sideways
pub fn plant_points<R: Rng + ?Sized>(point: Vec2, rules: &Placement, rng: &mut R) -> Vec<Vec2> {
    let mut points = vec![point];
    if rng.gen::<f64>() < rules.pair_chance {
        let offset = (rng.gen::<f64>() - 0.5) * rules.pair_spread;
        points.push(Vec2::new(point.x + offset, point.y));
    }
    points
}
