use rand::Rng;
use std::f64::consts::TAU;

use crate::math::{pick, random_int, random_range, random_sign};

/// Bounds for randomized flower shapes
pub mod ranges {
    pub const FINAL_HEIGHT: (f64, f64) = (35.0, 170.0);
    pub const INTRINSIC_SCALE: (f64, f64) = (0.5, 1.5);
    pub const STEM_CONTROL_OFFSET: (f64, f64) = (-25.0, 25.0);
    pub const PETAL_COUNT: (i32, i32) = (6, 14);
    pub const TILT: (f64, f64) = (0.3, 0.9);
    pub const SEED_ROTATION: (f64, f64) = (-0.8, 0.8);
    pub const PETAL_LENGTH: (f64, f64) = (15.0, 30.0);
    pub const PETAL_WIDTH: (f64, f64) = (4.0, 11.0);
    pub const PETAL_JITTER: (f64, f64) = (-0.3, 0.3);
    /// Flowers taller than this grow more leaves
    pub const TALL_FLOWER: f64 = 100.0;
    pub const LEAVES_TALL: (i32, i32) = (3, 5);
    pub const LEAVES_SHORT: (i32, i32) = (2, 3);
    pub const LEAF_HEIGHT_FRACTION: (f64, f64) = (0.1, 0.7);
    pub const LEAF_LENGTH: (f64, f64) = (12.0, 28.0);
    pub const LEAF_ANGLE: (f64, f64) = (30.0, 80.0);
    pub const LEAF_WIDTH: (f64, f64) = (5.0, 10.0);
}

/// A leaf attached along the stem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf {
    /// Attachment point as a fraction of stem height
    pub height_fraction: f64,
    /// `1.0` grows to the right, `-1.0` to the left
    pub side: f64,
    pub length: f64,
    /// Angle away from horizontal, in degrees
    pub angle: f64,
    pub width: f64,
}

/// The fixed shape of one flower, chosen at planting time
#[derive(Debug, Clone, PartialEq)]
pub struct Morphology {
    pub final_height: f64,
    /// Per-flower size variation, multiplied with the density scale
    pub intrinsic_scale: f64,
    /// Lateral bias of the stem's control point
    pub stem_control_offset: f64,
    pub petal_count: usize,
    pub max_petal_length: f64,
    pub max_petal_width: f64,
    /// Petal rotation around the bloom center, radians
    pub petal_angles: Vec<f64>,
    pub leaves: Vec<Leaf>,
    /// Vertical squash of the bloom, fakes perspective
    pub tilt: f64,
    /// 0.0 = broad rounded petals, 1.0 = narrow pointed petals
    pub petal_shape_profile: f64,
    /// Offset into the wind cycle
    pub wind_phase: f64,
    pub petal_color: String,
    /// Angle of the seed as it falls
    pub seed_rotation: f64,
}

impl Morphology {
    /// Roll a new flower shape. Sizes scale by `density_scale * intrinsic_scale`.
    pub fn generate<R: Rng + ?Sized>(density_scale: f64, palette: &[String], rng: &mut R) -> Self {
        use ranges::*;

        let petal_color = pick(rng, palette)
            .cloned()
            .unwrap_or_else(|| "#FFFFFF".to_string());

        let final_height = random_range(rng, FINAL_HEIGHT.0, FINAL_HEIGHT.1);
        let intrinsic_scale = random_range(rng, INTRINSIC_SCALE.0, INTRINSIC_SCALE.1);
        let total_scale = density_scale * intrinsic_scale;

        let stem_control_offset = random_range(rng, STEM_CONTROL_OFFSET.0, STEM_CONTROL_OFFSET.1);
        let petal_count = random_int(rng, PETAL_COUNT.0, PETAL_COUNT.1) as usize;
        let tilt = random_range(rng, TILT.0, TILT.1);
        let petal_shape_profile = rng.gen::<f64>();
        let wind_phase = rng.gen::<f64>() * TAU;
        let seed_rotation = random_range(rng, SEED_ROTATION.0, SEED_ROTATION.1);

        let max_petal_length = random_range(rng, PETAL_LENGTH.0, PETAL_LENGTH.1) * total_scale;
        let max_petal_width = random_range(rng, PETAL_WIDTH.0, PETAL_WIDTH.1) * total_scale;

        // Evenly spaced with jitter so neighbouring flowers never line up
        let step = TAU / petal_count as f64;
        let petal_angles = (0..petal_count)
            .map(|i| i as f64 * step + random_range(rng, PETAL_JITTER.0, PETAL_JITTER.1))
            .collect();

        let (min_leaves, max_leaves) = if final_height > TALL_FLOWER {
            LEAVES_TALL
        } else {
            LEAVES_SHORT
        };
        let leaf_count = random_int(rng, min_leaves, max_leaves) as usize;
        let leaves = (0..leaf_count)
            .map(|_| Leaf {
                height_fraction: random_range(rng, LEAF_HEIGHT_FRACTION.0, LEAF_HEIGHT_FRACTION.1),
                side: random_sign(rng),
                length: random_range(rng, LEAF_LENGTH.0, LEAF_LENGTH.1) * total_scale,
                angle: random_range(rng, LEAF_ANGLE.0, LEAF_ANGLE.1),
                width: random_range(rng, LEAF_WIDTH.0, LEAF_WIDTH.1) * total_scale,
            })
            .collect();

        Self {
            final_height,
            intrinsic_scale,
            stem_control_offset,
            petal_count,
            max_petal_length,
            max_petal_width,
            petal_angles,
            leaves,
            tilt,
            petal_shape_profile,
            wind_phase,
            petal_color,
            seed_rotation,
        }
    }
}
