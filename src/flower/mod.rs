//! A single daisy: seed, stem, leaves, bud, bloom and the flight home

pub mod geometry;
pub mod morphology;

pub use morphology::{Leaf, Morphology};

use std::rc::Rc;
use rand::Rng;

use crate::animation::{ease_out_back, ease_out_quad, linear, GrowthState, Lifecycle, Phase, DEFAULT_OVERSHOOT};
use crate::config::GardenConfig;
use crate::math::{clamp, deg_to_rad, QuadBezier, Vec2};
use crate::render::{Outline, Surface};
use geometry::*;

/// Reveal needed before the stem is drawn at all
const STEM_VISIBLE: f64 = 0.01;
/// Reveal needed before any leaf is drawn
const LEAVES_VISIBLE: f64 = 0.15;
/// Reveal span over which a leaf unfurls
const LEAF_GROWTH_SPAN: f64 = 0.2;
/// Flight shrinks the flower down to this fraction
const COLLECTED_SCALE: f64 = 0.2;
const CENTER_BASE: f64 = 4.0;
const CENTER_BLOOM_BONUS: f64 = 1.5;
const PETAL_BASE_OFFSET: f64 = 2.0;
const CREASE_WIDTH: f64 = 1.2;

#[derive(Debug, Clone)]
pub struct Flower {
    /// Ground point the stem grows from
    pub position: Vec2,
    pub morphology: Morphology,
    /// Shrink factor from local planting density
    pub density_scale: f64,
    lifecycle: Lifecycle,
    config: Rc<GardenConfig>,
}

impl Flower {
    /// Plant a flower with a freshly rolled shape
    pub fn new<R: Rng + ?Sized>(
        position: Vec2,
        created_at: f64,
        density_scale: f64,
        config: Rc<GardenConfig>,
        rng: &mut R,
    ) -> Self {
        let morphology = Morphology::generate(density_scale, &config.colors.palette, rng);
        Self::with_morphology(position, created_at, density_scale, morphology, config)
    }

    pub fn with_morphology(
        position: Vec2,
        created_at: f64,
        density_scale: f64,
        morphology: Morphology,
        config: Rc<GardenConfig>,
    ) -> Self {
        Self {
            position,
            morphology,
            density_scale,
            lifecycle: Lifecycle::new(created_at),
            config,
        }
    }

    pub fn created_at(&self) -> f64 {
        self.lifecycle.created_at
    }

    pub fn age(&self, now: f64) -> f64 {
        self.lifecycle.age_at(now)
    }

    /// Phase as of the last `update_and_draw`
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_collecting(&self) -> bool {
        self.lifecycle.is_collecting()
    }

    fn total_scale(&self) -> f64 {
        self.density_scale * self.morphology.intrinsic_scale
    }

    /// Start flying toward `target`. No-op if already collecting.
    pub fn collect(&mut self, target: Vec2, now: f64) {
        self.lifecycle.collect(self.position, target, now);
    }

    /// Growth state at `now`, or `None` while still a seed or flying
    pub fn growth_at(&self, now: f64) -> Option<GrowthState> {
        if self.is_collecting() {
            return None;
        }
        let timing = &self.config.timing;
        let age = self.age(now);
        if age < timing.pre_growth() {
            return None;
        }
        Some(GrowthState::at(age - timing.pre_growth(), self.morphology.final_height, timing))
    }

    /// Advance to `now` and draw. Returns false once the flight has
    /// finished and the flower should be dropped.
    pub fn update_and_draw(&mut self, surface: &mut dyn Surface, now: f64) -> bool {
        let config = Rc::clone(&self.config);
        let timing = &config.timing;

        match self.lifecycle.advance(now, timing) {
            Phase::Removed => false,
            Phase::Collecting => {
                let progress = self.lifecycle.collection_progress(now, timing).unwrap_or(0.0);
                self.draw_collecting(surface, progress, now);
                true
            }
            Phase::Seed => {
                self.draw_seed(surface, self.lifecycle.drop_time(timing));
                true
            }
            Phase::Growing | Phase::Bloomed => {
                let growth = GrowthState::at(
                    self.lifecycle.growth_time(timing),
                    self.morphology.final_height,
                    timing,
                );
                self.draw_plant(surface, &growth, now, false);
                true
            }
        }
    }

    fn draw_collecting(&self, surface: &mut dyn Surface, progress: f64, now: f64) {
        let Some(collection) = self.lifecycle.collection() else {
            return;
        };
        let eased = ease_out_quad(progress, 0.0, 1.0, 1.0);
        let at = collection.origin.lerp(&collection.target, eased);
        let scale = linear(progress, 1.0, -(1.0 - COLLECTED_SCALE), 1.0);

        surface.save();
        surface.translate(at.x, at.y);
        surface.scale(scale, scale);
        // Center the plant on the flight point rather than its ground point
        surface.translate(-self.position.x, -self.position.y + self.morphology.final_height / 2.0);
        let bloomed = GrowthState::bloomed(self.morphology.final_height, &self.config.timing);
        self.draw_plant(surface, &bloomed, now, true);
        surface.restore();
    }

    fn draw_seed(&self, surface: &mut dyn Surface, drop_time: f64) {
        let colors = &self.config.colors;
        let y = ease_out_quad(
            drop_time,
            self.position.y - SEED_DROP,
            SEED_DROP,
            self.config.timing.drop,
        );

        surface.save();
        surface.translate(self.position.x, y);
        surface.rotate(self.morphology.seed_rotation);

        seed_outline().fill(surface, &colors.seed);

        let (top, bottom) = seed_crease();
        surface.set_stroke_color(&colors.seed_crease);
        surface.set_line_width(CREASE_WIDTH);
        surface.begin_path();
        surface.move_to(top.x, top.y);
        surface.line_to(bottom.x, bottom.y);
        surface.stroke();

        surface.restore();
    }

    /// Draw stem, leaves and bloom. `is_static` freezes the wind.
    fn draw_plant(&self, surface: &mut dyn Surface, growth: &GrowthState, now: f64, is_static: bool) {
        let m = &self.morphology;
        let colors = &self.config.colors;
        let reveal = growth.reveal;

        let sway = if is_static {
            0.0
        } else {
            wind_force(now, self.position.x, m.wind_phase) * sway_sensitivity(m.final_height) * reveal
        };
        let curve = stem_curve(self.position, m.final_height, m.stem_control_offset, sway);

        if reveal > STEM_VISIBLE {
            let base_width = stem_base_width(m.final_height, self.total_scale());
            let ribbon = stem_ribbon(&curve, reveal, STEM_SEGMENTS, base_width);
            Outline::polygon(&ribbon).fill(surface, &colors.stem);
        }

        if reveal > LEAVES_VISIBLE {
            let bend = if is_static { 0.0 } else { stem_bend(&curve) };
            for leaf in m.leaves.iter().filter(|l| reveal > l.height_fraction) {
                let leaf_growth = clamp((reveal - leaf.height_fraction) / LEAF_GROWTH_SPAN, 0.0, 1.0);
                let length = leaf.length * ease_out_back(leaf_growth, 0.0, 1.0, 1.0, DEFAULT_OVERSHOOT);
                let attach = curve.point(leaf.height_fraction);

                surface.save();
                surface.translate(attach.x, attach.y);
                surface.rotate(deg_to_rad(leaf_angle(leaf.angle, leaf.side, bend)));
                leaf_outline(length, leaf.width).fill(surface, &colors.stem);
                surface.restore();
            }
        }

        if growth.growth_time > self.config.timing.stem_end() {
            self.draw_bloom(surface, growth, &curve);
        }
    }

    fn draw_bloom(&self, surface: &mut dyn Surface, growth: &GrowthState, curve: &QuadBezier) {
        let m = &self.morphology;
        let tip = curve.point(growth.reveal);
        let rotation = curve.tangent(1.0).angle() + std::f64::consts::FRAC_PI_2;

        surface.save();
        surface.translate(tip.x, tip.y);
        surface.rotate(rotation);
        surface.scale(1.0, m.tilt);

        let bloom = growth.bloom_progress;
        if bloom > 0.0 {
            let length = m.max_petal_length * bloom;
            let width = m.max_petal_width * bloom;
            let offset = PETAL_BASE_OFFSET * bloom * self.density_scale;
            let petal = petal_outline(length, width, offset, m.petal_shape_profile);

            for angle in &m.petal_angles {
                surface.save();
                surface.rotate(*angle);
                petal.fill(surface, &m.petal_color);
                surface.restore();
            }
        }

        let center = (CENTER_BASE + bloom * CENTER_BLOOM_BONUS) * self.total_scale();
        surface.set_fill_color(&self.config.colors.center);
        surface.begin_path();
        surface.arc(0.0, 0.0, (center * growth.bud_scale).max(0.0), 0.0, std::f64::consts::TAU);
        surface.fill();

        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config() -> Rc<GardenConfig> {
        Rc::new(GardenConfig::default())
    }

    fn flower_at(created_at: f64, seed: u64) -> Flower {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Flower::new(Vec2::new(300.0, 500.0), created_at, 1.0, config(), &mut rng)
    }

    fn fixed_height(final_height: f64) -> Flower {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut morphology = Morphology::generate(1.0, &config().colors.palette, &mut rng);
        morphology.final_height = final_height;
        Flower::with_morphology(Vec2::new(100.0, 400.0), 0.0, 1.0, morphology, config())
    }

    #[test]
    fn test_seed_phase_draws_seed() {
        let mut flower = flower_at(0.0, 3);
        let mut surface = RecordingSurface::new();
        assert!(flower.update_and_draw(&mut surface, 100.0));
        assert_eq!(flower.phase(), Phase::Seed);
        assert_eq!(surface.fills_with("#E6C898"), 1);
        assert_eq!(surface.strokes().len(), 1);
        assert_eq!(surface.fills_with("#96B16D"), 0);
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_seed_rests_during_wait() {
        let mut a = RecordingSurface::new();
        let mut b = RecordingSurface::new();
        let mut flower = flower_at(0.0, 3);
        flower.update_and_draw(&mut a, 400.0);
        flower.update_and_draw(&mut b, 3000.0);
        assert_eq!(a.commands, b.commands);
    }

    #[test]
    fn test_just_into_growth() {
        let mut flower = fixed_height(50.0);
        let mut surface = RecordingSurface::new();
        let now = 300.0 + 3000.0 + 50.0;

        assert!(flower.update_and_draw(&mut surface, now));
        assert_eq!(flower.phase(), Phase::Growing);
        assert_eq!(surface.fills_with("#E6C898"), 0);

        let growth = flower.growth_at(now).unwrap();
        assert_eq!(growth.growth_time, 50.0);
        assert!(growth.height > 0.0 && growth.height < 50.0);
        // Bud has not started yet
        assert_eq!(surface.fills_with("#F9A602"), 0);
    }

    #[test]
    fn test_full_bloom_draws_every_part() {
        let mut flower = flower_at(0.0, 9);
        let mut surface = RecordingSurface::new();
        assert!(flower.update_and_draw(&mut surface, 3300.0 + 1500.0));
        assert_eq!(flower.phase(), Phase::Bloomed);

        let m = &flower.morphology;
        assert_eq!(surface.fills_with(&m.petal_color), m.petal_count);
        assert_eq!(surface.fills_with("#F9A602"), 1);
        // Stem plus every leaf
        assert_eq!(surface.fills_with("#96B16D"), 1 + m.leaves.len());
        assert!(surface.is_balanced());
        assert!(surface.all_finite());
    }

    #[test]
    fn test_leaves_appear_with_reveal() {
        let mut flower = fixed_height(150.0);
        let timing = GardenConfig::default().timing;
        let mut prev = 0;
        for step in 0..=70 {
            let now = timing.pre_growth() + step as f64 * 10.0;
            let mut surface = RecordingSurface::new();
            flower.update_and_draw(&mut surface, now);
            let count = surface.fills_with("#96B16D");
            assert!(count >= prev, "leaves should never disappear while growing");
            prev = count;
        }
        assert_eq!(prev, 1 + flower.morphology.leaves.len());
    }

    #[test]
    fn test_collect_is_idempotent() {
        let mut flower = flower_at(0.0, 4);
        flower.collect(Vec2::new(900.0, 100.0), 16000.0);
        let first = *flower.lifecycle().collection().unwrap();
        flower.collect(Vec2::new(1.0, 2.0), 16500.0);
        assert_eq!(*flower.lifecycle().collection().unwrap(), first);
        assert_eq!(first.origin, flower.position);
    }

    #[test]
    fn test_alive_until_flight_ends() {
        let mut flower = flower_at(0.0, 5);
        let mut surface = RecordingSurface::new();
        let mut now = 0.0;
        while now < 14800.0 {
            assert!(flower.update_and_draw(&mut surface, now));
            now += 16.0;
        }

        flower.collect(Vec2::new(900.0, 100.0), now);
        let start = now;
        let mut removals = 0;
        while now < start + 1200.0 {
            let alive = flower.update_and_draw(&mut surface, now);
            if now - start < 1000.0 {
                assert!(alive);
            } else if !alive {
                removals += 1;
                break;
            }
            now += 16.0;
        }
        assert_eq!(removals, 1);
        assert_eq!(flower.phase(), Phase::Removed);
    }

    #[test]
    fn test_flight_moves_and_shrinks() {
        let mut flower = flower_at(0.0, 6);
        flower.collect(Vec2::new(900.0, 100.0), 20000.0);

        let mut surface = RecordingSurface::new();
        flower.update_and_draw(&mut surface, 20500.0);

        let translate = surface.commands.iter().find_map(|c| match c {
            DrawCommand::Translate { x, y } => Some((*x, *y)),
            _ => None,
        });
        let (x, y) = translate.unwrap();
        // Eased past the halfway point at half time
        assert!(x > 600.0 && x < 900.0);
        assert!(y < 300.0 && y > 100.0);

        let scale = surface.commands.iter().find_map(|c| match c {
            DrawCommand::Scale { x, .. } => Some(*x),
            _ => None,
        });
        assert!((scale.unwrap() - 0.6).abs() < 1e-9);
        assert_eq!(surface.fills_with(&flower.morphology.petal_color), flower.morphology.petal_count);
    }

    #[test]
    fn test_flight_has_no_sway() {
        // Two frames of the flight at the same progress but different wall
        // clock offsets would differ only through wind; pin progress instead
        let mut a = flower_at(0.0, 8);
        let mut b = flower_at(0.0, 8);
        a.collect(Vec2::new(500.0, 100.0), 20000.0);
        b.collect(Vec2::new(500.0, 100.0), 27000.0);

        let mut sa = RecordingSurface::new();
        let mut sb = RecordingSurface::new();
        a.update_and_draw(&mut sa, 20250.0);
        b.update_and_draw(&mut sb, 27250.0);
        assert_eq!(sa.commands, sb.commands);
    }
}
