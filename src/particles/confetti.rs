//! Celebration confetti
//!
//! Paper flakes sprayed in a leftward fan from the score counter. They
//! fall under gravity, lose speed to drag, flutter sideways once slow,
//! and fade out as their life runs down.

use rand::Rng;

use crate::math::{deg_to_rad, pick, random_range, Vec2};
use crate::render::Surface;

const SPAWN_JITTER: f64 = 15.0;
/// Spray fan in screen degrees: 100 (down-left) through 260 (up-left)
const FAN_DEGREES: (f64, f64) = (100.0, 260.0);
const SPEED: (f64, f64) = (12.0, 45.0);
const ROTATION_SPEED: (f64, f64) = (-15.0, 15.0);
const SIZE: (f64, f64) = (5.0, 10.0);
const DECAY: (f64, f64) = (0.005, 0.015);
const SWAY_FREQUENCY: (f64, f64) = (0.05, 0.2);
const SWAY_AMPLITUDE: (f64, f64) = (0.5, 2.0);

const GRAVITY: f64 = 0.15;
const DRAG: f64 = 0.96;
const SPIN_DAMPING: f64 = 0.98;
/// Below this horizontal speed a flake starts to flutter
const FLUTTER_SPEED: f64 = 15.0;
/// Ellipse height relative to width
const FLATTEN: f64 = 0.6;

/// A single confetti flake
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees
    pub rotation: f64,
    pub rotation_speed: f64,
    pub color: String,
    /// 1.0 when spawned, discarded at or below 0.0
    pub life: f64,
    pub size: f64,
    pub decay_rate: f64,
    pub sway_frequency: f64,
    pub sway_amplitude: f64,
    pub time_offset: f64,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(source: Vec2, palette: &[String], rng: &mut R) -> Self {
        let position = Vec2::new(
            source.x + random_range(rng, -SPAWN_JITTER, SPAWN_JITTER),
            source.y + random_range(rng, -SPAWN_JITTER, SPAWN_JITTER),
        );

        let angle = deg_to_rad(random_range(rng, FAN_DEGREES.0, FAN_DEGREES.1));
        let speed = random_range(rng, SPEED.0, SPEED.1);
        let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);

        let rotation = random_range(rng, 0.0, 360.0);
        let rotation_speed = random_range(rng, ROTATION_SPEED.0, ROTATION_SPEED.1);
        let color = pick(rng, palette)
            .cloned()
            .unwrap_or_else(|| "#FFFFFF".to_string());

        Self {
            position,
            velocity,
            rotation,
            rotation_speed,
            color,
            life: 1.0,
            size: random_range(rng, SIZE.0, SIZE.1),
            decay_rate: random_range(rng, DECAY.0, DECAY.1),
            sway_frequency: random_range(rng, SWAY_FREQUENCY.0, SWAY_FREQUENCY.1),
            sway_amplitude: random_range(rng, SWAY_AMPLITUDE.0, SWAY_AMPLITUDE.1),
            time_offset: rng.gen::<f64>() * 1000.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.position = self.position + self.velocity;

        if self.velocity.x.abs() < FLUTTER_SPEED {
            self.position.x += (self.time_offset + (1.0 - self.life) * 10.0).sin() * self.sway_amplitude;
        }

        self.velocity.y += GRAVITY;
        self.velocity = self.velocity.scale(DRAG);

        self.rotation += self.rotation_speed;
        self.rotation_speed *= SPIN_DAMPING;

        self.life -= self.decay_rate;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.translate(self.position.x, self.position.y);
        surface.rotate(deg_to_rad(self.rotation));
        surface.set_global_alpha(self.life.max(0.0));
        surface.set_fill_color(&self.color);
        surface.begin_path();
        surface.ellipse(0.0, 0.0, self.size, self.size * FLATTEN, 0.0);
        surface.fill();
        surface.restore();
    }
}

/// All live confetti
#[derive(Debug, Default)]
pub struct ConfettiSystem {
    particles: Vec<Particle>,
}

impl ConfettiSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spray `count` flakes from `anchor`
    pub fn burst<R: Rng + ?Sized>(&mut self, anchor: Vec2, count: usize, palette: &[String], rng: &mut R) {
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::new(anchor, palette, rng));
        }
    }

    /// Update, draw, then drop spent flakes
    pub fn update_and_draw(&mut self, surface: &mut dyn Surface) {
        for particle in &mut self.particles {
            particle.update();
            particle.draw(surface);
        }
        self.particles.retain(|p| !p.is_dead());
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
