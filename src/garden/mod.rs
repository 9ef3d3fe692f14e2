//! The garden: every flower and flake, the score and the hands

pub mod gesture;
pub mod placement;
pub mod scoring;

pub use gesture::{GestureBridge, GestureError, GestureSource, HandCursor, HandId, HandObservation};
pub use placement::density_modifier;
pub use scoring::ScoreKeeper;

use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GardenConfig;
use crate::flower::Flower;
use crate::math::Vec2;
use crate::particles::ConfettiSystem;
use crate::render::Surface;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Flowers whose flight ended this frame
    pub removed: usize,
    pub score: u32,
    /// Burst multiplier if a milestone was hit
    pub milestone: Option<usize>,
}

pub struct Garden {
    config: Rc<GardenConfig>,
    flowers: Vec<Flower>,
    confetti: ConfettiSystem,
    scores: ScoreKeeper,
    gestures: GestureBridge,
    gestures_enabled: bool,
    width: f64,
    height: f64,
    rng: ChaCha8Rng,
    score_listener: Option<Box<dyn FnMut(u32)>>,
}

impl Garden {
    pub fn new(config: GardenConfig, width: f64, height: f64, seed: u64) -> Self {
        log::info!("Garden created: {}x{}, seed {}", width, height, seed);
        Self {
            scores: ScoreKeeper::new(config.scoring),
            config: Rc::new(config),
            flowers: Vec::new(),
            confetti: ConfettiSystem::new(),
            gestures: GestureBridge::new(),
            gestures_enabled: false,
            width,
            height,
            rng: ChaCha8Rng::seed_from_u64(seed),
            score_listener: None,
        }
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn confetti(&self) -> &ConfettiSystem {
        &self.confetti
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Called with the new score after every frame that collected flowers
    pub fn set_score_listener(&mut self, listener: impl FnMut(u32) + 'static) {
        self.score_listener = Some(Box::new(listener));
    }

    pub fn clear_score_listener(&mut self) {
        self.score_listener = None;
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    /// Turning gestures off forgets all hand state
    pub fn set_gestures_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.gestures.reset();
        }
        self.gestures_enabled = enabled;
    }

    pub fn hand_cursors(&self) -> &[HandCursor] {
        self.gestures.cursors()
    }

    /// Size factor a flower planted at `(x, y)` would get
    pub fn density_modifier(&self, x: f64, y: f64) -> f64 {
        density_modifier(&self.flowers, Vec2::new(x, y), &self.config.placement)
    }

    /// Plant at `(x, y)`, sometimes with a companion. Returns how many
    /// flowers were planted.
    pub fn add_flower(&mut self, x: f64, y: f64, now: f64) -> usize {
        let points = placement::plant_points(Vec2::new(x, y), &self.config.placement, &mut self.rng);
        for point in &points {
            // Crowding includes the first flower of a pair
            let scale = self.density_modifier(point.x, point.y);
            let flower = Flower::new(*point, now, scale, Rc::clone(&self.config), &mut self.rng);
            self.flowers.push(flower);
        }
        log::debug!("Planted {} at ({:.0}, {:.0}), {} flowers", points.len(), x, y, self.flowers.len());
        points.len()
    }

    /// Where collected flowers fly to
    pub fn collection_target(&self) -> Vec2 {
        let inset = self.config.scoring.target_inset;
        Vec2::new(self.width - inset, inset)
    }

    fn burst_anchor(&self) -> Vec2 {
        let inset = self.config.scoring.burst_inset;
        Vec2::new(self.width - inset, inset)
    }

    /// Spray confetti from the score counter
    pub fn trigger_confetti(&mut self, multiplier: usize) {
        let count = self.scores.burst_size(multiplier);
        let anchor = self.burst_anchor();
        self.confetti.burst(anchor, count, &self.config.colors.palette, &mut self.rng);
    }

    /// Draw one frame at `now`
    pub fn tick(&mut self, surface: &mut dyn Surface, now: f64) -> FrameReport {
        surface.clear_rect(0.0, 0.0, self.width, self.height);

        let life_span = self.config.timing.life_span();
        let target = self.collection_target();
        for flower in &mut self.flowers {
            if !flower.is_collecting() && flower.age(now) > life_span {
                flower.collect(target, now);
            }
        }

        let before = self.flowers.len();
        self.flowers.retain_mut(|flower| flower.update_and_draw(surface, now));
        let removed = before - self.flowers.len();

        let milestone = self.scores.add(removed as u32);
        if let Some(multiplier) = milestone {
            log::info!("Milestone reached, burst x{}", multiplier);
            self.trigger_confetti(multiplier);
        }

        self.confetti.update_and_draw(surface);

        if self.gestures_enabled {
            self.gestures.draw_cursors(surface, now);
        }

        let score = self.scores.score();
        if removed > 0 {
            if let Some(listener) = self.score_listener.as_mut() {
                listener(score);
            }
        }

        FrameReport {
            removed,
            score,
            milestone,
        }
    }

    /// Run the recognizer on a new video frame and plant on pinches.
    /// Returns how many flowers were planted.
    pub fn poll_gestures(&mut self, source: &mut dyn GestureSource, frame_time: f64, now: f64) -> usize {
        if !self.gestures_enabled || !self.gestures.accept_frame(frame_time) {
            return 0;
        }

        let hands = match source.recognize(now) {
            Ok(hands) => hands,
            Err(e) => {
                log::warn!("Gesture frame dropped: {}", e);
                self.gestures.lose_hands();
                return 0;
            }
        };

        let plants = self
            .gestures
            .interpret(&hands, self.width, self.height, now, &self.config.gesture);
        plants
            .into_iter()
            .map(|point| self.add_flower(point.x, point.y, now))
            .sum()
    }
}
