//! Flower lifecycle state machine
//!
//! A flower moves through:
//! - Seed: dropping onto the ground, then resting
//! - Growing: stem, leaves, bud and bloom unfolding
//! - Bloomed: fully open, swaying
//! - Collecting: flying toward the score counter
//! - Removed: flight finished, ready to be dropped from the garden
//!
//! Transitions are driven purely by elapsed time against `Timing`,
//! except `Collecting`, which starts on request.

use super::easing::{ease_out_back, ease_out_quad, DEFAULT_OVERSHOOT};
use crate::config::Timing;
use crate::math::{clamp, Vec2};

/// Overshoot used when petals open
pub const BLOOM_OVERSHOOT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Seed,
    Growing,
    Bloomed,
    Collecting,
    Removed,
}

/// Recorded once, when collection starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collection {
    pub started_at: f64,
    pub origin: Vec2,
    pub target: Vec2,
}

#[derive(Debug, Clone)]
pub struct Lifecycle {
    pub created_at: f64,
    /// Age as of the last `advance`
    pub elapsed: f64,
    phase: Phase,
    collection: Option<Collection>,
}

impl Lifecycle {
    pub fn new(created_at: f64) -> Self {
        Self {
            created_at,
            elapsed: 0.0,
            phase: Phase::Seed,
            collection: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn collection(&self) -> Option<&Collection> {
        self.collection.as_ref()
    }

    pub fn is_collecting(&self) -> bool {
        self.collection.is_some()
    }

    pub fn age_at(&self, now: f64) -> f64 {
        now - self.created_at
    }

    /// Begin the flight. Returns false if it was already under way.
    pub fn collect(&mut self, origin: Vec2, target: Vec2, now: f64) -> bool {
        if self.collection.is_some() {
            return false;
        }
        self.collection = Some(Collection {
            started_at: now,
            origin,
            target,
        });
        if self.phase != Phase::Removed {
            self.phase = Phase::Collecting;
        }
        true
    }

    /// Flight progress in `[0, ∞)`, if collecting
    pub fn collection_progress(&self, now: f64, timing: &Timing) -> Option<f64> {
        self.collection
            .as_ref()
            .map(|c| (now - c.started_at) / timing.collection)
    }

    /// Advance to `now` and return the resulting phase
    pub fn advance(&mut self, now: f64, timing: &Timing) -> Phase {
        self.elapsed = self.age_at(now);

        if self.phase == Phase::Removed {
            return self.phase;
        }

        if let Some(progress) = self.collection_progress(now, timing) {
            self.phase = if progress >= 1.0 {
                Phase::Removed
            } else {
                Phase::Collecting
            };
            return self.phase;
        }

        self.phase = if self.elapsed < timing.pre_growth() {
            Phase::Seed
        } else if self.elapsed - timing.pre_growth() < timing.full_growth() {
            Phase::Growing
        } else {
            Phase::Bloomed
        };
        self.phase
    }

    /// Time spent growing, zero while still a seed
    pub fn growth_time(&self, timing: &Timing) -> f64 {
        (self.elapsed - timing.pre_growth()).max(0.0)
    }

    /// Time spent in the drop animation, clamped so the seed rests
    /// once it lands
    pub fn drop_time(&self, timing: &Timing) -> f64 {
        clamp(self.elapsed, 0.0, timing.drop)
    }
}

/// Derived growth quantities at a given growth time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthState {
    pub growth_time: f64,
    /// Current stem height
    pub height: f64,
    /// `height / final_height`, in `[0, 1]`
    pub reveal: f64,
    /// Bud pop-in scale (overshoots past 1 while popping)
    pub bud_scale: f64,
    /// Petal opening (overshoots past 1 while opening)
    pub bloom_progress: f64,
}

impl GrowthState {
    pub fn at(growth_time: f64, final_height: f64, timing: &Timing) -> Self {
        let stem_end = timing.stem_end();
        let bud_end = timing.bud_end();

        let height = if growth_time < stem_end {
            ease_out_quad(growth_time, 0.0, final_height, stem_end)
        } else {
            final_height
        };

        let reveal = if final_height > 0.0 {
            clamp(height / final_height, 0.0, 1.0)
        } else {
            1.0
        };

        let mut bud_scale = 0.0;
        let mut bloom_progress = 0.0;
        if growth_time > stem_end {
            let bud_time = growth_time - stem_end;
            bud_scale = if bud_time < timing.bud {
                ease_out_back(bud_time, 0.0, 1.0, timing.bud, DEFAULT_OVERSHOOT)
            } else {
                1.0
            };

            let bloom_time = growth_time - bud_end;
            if bloom_time > 0.0 {
                bloom_progress = ease_out_back(
                    bloom_time.min(timing.bloom),
                    0.0,
                    1.0,
                    timing.bloom,
                    BLOOM_OVERSHOOT,
                );
            }
        }

        Self {
            growth_time,
            height,
            reveal,
            bud_scale,
            bloom_progress,
        }
    }

    /// Fully open flower
    pub fn bloomed(final_height: f64, timing: &Timing) -> Self {
        Self::at(timing.full_growth(), final_height, timing)
    }

    pub fn has_bud(&self) -> bool {
        self.bud_scale > 0.0 || self.bloom_progress > 0.0
    }
}
