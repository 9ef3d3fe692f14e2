use crate::config::Scoring;

/// Collected-flower counter with milestone bursts
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    score: u32,
    rules: Scoring,
}

impl ScoreKeeper {
    pub fn new(rules: Scoring) -> Self {
        Self { score: 0, rules }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Count `removed` flowers. Returns the burst multiplier when a
    /// milestone was hit.
    ///
    /// Reaching the reset threshold wins over every other milestone and
    /// wraps the counter back to zero. The half milestone and the regular
    /// steps only fire on an exact landing.
    pub fn add(&mut self, removed: u32) -> Option<usize> {
        if removed == 0 {
            return None;
        }
        self.score += removed;

        let rules = &self.rules;
        if self.score >= rules.reset_at {
            self.score = 0;
            Some(rules.reset_multiplier)
        } else if self.score == rules.half_milestone {
            Some(rules.half_multiplier)
        } else if rules.milestone_step > 0 && self.score % rules.milestone_step == 0 {
            Some(rules.step_multiplier)
        } else {
            None
        }
    }

    /// Particles in a burst of the given multiplier
    pub fn burst_size(&self, multiplier: usize) -> usize {
        self.rules.burst_base * multiplier
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}
