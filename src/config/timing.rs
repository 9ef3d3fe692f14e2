use serde::{Deserialize, Serialize};

/// Flower lifecycle durations, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Seed falls onto the ground
    pub drop: f64,
    /// Seed rests before sprouting
    pub wait: f64,
    pub sprout: f64,
    pub stem: f64,
    pub bud: f64,
    pub bloom: f64,
    /// Flight toward the counter
    pub collection: f64,
    /// Time spent in full bloom before auto-collection
    pub idle: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            drop: 300.0,
            wait: 3000.0,
            sprout: 200.0,
            stem: 500.0,
            bud: 400.0,
            bloom: 400.0,
            collection: 1000.0,
            idle: 10000.0,
        }
    }
}

impl Timing {
    /// Age at which growth starts
    pub fn pre_growth(&self) -> f64 {
        self.drop + self.wait
    }

    /// Growth time at which the stem reaches full height
    pub fn stem_end(&self) -> f64 {
        self.sprout + self.stem
    }

    /// Growth time at which the bud has fully popped
    pub fn bud_end(&self) -> f64 {
        self.stem_end() + self.bud
    }

    /// Growth time until full bloom
    pub fn full_growth(&self) -> f64 {
        self.bud_end() + self.bloom
    }

    /// Age after which an untouched flower is collected
    pub fn life_span(&self) -> f64 {
        self.pre_growth() + self.full_growth() + self.idle
    }
}
