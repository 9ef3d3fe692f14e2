//! Garden configuration
//!
//! Every tunable lives here and is handed to constructors explicitly.
//! Defaults reproduce the stock garden; a YAML document may override any
//! subset of fields.

pub mod timing;
pub mod colors;

pub use timing::Timing;
pub use colors::Colors;

use serde::{Deserialize, Serialize};

/// Where and how densely new flowers are planted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Chance that a plant request produces two flowers
    pub pair_chance: f64,
    /// Horizontal spread of the second flower of a pair
    pub pair_spread: f64,
    /// How many of the most recent flowers are checked for crowding
    pub density_window: usize,
    /// Closer than this, new flowers get `crowded_scale`
    pub near_distance: f64,
    /// Farther than this, new flowers get full size
    pub far_distance: f64,
    pub crowded_scale: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            pair_chance: 0.2,
            pair_spread: 25.0,
            density_window: 50,
            near_distance: 15.0,
            far_distance: 60.0,
            crowded_scale: 0.6,
        }
    }
}

/// Score counter and celebration bursts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Score at which the counter resets to zero
    pub reset_at: u32,
    /// Every multiple of this triggers a small burst
    pub milestone_step: u32,
    /// Score that triggers a medium burst
    pub half_milestone: u32,
    /// Particles per burst multiplier
    pub burst_base: usize,
    pub reset_multiplier: usize,
    pub half_multiplier: usize,
    pub step_multiplier: usize,
    /// Collection target sits this far from the top-right corner
    pub target_inset: f64,
    /// Bursts spawn this far from the top-right corner
    pub burst_inset: f64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            reset_at: 100,
            milestone_step: 10,
            half_milestone: 50,
            burst_base: 60,
            reset_multiplier: 10,
            half_multiplier: 5,
            step_multiplier: 1,
            target_inset: 100.0,
            burst_inset: 104.0,
        }
    }
}

/// Hand gesture interpretation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gesture {
    /// Normalized index-to-thumb distance below which a hand is pinching
    pub pinch_threshold: f64,
    /// Minimum time between plants from the same hand (ms)
    pub cooldown: f64,
}

impl Default for Gesture {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.05,
            cooldown: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub timing: Timing,
    pub colors: Colors,
    pub placement: Placement,
    pub scoring: Scoring,
    pub gesture: Gesture,
    /// Fixed RNG seed; the host picks one when absent
    pub seed: Option<u64>,
}

impl GardenConfig {
    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let config: GardenConfig = serde_yaml::from_str(yaml)
            .map_err(|e| format!("YAML parse error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let t = &self.timing;
        let durations = [
            ("drop", t.drop),
            ("sprout", t.sprout),
            ("stem", t.stem),
            ("bud", t.bud),
            ("bloom", t.bloom),
            ("collection", t.collection),
        ];
        for (name, value) in durations {
            if !(value > 0.0) {
                return Err(format!("Timing '{}' must be positive, got {}", name, value));
            }
        }
        if t.wait < 0.0 || t.idle < 0.0 {
            return Err("Timing 'wait' and 'idle' must not be negative".to_string());
        }

        let p = &self.placement;
        if !(0.0..=1.0).contains(&p.pair_chance) {
            return Err(format!("Pair chance {} outside [0, 1]", p.pair_chance));
        }
        if p.far_distance <= p.near_distance {
            return Err(format!(
                "Density far distance {} must exceed near distance {}",
                p.far_distance, p.near_distance
            ));
        }
        if !(0.0..=1.0).contains(&p.crowded_scale) || p.crowded_scale == 0.0 {
            return Err(format!("Crowded scale {} outside (0, 1]", p.crowded_scale));
        }

        let s = &self.scoring;
        if s.reset_at == 0 || s.milestone_step == 0 {
            return Err("Scoring 'reset_at' and 'milestone_step' must be positive".to_string());
        }

        self.colors.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(GardenConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
timing:
  wait: 500
placement:
  pair_chance: 0.0
seed: 42
"#;
        let config = GardenConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.timing.wait, 500.0);
        assert_eq!(config.timing.drop, 300.0);
        assert_eq!(config.placement.pair_chance, 0.0);
        assert_eq!(config.placement.density_window, 50);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.colors, Colors::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = GardenConfig::from_yaml("{}").unwrap();
        assert_eq!(config, GardenConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = GardenConfig::from_yaml("timing: [1, 2");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("YAML parse error"));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let result = GardenConfig::from_yaml("timing:\n  collection: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_inverted_density_range() {
        let yaml = "placement:\n  near_distance: 80\n  far_distance: 60\n";
        assert!(GardenConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_palette_override() {
        let yaml = "colors:\n  palette: ['#FFFFFF']\n";
        let config = GardenConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.colors.palette, vec!["#FFFFFF".to_string()]);
        assert_eq!(config.colors.stem, "#96B16D");
    }
}
