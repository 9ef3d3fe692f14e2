//! Timing for everything that moves
//!
//! Easing curves plus the per-flower lifecycle state machine.

mod easing;
mod lifecycle;

pub use easing::{ease_out_quad, ease_out_back, linear, DEFAULT_OVERSHOOT};
pub use lifecycle::{Lifecycle, Phase, Collection, GrowthState, BLOOM_OVERSHOOT};
