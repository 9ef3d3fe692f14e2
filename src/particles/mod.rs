//! Particle effects

mod confetti;

pub use confetti::{ConfettiSystem, Particle};
