pub mod vec2;
pub mod bezier;
pub mod random;

pub use vec2::Vec2;
pub use bezier::{QuadBezier, cubic_point};
pub use random::{random_range, random_int, random_sign, pick};

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

pub fn clamp(val: f64, min: f64, max: f64) -> f64 {
    val.max(min).min(max)
}
