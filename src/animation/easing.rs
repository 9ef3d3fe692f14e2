//! Easing functions for timed animations
//!
//! All functions take `(t, b, c, d)`: elapsed time, start value,
//! change in value and duration. They return `b` at `t = 0` and `b + c`
//! at `t = d`.

/// Default overshoot for `ease_out_back`
pub const DEFAULT_OVERSHOOT: f64 = 1.70158;

/// Quadratic deceleration
pub fn ease_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}

/// Decelerates past the target, then settles back onto it.
/// Larger `overshoot` gives a springier pop.
pub fn ease_out_back(t: f64, b: f64, c: f64, d: f64, overshoot: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * ((overshoot + 1.0) * t + overshoot) + 1.0) + b
}

pub fn linear(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * t / d + b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert!((ease_out_quad(0.0, 10.0, 5.0, 300.0) - 10.0).abs() < 1e-9);
        assert!((ease_out_quad(300.0, 10.0, 5.0, 300.0) - 15.0).abs() < 1e-9);

        assert!(ease_out_back(0.0, 0.0, 1.0, 400.0, DEFAULT_OVERSHOOT).abs() < 1e-9);
        assert!((ease_out_back(400.0, 0.0, 1.0, 400.0, DEFAULT_OVERSHOOT) - 1.0).abs() < 1e-9);

        assert!((linear(0.0, 2.0, 8.0, 4.0) - 2.0).abs() < 1e-9);
        assert!((linear(4.0, 2.0, 8.0, 4.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_ease_out_quad_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease_out_quad(i as f64, 0.0, 1.0, 100.0);
            assert!(v >= prev - 1e-12, "ease_out_quad should be monotonic");
            prev = v;
        }
    }

    #[test]
    fn test_ease_out_quad_decelerates() {
        // First half covers more ground than the second
        let half = ease_out_quad(0.5, 0.0, 1.0, 1.0);
        assert!(half > 0.5);
    }

    #[test]
    fn test_ease_out_back_overshoots() {
        let peak = (0..100)
            .map(|i| ease_out_back(i as f64 / 100.0, 0.0, 1.0, 1.0, DEFAULT_OVERSHOOT))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0, "ease_out_back should overshoot its target");
    }

    #[test]
    fn test_larger_overshoot_peaks_higher() {
        let peak = |s: f64| {
            (0..100)
                .map(|i| ease_out_back(i as f64 / 100.0, 0.0, 1.0, 1.0, s))
                .fold(f64::MIN, f64::max)
        };
        assert!(peak(2.0) > peak(DEFAULT_OVERSHOOT));
    }
}
