//! Bounded randomization helpers over an injected generator

use rand::Rng;

/// Uniform float in `[min, max)`. Returns `min` for an empty range.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    min + rng.gen::<f64>() * (max - min)
}

/// Uniform integer in `[min, max]` inclusive. Returns `min` for an empty range.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Fair coin: `1.0` or `-1.0`
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen::<f64>() > 0.5 { 1.0 } else { -1.0 }
}

/// Pick one element of a non-empty slice
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_range_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, 35.0, 170.0);
            assert!((35.0..170.0).contains(&v));
        }
    }

    #[test]
    fn test_random_range_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(random_range(&mut rng, 3.0, 3.0), 3.0);
    }

    #[test]
    fn test_random_int_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let v = random_int(&mut rng, 6, 14);
            assert!((6..=14).contains(&v));
            seen_min |= v == 6;
            seen_max |= v == 14;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let empty: [u8; 0] = [];
        assert!(pick(&mut rng, &empty).is_none());
        assert_eq!(pick(&mut rng, &[5]), Some(&5));
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(random_range(&mut a, 0.0, 1.0), random_range(&mut b, 0.0, 1.0));
        }
    }
}
