//! Frame-rate independent spawn budget shared by the particle systems.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use firewatch_core::constants::SPAWN_WINDOW_SECS;

/// How many entities to spawn this frame for a Poisson-like `rate` (per
/// second) over `dt_secs`.
///
/// The expected count is `rate * dt`; its whole part is spawned outright and
/// the fractional part is a single Bernoulli draw, so the long-run mean is
/// the same at any frame rate. The spawn window is capped at
/// `SPAWN_WINDOW_SECS` so one frame after a stall cannot dump a burst.
pub fn spawn_count(rng: &mut ChaCha8Rng, rate: f64, dt_secs: f64) -> u32 {
    if rate.is_nan() || dt_secs.is_nan() || rate <= 0.0 || dt_secs <= 0.0 {
        return 0;
    }
    let expected = rate * dt_secs.min(SPAWN_WINDOW_SECS);
    let whole = expected.floor();
    let fraction = expected - whole;
    let extra = if fraction > 0.0 && rng.gen_bool(fraction) {
        1
    } else {
        0
    };
    whole as u32 + extra
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_zero_delta_spawns_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(spawn_count(&mut rng, 18.75, 0.0), 0);
        assert_eq!(spawn_count(&mut rng, 0.0, 0.016), 0);
        assert_eq!(spawn_count(&mut rng, 18.75, f64::NAN), 0);
    }

    #[test]
    fn test_spawn_window_caps_stall() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let count = spawn_count(&mut rng, 20.0, 60.0);
        assert_eq!(count, 5, "20/s over the 0.25 s window");
    }

    #[test]
    fn test_mean_matches_rate_at_any_frame_rate() {
        let rate = 18.75;
        for frame_ms in [8.0, 16.0, 33.0, 100.0] {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let frames = (600_000.0 / frame_ms) as u32;
            let total: u32 = (0..frames)
                .map(|_| spawn_count(&mut rng, rate, frame_ms / 1000.0))
                .sum();
            let per_sec = total as f64 / 600.0;
            assert!(
                (per_sec - rate).abs() < 1.0,
                "{frame_ms} ms frames spawned {per_sec:.2}/s, expected ~{rate}"
            );
        }
    }
}
