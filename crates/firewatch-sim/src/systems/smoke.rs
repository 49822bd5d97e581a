//! Smoke system: spawns puffs around the active detector and lets them
//! drift upward, swell and fade.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use firewatch_core::components::SmokePuff;
use firewatch_core::constants::*;
use firewatch_core::enums::Stage;
use firewatch_core::types::Point;

use super::spawn::spawn_count;

/// Run one smoke frame. Does nothing until a detector has fired.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    stage: Stage,
    detector: Option<Point>,
    dt_secs: f64,
) {
    let Some(origin) = detector else {
        return;
    };
    if stage < Stage::DetectorActivated {
        return;
    }

    for _ in 0..spawn_count(rng, SMOKE_SPAWN_RATE, dt_secs) {
        spawn_puff(world, rng, origin);
    }

    integrate(world, dt_secs);
}

/// Spawn a single puff jittered around `origin`.
pub fn spawn_puff(world: &mut World, rng: &mut ChaCha8Rng, origin: Point) -> hecs::Entity {
    let position = origin.offset(
        rng.gen_range(-SMOKE_JITTER..SMOKE_JITTER),
        rng.gen_range(-SMOKE_JITTER..SMOKE_JITTER),
    );
    world.spawn((
        position,
        SmokePuff {
            size: rng.gen_range(SMOKE_SIZE_MIN..SMOKE_SIZE_MAX),
            opacity: rng.gen_range(SMOKE_OPACITY_MIN..SMOKE_OPACITY_MAX),
            speed: rng.gen_range(SMOKE_SPEED_MIN..SMOKE_SPEED_MAX),
        },
    ))
}

/// Advance every puff by `dt_secs`: rise, grow, fade.
pub fn integrate(world: &mut World, dt_secs: f64) {
    for (_entity, (pos, puff)) in world.query_mut::<(&mut Point, &mut SmokePuff)>() {
        pos.y -= puff.speed * dt_secs;
        puff.size += SMOKE_GROWTH_RATE * dt_secs;
        puff.opacity -= SMOKE_FADE_RATE * dt_secs;
    }
}
