//! Data packet system: spawns packets from the active detector toward the
//! subsystem the current stage hands off to, and moves them along.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use firewatch_core::components::DataPacket;
use firewatch_core::constants::{PACKET_SPAWN_RATE, PACKET_SPEED};
use firewatch_core::enums::Stage;
use firewatch_core::types::{Point, Surface};

use super::spawn::spawn_count;

/// Run one packet frame. Packets only flow once ESSER is processing.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    stage: Stage,
    detector: Option<Point>,
    surface: &Surface,
    dt_secs: f64,
) {
    let Some(source) = detector else {
        return;
    };
    let Some(subsystem) = stage.subsystem() else {
        return;
    };

    let target = subsystem.anchor(surface);
    for _ in 0..spawn_count(rng, PACKET_SPAWN_RATE, dt_secs) {
        world.spawn((DataPacket {
            source,
            target,
            progress: 0.0,
            stage,
        },));
    }

    advance(world, dt_secs);
}

/// Move every packet along its line; progress saturates at 1.0.
pub fn advance(world: &mut World, dt_secs: f64) {
    let step = PACKET_SPEED * dt_secs;
    for (_entity, packet) in world.query_mut::<&mut DataPacket>() {
        packet.progress = (packet.progress + step).min(1.0);
    }
}
