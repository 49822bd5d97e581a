//! Cleanup system: removes faded smoke and delivered packets.

use hecs::{Entity, World};

use firewatch_core::components::{DataPacket, SmokePuff};

/// Despawn puffs with no opacity left and packets that reached their target.
/// Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, puff) in world.query_mut::<&SmokePuff>() {
        if puff.opacity <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, packet) in world.query_mut::<&DataPacket>() {
        if packet.progress >= 1.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Count live (puffs, packets).
pub fn population(world: &World) -> (usize, usize) {
    let puffs = world.query::<&SmokePuff>().iter().count();
    let packets = world.query::<&DataPacket>().iter().count();
    (puffs, packets)
}
