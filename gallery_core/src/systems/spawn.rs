use crate::{Config, GameRng, SpawnRequest};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw one spawn batch: one target per lane, kind and size drawn independently
pub fn build_spawn_batch(config: &Config, rng: &mut GameRng) -> Vec<SpawnRequest> {
    let mut batch = Vec::with_capacity(config.lanes.len());

    for (index, lane) in config.lanes.iter().enumerate() {
        // No kinds configured: the slot stays empty
        let Some(&kind) = config.target_kinds.choose(&mut rng.0) else {
            continue;
        };
        let size = rng
            .0
            .gen_range(config.target_size_min..=config.target_size_max);

        batch.push(SpawnRequest {
            kind,
            lane: index as u8,
            position: lane.origin,
            velocity: lane.velocity,
            size,
        });
    }

    batch
}
