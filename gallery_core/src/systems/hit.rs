use crate::{SpawnSeq, Target, TargetKind};
use glam::Vec2;
use hecs::{Entity, World};

/// Every target containing `point`, in spawn order
pub fn targets_at(world: &World, point: Vec2) -> Vec<(Entity, TargetKind)> {
    let mut hits: Vec<(SpawnSeq, Entity, TargetKind)> = world
        .query::<(&Target, &SpawnSeq)>()
        .iter()
        .filter(|(_e, (target, _))| target.contains(point))
        .map(|(e, (target, seq))| (*seq, e, target.kind))
        .collect();
    hits.sort_by_key(|(seq, _, _)| *seq);
    hits.into_iter().map(|(_, e, kind)| (e, kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_at_ignores_misses() {
        let mut world = World::new();
        let hit = world.spawn((
            Target::new(TargetKind::Penalty, Vec2::new(0.0, 0.0), Vec2::ZERO, 40.0),
            SpawnSeq(1),
        ));
        world.spawn((
            Target::new(TargetKind::RewardA, Vec2::new(200.0, 0.0), Vec2::ZERO, 40.0),
            SpawnSeq(2),
        ));

        let hits = targets_at(&world, Vec2::new(10.0, 10.0));
        assert_eq!(hits, vec![(hit, TargetKind::Penalty)]);
    }
}
