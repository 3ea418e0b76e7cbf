use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{SpawnRequest, SpawnSeq, Target, TargetKind};
use crate::systems::{move_targets, targets_at};

/// Opaque handle to a spawned target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetHandle(pub u64);

impl From<Entity> for TargetHandle {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits().get())
    }
}

impl TargetHandle {
    pub fn entity(self) -> Option<Entity> {
        Entity::from_bits(self.0)
    }
}

/// Render/physics collaborator that owns live targets
pub trait TargetLayer {
    fn spawn(&mut self, req: &SpawnRequest) -> TargetHandle;
    /// Returns false if the target was already gone
    fn remove(&mut self, handle: TargetHandle) -> bool;
    fn position(&self, handle: TargetHandle) -> Option<Vec2>;
    fn positions(&self) -> Vec<(TargetHandle, Vec2)>;
}

/// Headless target layer on a hecs world: linear motion, no gravity or damping
#[derive(Default)]
pub struct TargetWorld {
    pub world: World,
    next_seq: u64,
}

impl TargetWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every target by its velocity
    pub fn step(&mut self, dt: f32) {
        move_targets(&mut self.world, dt);
    }

    /// Targets whose circle contains `point`, oldest first
    pub fn hit_test(&self, point: Vec2) -> Vec<(TargetHandle, TargetKind)> {
        targets_at(&self.world, point)
            .into_iter()
            .map(|(entity, kind)| (entity.into(), kind))
            .collect()
    }

    pub fn kind(&self, handle: TargetHandle) -> Option<TargetKind> {
        let entity = handle.entity()?;
        self.world.get::<&Target>(entity).ok().map(|t| t.kind)
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }
}

impl TargetLayer for TargetWorld {
    fn spawn(&mut self, req: &SpawnRequest) -> TargetHandle {
        self.next_seq += 1;
        let entity = self
            .world
            .spawn((Target::from(req), SpawnSeq(self.next_seq)));
        entity.into()
    }

    fn remove(&mut self, handle: TargetHandle) -> bool {
        match handle.entity() {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    fn position(&self, handle: TargetHandle) -> Option<Vec2> {
        let entity = handle.entity()?;
        self.world.get::<&Target>(entity).ok().map(|t| t.pos)
    }

    fn positions(&self) -> Vec<(TargetHandle, Vec2)> {
        let mut positions: Vec<_> = self
            .world
            .query::<(&Target, &SpawnSeq)>()
            .iter()
            .map(|(entity, (target, seq))| (*seq, TargetHandle::from(entity), target.pos))
            .collect();
        positions.sort_by_key(|(seq, _, _)| *seq);
        positions
            .into_iter()
            .map(|(_, handle, pos)| (handle, pos))
            .collect()
    }
}
