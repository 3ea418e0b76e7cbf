use crate::Target;
use hecs::World;

/// Move targets based on velocity
pub fn move_targets(world: &mut World, dt: f32) {
    for (_entity, target) in world.query_mut::<&mut Target>() {
        target.pos += target.vel * dt;
    }
}
