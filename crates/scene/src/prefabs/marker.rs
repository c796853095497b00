use foundation::math::{Euler, Vec3};

use crate::World;
use crate::components::{Drawable3D, Tint, Transform};
use crate::entity::EntityId;

pub const MARKER_DISC_RADIUS: f64 = 0.02;

/// Spawns a ground marker disc at `position`, local to `parent`.
pub fn spawn_marker(world: &mut World, parent: EntityId, position: Vec3, tint: Tint) -> EntityId {
    let entity = world.spawn();
    world.set_transform(
        entity,
        Transform::translate(position)
            .with_rotation(Euler::new(0.0, std::f64::consts::FRAC_PI_2, 0.0)),
    );
    world.set_drawable_3d(entity, Drawable3D::marker_disc(MARKER_DISC_RADIUS));
    world.set_tint(entity, tint);
    world.set_parent(entity, parent);
    entity
}
