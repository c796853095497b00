use foundation::math::Vec3;

use crate::World;
use crate::components::{DrawLayer, Drawable3D, Transform};
use crate::entity::EntityId;
use crate::mesh::Mesh;

/// Spawns the satellite model at `position`, local to `parent`.
pub fn spawn_satellite(
    world: &mut World,
    parent: EntityId,
    mesh: Mesh,
    position: Vec3,
    scale: f64,
) -> EntityId {
    let mesh = world.add_mesh(mesh);
    let entity = world.spawn();
    world.set_transform(entity, Transform::translate(position).with_scale(scale));
    world.set_drawable_3d(entity, Drawable3D::mesh(mesh, DrawLayer::Model));
    world.set_parent(entity, parent);
    entity
}
