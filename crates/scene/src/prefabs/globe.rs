use crate::World;
use crate::components::{DrawLayer, Drawable3D, Tint, Transform};
use crate::entity::EntityId;
use crate::mesh::Mesh;

/// Base ocean color of the earth shell; the viewer shades it.
pub const EARTH_RGB: u32 = 0x1f5fa8;

/// Shell radii and tessellation for the earth, cloud, and star spheres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeSpec {
    pub earth_radius: f64,
    pub cloud_radius: f64,
    pub star_radius: f64,
    pub segments: u32,
    pub star_segments: u32,
}

impl Default for GlobeSpec {
    fn default() -> Self {
        Self {
            earth_radius: 0.6,
            cloud_radius: 0.63,
            star_radius: 80.0,
            segments: 32,
            star_segments: 64,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlobeEntities {
    pub earth: EntityId,
    pub clouds: EntityId,
    pub stars: EntityId,
}

pub fn spawn_globe(world: &mut World, spec: &GlobeSpec) -> GlobeEntities {
    let stars = spawn_shell(
        world,
        Mesh::uv_sphere(spec.star_radius, spec.star_segments, spec.star_segments),
        DrawLayer::Starfield,
        Tint::WHITE,
    );
    let earth = spawn_shell(
        world,
        Mesh::uv_sphere(spec.earth_radius, spec.segments, spec.segments),
        DrawLayer::Surface,
        Tint::from_rgb_hex(EARTH_RGB),
    );
    let clouds = spawn_shell(
        world,
        Mesh::uv_sphere(spec.cloud_radius, spec.segments, spec.segments),
        DrawLayer::Atmosphere,
        Tint::WHITE.with_alpha(0.35),
    );

    GlobeEntities {
        earth,
        clouds,
        stars,
    }
}

fn spawn_shell(world: &mut World, mesh: Mesh, layer: DrawLayer, tint: Tint) -> EntityId {
    let mesh = world.add_mesh(mesh);
    let entity = world.spawn();
    world.set_transform(entity, Transform::identity());
    world.set_drawable_3d(entity, Drawable3D::mesh(mesh, layer));
    world.set_tint(entity, tint);
    entity
}
