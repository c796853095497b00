//! Flattens a [`RenderFrame`] into world-space vertex lists, one per pipeline.
//!
//! Every triangle is expanded (no index buffers) so a batch can be uploaded
//! with a single `create_buffer_init` per list.

use bytemuck::{Pod, Zeroable};
use foundation::math::Vec3;
use scene::components::{DrawLayer, Shape3D};
use scene::mesh::Mesh;
use scene::world::World;

use crate::renderer::{RenderCommand, RenderFrame};

const DISC_SEGMENTS: usize = 16;
const SPHERE_SEGMENTS: u32 = 16;

/// Unlit vertex: star points and marker discs.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Diffuse-lit vertex: earth, clouds, and the satellite.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Debug, Default)]
pub struct SceneBatch {
    /// Point list.
    pub stars: Vec<FlatVertex>,
    /// Opaque triangles.
    pub lit: Vec<LitVertex>,
    /// Opaque unlit triangles.
    pub markers: Vec<FlatVertex>,
    /// Alpha-blended triangles, drawn last without depth writes.
    pub translucent: Vec<LitVertex>,
}

impl SceneBatch {
    pub fn build(world: &World, frame: &RenderFrame) -> Self {
        let mut batch = SceneBatch::default();
        for cmd in &frame.commands {
            match (cmd.layer, cmd.shape) {
                (DrawLayer::Starfield, shape) => {
                    with_mesh(world, shape, |mesh| batch.push_points(cmd, mesh));
                }
                (_, Shape3D::Disc { radius }) => batch.push_disc(cmd, radius),
                (DrawLayer::Atmosphere, shape) => {
                    with_mesh(world, shape, |mesh| {
                        push_lit(&mut batch.translucent, cmd, mesh, Normals::Radial)
                    });
                }
                (DrawLayer::Model, shape) => {
                    with_mesh(world, shape, |mesh| {
                        push_lit(&mut batch.lit, cmd, mesh, Normals::Face)
                    });
                }
                (_, shape) => {
                    with_mesh(world, shape, |mesh| {
                        push_lit(&mut batch.lit, cmd, mesh, Normals::Radial)
                    });
                }
            }
        }
        batch
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
            && self.lit.is_empty()
            && self.markers.is_empty()
            && self.translucent.is_empty()
    }

    fn push_points(&mut self, cmd: &RenderCommand, mesh: &Mesh) {
        let color = cmd.tint.rgba();
        self.stars.extend(mesh.positions.iter().map(|p| FlatVertex {
            position: cmd.world.transform_point(*p).as_f32_array(),
            color,
        }));
    }

    /// A disc facing away from the world origin.
    fn push_disc(&mut self, cmd: &RenderCommand, radius: f64) {
        let center = cmd.world.translation;
        let scale = cmd.world.transform_vector(Vec3::new(1.0, 0.0, 0.0)).length();
        let r = radius * scale;

        let mut normal = center.normalized();
        if normal == Vec3::ZERO {
            normal = Vec3::new(0.0, 0.0, 1.0);
        }
        let helper = if normal.y.abs() > 0.99 {
            Vec3::new(1.0, 0.0, 0.0)
        } else {
            Vec3::new(0.0, 1.0, 0.0)
        };
        let u = normal.cross(helper).normalized();
        let v = normal.cross(u);

        let color = cmd.tint.rgba();
        let rim = |k: usize| {
            let a = k as f64 / DISC_SEGMENTS as f64 * std::f64::consts::TAU;
            center + u * (r * a.cos()) + v * (r * a.sin())
        };
        for k in 0..DISC_SEGMENTS {
            for p in [center, rim(k), rim(k + 1)] {
                self.markers.push(FlatVertex {
                    position: p.as_f32_array(),
                    color,
                });
            }
        }
    }
}

#[derive(Copy, Clone)]
enum Normals {
    /// From the model origin through the vertex (spheres).
    Radial,
    /// Flat per triangle.
    Face,
}

fn with_mesh(world: &World, shape: Shape3D, f: impl FnOnce(&Mesh)) {
    match shape {
        Shape3D::Mesh { mesh } => {
            if let Some(mesh) = world.mesh(mesh) {
                f(mesh);
            }
        }
        Shape3D::Sphere { radius } => f(&Mesh::uv_sphere(radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS)),
        Shape3D::Disc { .. } => {}
    }
}

fn push_lit(out: &mut Vec<LitVertex>, cmd: &RenderCommand, mesh: &Mesh, normals: Normals) {
    let color = cmd.tint.rgba();
    let origin = cmd.world.translation;
    let to_world = |i: u32| -> Option<Vec3> {
        mesh.positions
            .get(i as usize)
            .map(|p| cmd.world.transform_point(*p))
    };

    for tri in mesh.indices.chunks_exact(3) {
        let (Some(a), Some(b), Some(c)) = (to_world(tri[0]), to_world(tri[1]), to_world(tri[2]))
        else {
            continue;
        };
        let face = (b - a).cross(c - a).normalized();
        for p in [a, b, c] {
            let n = match normals {
                Normals::Radial => (p - origin).normalized(),
                Normals::Face => face,
            };
            out.push(LitVertex {
                position: p.as_f32_array(),
                normal: n.as_f32_array(),
                color,
            });
        }
    }
}

/// Per-frame shader globals.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub light_dir: [f32; 3],
    pub _pad: f32,
}

impl Globals {
    pub fn new(view_proj: [[f32; 4]; 4]) -> Self {
        Self {
            view_proj,
            light_dir: [0.4, 0.7, 0.6],
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SceneBatch, SPHERE_SEGMENTS};
    use crate::renderer::Renderer;
    use foundation::math::Vec3;
    use scene::components::{Drawable3D, Shape3D, Tint, Transform};
    use scene::mesh::Mesh;
    use scene::prefabs::{GlobeSpec, MARKER_DISC_RADIUS, spawn_globe, spawn_marker, spawn_satellite};
    use scene::world::World;

    fn small_globe() -> (World, scene::prefabs::GlobeEntities) {
        let mut world = World::new();
        let spec = GlobeSpec {
            segments: 8,
            star_segments: 4,
            ..GlobeSpec::default()
        };
        let globe = spawn_globe(&mut world, &spec);
        (world, globe)
    }

    #[test]
    fn shells_land_in_their_lists() {
        let (world, _) = small_globe();
        let batch = SceneBatch::build(&world, &Renderer::collect_3d(&world));

        assert_eq!(batch.stars.len(), 5 * 5);
        let earth_tris = Mesh::uv_sphere(0.6, 8, 8).triangle_count();
        assert_eq!(batch.lit.len(), earth_tris * 3);
        assert_eq!(batch.translucent.len(), earth_tris * 3);
        assert!(batch.markers.is_empty());
        assert!(batch.translucent.iter().all(|v| v.color[3] < 1.0));
    }

    #[test]
    fn marker_disc_is_a_fan_around_its_position() {
        let (mut world, globe) = small_globe();
        let green = Tint::from_rgb_hex(0x00ff00);
        spawn_marker(&mut world, globe.earth, Vec3::new(0.6, 0.0, 0.0), green);
        let batch = SceneBatch::build(&world, &Renderer::collect_3d(&world));

        assert_eq!(batch.markers.len(), 16 * 3);
        for v in &batch.markers {
            assert_eq!(v.color, green.rgba());
            // Disc plane is perpendicular to the surface normal (+x here).
            assert!((v.position[0] - 0.6).abs() < 1e-6);
            let [_, y, z] = v.position;
            assert!(((y * y + z * z).sqrt() as f64) <= MARKER_DISC_RADIUS + 1e-6);
        }
    }

    #[test]
    fn satellite_is_scaled_and_lit() {
        let (mut world, globe) = small_globe();
        let before = SceneBatch::build(&world, &Renderer::collect_3d(&world)).lit.len();
        spawn_satellite(
            &mut world,
            globe.earth,
            Mesh::uv_sphere(10.0, 4, 4),
            Vec3::new(0.0, 1.1, 0.0),
            0.01,
        );
        let batch = SceneBatch::build(&world, &Renderer::collect_3d(&world));
        let added = &batch.lit[before..];
        assert_eq!(added.len(), Mesh::uv_sphere(10.0, 4, 4).triangle_count() * 3);
        for v in added {
            let p = Vec3::new(v.position[0] as f64, v.position[1] as f64, v.position[2] as f64);
            assert!((p.distance(Vec3::new(0.0, 1.1, 0.0)) - 0.1).abs() < 1e-4);
        }
    }

    #[test]
    fn analytic_sphere_shape_is_tessellated() {
        let mut world = World::new();
        let e = world.spawn();
        world.set_transform(e, Transform::identity());
        world.set_drawable_3d(
            e,
            Drawable3D::new(Shape3D::Sphere { radius: 1.0 }, scene::components::DrawLayer::Surface),
        );
        let batch = SceneBatch::build(&world, &Renderer::collect_3d(&world));
        let tris = Mesh::uv_sphere(1.0, SPHERE_SEGMENTS, SPHERE_SEGMENTS).triangle_count();
        assert_eq!(batch.lit.len(), tris * 3);
    }

    #[test]
    fn empty_world_gives_empty_batch() {
        let world = World::new();
        assert!(SceneBatch::build(&world, &Renderer::collect_3d(&world)).is_empty());
    }
}
