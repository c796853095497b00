use scene::components::{DrawLayer, Shape3D, Tint, WorldTransform};
use scene::entity::EntityId;
use scene::world::World;

/// One visible drawable, with its parent chain already resolved.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderCommand {
    pub entity: EntityId,
    pub world: WorldTransform,
    pub shape: Shape3D,
    pub layer: DrawLayer,
    pub tint: Tint,
}

#[derive(Debug, Default)]
pub struct RenderFrame {
    /// Ordered by layer, then by entity.
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    pub fn of_layer(&self, layer: DrawLayer) -> impl Iterator<Item = &RenderCommand> + '_ {
        self.commands.iter().filter(move |c| c.layer == layer)
    }
}

pub struct Renderer;

impl Renderer {
    pub fn collect_3d(world: &World) -> RenderFrame {
        let mut commands: Vec<RenderCommand> = world
            .drawables_3d()
            .into_iter()
            .map(|(entity, transform, drawable, tint)| RenderCommand {
                entity,
                world: transform,
                shape: drawable.shape,
                layer: drawable.layer,
                tint,
            })
            .collect();
        commands.sort_by_key(|c| (c.layer, c.entity));
        RenderFrame { commands }
    }
}

#[cfg(test)]
mod tests {
    use super::Renderer;
    use foundation::math::{Euler, Vec3};
    use scene::components::{DrawLayer, Tint, Transform, Visibility};
    use scene::mesh::Mesh;
    use scene::prefabs::{GlobeSpec, spawn_globe, spawn_marker, spawn_satellite};
    use scene::world::World;

    #[test]
    fn globe_commands_are_layer_ordered() {
        let mut world = World::new();
        let globe = spawn_globe(&mut world, &GlobeSpec::default());
        spawn_marker(&mut world, globe.earth, Vec3::new(0.6, 0.0, 0.0), Tint::WHITE);

        let frame = Renderer::collect_3d(&world);
        let layers: Vec<DrawLayer> = frame.commands.iter().map(|c| c.layer).collect();
        assert_eq!(
            layers,
            vec![
                DrawLayer::Starfield,
                DrawLayer::Surface,
                DrawLayer::Atmosphere,
                DrawLayer::Marker
            ]
        );
        assert_eq!(frame.of_layer(DrawLayer::Marker).count(), 1);
    }

    #[test]
    fn marker_command_carries_parent_rotation() {
        let mut world = World::new();
        let globe = spawn_globe(&mut world, &GlobeSpec::default());
        let marker = spawn_marker(&mut world, globe.earth, Vec3::new(0.6, 0.0, 0.0), Tint::WHITE);
        world.set_transform(
            globe.earth,
            Transform::identity().with_rotation(Euler::new(0.0, std::f64::consts::FRAC_PI_2, 0.0)),
        );

        let frame = Renderer::collect_3d(&world);
        let cmd = frame.commands.iter().find(|c| c.entity == marker).unwrap();
        assert!(cmd.world.translation.distance(Vec3::new(0.0, 0.0, -0.6)) < 1e-12);
    }

    #[test]
    fn hidden_entities_are_skipped() {
        let mut world = World::new();
        let globe = spawn_globe(&mut world, &GlobeSpec::default());
        let sat = spawn_satellite(
            &mut world,
            globe.earth,
            Mesh::uv_sphere(1.0, 4, 4),
            Vec3::new(0.0, 1.1, 0.0),
            0.01,
        );
        assert_eq!(Renderer::collect_3d(&world).of_layer(DrawLayer::Model).count(), 1);
        world.set_visibility(sat, Visibility::hidden());
        assert_eq!(Renderer::collect_3d(&world).of_layer(DrawLayer::Model).count(), 0);
    }
}
