use crate::components::{Drawable3D, Shape3D, Tint, Transform, Visibility, WorldTransform};
use crate::entity::EntityId;
use crate::mesh::{Mesh, MeshId};
use foundation::bounds::BoundingSphere;
use foundation::handles::Handle;

/// Column-per-component entity store.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    parents: Vec<Option<EntityId>>,
    visibility: Vec<Option<Visibility>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    tints: Vec<Option<Tint>>,
    meshes: Vec<Mesh>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index));
        self.next_index += 1;
        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        id
    }

    pub fn entity_count(&self) -> usize {
        self.next_index as usize
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        self.transforms
            .get_mut(entity.index() as usize)
            .and_then(|t| t.as_mut())
    }

    /// Attaches `child` to `parent`; the child's transform becomes local to it.
    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) {
        self.ensure_capacity(child.index() as usize);
        self.parents[child.index() as usize] = Some(parent);
    }

    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.parents.get(entity.index() as usize).and_then(|p| *p)
    }

    pub fn children(&self, parent: EntityId) -> Vec<EntityId> {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == Some(parent))
            .map(|(idx, _)| EntityId(Handle::new(idx as u32)))
            .collect()
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.ensure_capacity(entity.index() as usize);
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    /// The entity's own flag, ignoring ancestors.
    pub fn visibility(&self, entity: EntityId) -> Visibility {
        self.visibility
            .get(entity.index() as usize)
            .and_then(|v| *v)
            .unwrap_or_default()
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<Drawable3D> {
        self.drawables_3d.get(entity.index() as usize).and_then(|d| *d)
    }

    pub fn set_tint(&mut self, entity: EntityId, tint: Tint) {
        self.ensure_capacity(entity.index() as usize);
        self.tints[entity.index() as usize] = Some(tint);
    }

    pub fn tint(&self, entity: EntityId) -> Option<Tint> {
        self.tints.get(entity.index() as usize).and_then(|t| *t)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0 as usize)
    }

    /// Local-to-world transform with the full parent chain applied.
    ///
    /// Returns `None` if the entity or any ancestor has no transform.
    pub fn world_transform(&self, entity: EntityId) -> Option<WorldTransform> {
        let mut world = self.transform(entity)?.to_world();
        let mut current = entity;
        // Bounded walk so a malformed parent cycle cannot hang the frame.
        for _ in 0..self.transforms.len() {
            let Some(parent) = self.parent(current) else {
                return Some(world);
            };
            world = self.transform(parent)?.to_world().compose(&world);
            current = parent;
        }
        None
    }

    /// Bounding sphere of the entity's geometry in its local space.
    ///
    /// The entity's own scale is applied; its position and parents are not.
    pub fn bounding_sphere(&self, entity: EntityId) -> Option<BoundingSphere> {
        let drawable = self.drawable_3d(entity)?;
        let scale = self.transform(entity).map(|t| t.scale).unwrap_or(1.0);
        let local = match drawable.shape {
            Shape3D::Mesh { mesh } => self.mesh(mesh)?.bounding_sphere()?,
            Shape3D::Sphere { radius } | Shape3D::Disc { radius } => BoundingSphere {
                center: foundation::math::Vec3::ZERO,
                radius,
            },
        };
        Some(BoundingSphere {
            center: local.center * scale,
            radius: local.radius * scale,
        })
    }

    /// Visible drawables with resolved world transforms, in entity order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, WorldTransform, Drawable3D, Tint)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let entity = EntityId(Handle::new(idx as u32));
            if !self.is_visible(entity) {
                continue;
            }
            let Some(world) = self.world_transform(entity) else {
                continue;
            };
            let tint = self.tint(entity).unwrap_or_default();
            out.push((entity, world, *drawable, tint));
        }
        out
    }

    /// Hidden parents hide their children.
    pub fn is_visible(&self, entity: EntityId) -> bool {
        let mut current = Some(entity);
        let mut guard = self.visibility.len() + 1;
        while let Some(e) = current {
            let visible = self
                .visibility
                .get(e.index() as usize)
                .and_then(|v| *v)
                .map(|v| v.visible)
                .unwrap_or(true);
            if !visible {
                return false;
            }
            guard -= 1;
            if guard == 0 {
                return false;
            }
            current = self.parent(e);
        }
        true
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.parents.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.tints.resize(new_len, None);
        }
    }
}
