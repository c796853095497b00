use crate::mesh::MeshId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Sphere { radius: f64 },
    Disc { radius: f64 },
    Mesh { mesh: MeshId },
}

/// Which pass draws the entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawLayer {
    /// Inward-facing backdrop shell.
    Starfield,
    Surface,
    /// Transparent shell drawn after everything opaque.
    Atmosphere,
    Marker,
    Model,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub layer: DrawLayer,
}

impl Drawable3D {
    pub fn new(shape: Shape3D, layer: DrawLayer) -> Self {
        Self { shape, layer }
    }

    pub fn mesh(mesh: MeshId, layer: DrawLayer) -> Self {
        Self::new(Shape3D::Mesh { mesh }, layer)
    }

    pub fn marker_disc(radius: f64) -> Self {
        Self::new(Shape3D::Disc { radius }, DrawLayer::Marker)
    }
}
