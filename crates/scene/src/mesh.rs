use foundation::bounds::BoundingSphere;
use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// Indexed triangle mesh in local space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        BoundingSphere::from_points(&self.positions)
    }

    /// UV sphere with poles on the y axis.
    ///
    /// Vertex layout matches the common renderer convention:
    /// `x = -r cos(u) sin(v)`, `y = r cos(v)`, `z = r sin(u) sin(v)`,
    /// which lines up texture longitude with [`foundation::math::project`].
    pub fn uv_sphere(radius: f64, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut positions =
            Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        for iy in 0..=height_segments {
            let v = iy as f64 / height_segments as f64;
            let (sin_v, cos_v) = (v * std::f64::consts::PI).sin_cos();
            for ix in 0..=width_segments {
                let u = ix as f64 / width_segments as f64;
                let (sin_u, cos_u) = (u * std::f64::consts::TAU).sin_cos();
                positions.push(Vec3::new(
                    -radius * cos_u * sin_v,
                    radius * cos_v,
                    radius * sin_u * sin_v,
                ));
            }
        }

        let stride = width_segments + 1;
        let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * stride + ix + 1;
                let b = iy * stride + ix;
                let c = (iy + 1) * stride + ix;
                let d = (iy + 1) * stride + ix + 1;

                // Pole rows collapse to a point; skip their degenerate halves.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { positions, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::Mesh;

    #[test]
    fn uv_sphere_vertices_lie_on_radius() {
        let mesh = Mesh::uv_sphere(0.6, 32, 32);
        assert_eq!(mesh.positions.len(), 33 * 33);
        for p in &mesh.positions {
            assert!((p.length() - 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn uv_sphere_skips_degenerate_pole_triangles() {
        let mesh = Mesh::uv_sphere(1.0, 8, 4);
        // 8 * 4 quads, minus one triangle per quad on each pole row.
        assert_eq!(mesh.triangle_count(), 8 * 4 * 2 - 8 * 2);
        let max = mesh.positions.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn bounding_sphere_recovers_radius() {
        let s = Mesh::uv_sphere(0.6, 32, 32).bounding_sphere().unwrap();
        assert!((s.radius - 0.6).abs() < 1e-9);
        assert!(s.center.length() < 1e-9);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(Mesh::default().bounding_sphere().is_none());
    }
}
