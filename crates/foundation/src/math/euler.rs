use super::Vec3;

/// Euler angles in radians, applied in XYZ order (`R = Rx * Ry * Rz`).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotates `v` by this orientation.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let (sx, cx) = self.x.sin_cos();
        let (sy, cy) = self.y.sin_cos();
        let (sz, cz) = self.z.sin_cos();

        // Rz
        let v = Vec3::new(v.x * cz - v.y * sz, v.x * sz + v.y * cz, v.z);
        // Ry
        let v = Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy);
        // Rx
        Vec3::new(v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx)
    }

    /// Column-major 3x3 rotation matrix, matching [`Euler::rotate`].
    pub fn to_matrix(self) -> [[f64; 3]; 3] {
        let c0 = self.rotate(Vec3::new(1.0, 0.0, 0.0));
        let c1 = self.rotate(Vec3::new(0.0, 1.0, 0.0));
        let c2 = self.rotate(Vec3::new(0.0, 0.0, 1.0));
        [
            [c0.x, c0.y, c0.z],
            [c1.x, c1.y, c1.z],
            [c2.x, c2.y, c2.z],
        ]
    }
}
