use foundation::math::{Euler, Vec3};

/// Local transform relative to the parent entity (or the world origin).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Euler,
    pub scale: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Euler::IDENTITY,
            scale: 1.0,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_world(self) -> WorldTransform {
        let r = self.rotation.to_matrix();
        let s = self.scale;
        WorldTransform {
            linear: [
                [r[0][0] * s, r[0][1] * s, r[0][2] * s],
                [r[1][0] * s, r[1][1] * s, r[1][2] * s],
                [r[2][0] * s, r[2][1] * s, r[2][2] * s],
            ],
            translation: self.position,
        }
    }
}

/// Resolved transform with the parent chain applied.
///
/// `linear` is column-major (rotation times uniform scale).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldTransform {
    pub linear: [[f64; 3]; 3],
    pub translation: Vec3,
}

impl WorldTransform {
    pub fn identity() -> Self {
        Transform::identity().to_world()
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.linear;
        Vec3::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
        )
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform_vector(p) + self.translation
    }

    /// `self * child`: applies `child` first, then `self`.
    pub fn compose(&self, child: &WorldTransform) -> WorldTransform {
        let c = &child.linear;
        let col = |i: usize| {
            let v = self.transform_vector(Vec3::new(c[i][0], c[i][1], c[i][2]));
            [v.x, v.y, v.z]
        };
        WorldTransform {
            linear: [col(0), col(1), col(2)],
            translation: self.transform_point(child.translation),
        }
    }

    /// Column-major 4x4 matrix for GPU upload.
    pub fn to_mat4_f32(&self) -> [[f32; 4]; 4] {
        let m = &self.linear;
        let t = self.translation;
        [
            [m[0][0] as f32, m[0][1] as f32, m[0][2] as f32, 0.0],
            [m[1][0] as f32, m[1][1] as f32, m[1][2] as f32, 0.0],
            [m[2][0] as f32, m[2][1] as f32, m[2][2] as f32, 0.0],
            [t.x as f32, t.y as f32, t.z as f32, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use foundation::math::{Euler, Vec3};
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!(a.distance(b) < 1e-12, "expected {a:?} ~= {b:?}");
    }

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(transform.scale, 1.0);
    }

    #[test]
    fn world_transform_scales_rotates_then_translates() {
        let t = Transform::translate(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Euler::new(0.0, FRAC_PI_2, 0.0))
            .with_scale(2.0)
            .to_world();
        assert_vec_close(
            t.transform_point(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::new(10.0, 0.0, -2.0),
        );
    }

    #[test]
    fn compose_applies_child_first() {
        let parent = Transform::identity()
            .with_rotation(Euler::new(0.0, FRAC_PI_2, 0.0))
            .to_world();
        let child = Transform::translate(Vec3::new(1.0, 0.0, 0.0)).to_world();
        let world = parent.compose(&child);
        assert_vec_close(world.translation, Vec3::new(0.0, 0.0, -1.0));
        assert_vec_close(world.transform_point(Vec3::ZERO), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn mat4_carries_translation_in_last_column() {
        let m = Transform::translate(Vec3::new(1.0, 2.0, 3.0)).to_world().to_mat4_f32();
        assert_eq!(m[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
