use foundation::math::Vec3;

/// Column-major 4x4 matrix as uploaded to WGSL.
pub type Mat4 = [[f32; 4]; 4];

pub const MIN_DISTANCE: f64 = 0.75;
pub const MAX_DISTANCE: f64 = 50.0;
const MAX_PITCH_RAD: f64 = 1.55;

/// Orbit camera around a target point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub yaw_rad: f64,
    pub pitch_rad: f64,
    pub distance: f64,
    pub target: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for OrbitCamera {
    /// Looking at the origin from +z, two units out.
    fn default() -> Self {
        Self {
            yaw_rad: std::f64::consts::FRAC_PI_2,
            pitch_rad: 0.0,
            distance: 2.0,
            target: Vec3::ZERO,
            fov_y_rad: 60f64.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl OrbitCamera {
    fn direction(&self) -> Vec3 {
        Vec3::new(
            self.pitch_rad.cos() * self.yaw_rad.cos(),
            self.pitch_rad.sin(),
            self.pitch_rad.cos() * self.yaw_rad.sin(),
        )
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.direction() * self.distance
    }

    pub fn view_proj(&self, canvas_width: f64, canvas_height: f64) -> Mat4 {
        let aspect = if canvas_height <= 0.0 {
            1.0
        } else {
            (canvas_width / canvas_height).max(1e-6)
        };
        let view = look_at_rh(self.eye(), self.target, Vec3::new(0.0, 1.0, 0.0));
        let proj = perspective_rh_z0(self.fov_y_rad, aspect, self.near, self.far);
        mat4_mul(proj, view)
    }

    /// Pointer drag in pixels.
    pub fn orbit(&mut self, delta_x_px: f64, delta_y_px: f64) {
        let speed = 0.005;
        self.yaw_rad += delta_x_px * speed;
        self.pitch_rad = (self.pitch_rad + delta_y_px * speed).clamp(-MAX_PITCH_RAD, MAX_PITCH_RAD);
    }

    /// Moves the target in the view plane; pointer delta in pixels.
    pub fn pan(&mut self, delta_x_px: f64, delta_y_px: f64) {
        let forward = (self.direction() * -1.0).normalized();
        let right = forward.cross(Vec3::new(0.0, 1.0, 0.0)).normalized();
        let up = right.cross(forward);

        let scale = self.distance * 0.002;
        self.target = self.target + right * (-delta_x_px * scale) + up * (delta_y_px * scale);
    }

    /// Dolly by a wheel `deltaY`.
    pub fn zoom(&mut self, wheel_delta_y: f64) {
        let factor = (wheel_delta_y * 0.0015).exp();
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// `a * b`, both column-major.
pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

pub fn mat4_transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
    }
    out
}

/// Right-handed perspective with depth mapped to `[0, 1]`.
pub fn perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;
    [
        [(f / aspect) as f32, 0.0, 0.0, 0.0],
        [0.0, f as f32, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);
    [
        [s.x as f32, u.x as f32, -f.x as f32, 0.0],
        [s.y as f32, u.y as f32, -f.y as f32, 0.0],
        [s.z as f32, u.z as f32, -f.z as f32, 0.0],
        [-s.dot(eye) as f32, -u.dot(eye) as f32, f.dot(eye) as f32, 1.0],
    ]
}
