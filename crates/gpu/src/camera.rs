use foundation::math::{Mat4, Vec3, mat4_look_at_rh, mat4_mul, mat4_perspective_rh_z0};

/// Perspective camera in a z-up world.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, -5.0, 5.0), Vec3::ZERO)
    }
}

impl Camera3D {
    /// 75 degree vertical FOV, clip planes at 0.1 and 1000.
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::UP,
            fov_y_rad: 75f64.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn place(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Eye relative to the target.
    pub fn offset(&self) -> Vec3 {
        self.position - self.target
    }

    pub fn distance(&self) -> f64 {
        self.offset().length()
    }

    /// Aim at `target`, carrying the eye along so the viewing offset stays.
    pub fn retarget(&mut self, target: Vec3) {
        let offset = self.offset();
        self.target = target;
        self.position = target + offset;
    }

    pub fn view(&self) -> Mat4 {
        mat4_look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self, aspect: f64) -> Mat4 {
        mat4_perspective_rh_z0(self.fov_y_rad, aspect, self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f64) -> Mat4 {
        mat4_mul(self.projection(aspect), self.view())
    }
}
