use foundation::math::{Mat4, Vec3};

/// Placement of a scene object: uniform scale, then translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            scale: 1.0,
        }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Local point to world.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        point.scale(self.scale) + self.position
    }

    pub fn to_matrix(&self) -> Mat4 {
        let s = self.scale as f32;
        let [x, y, z] = self.position.to_f32();
        [
            [s, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, s, 0.0],
            [x, y, z, 1.0],
        ]
    }
}
