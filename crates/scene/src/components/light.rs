use foundation::math::Vec3;
use terrain::Rgb;

/// Light arriving from `position` toward the origin, like the sun.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f64,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 1.0, 1.0),
            color: [255, 255, 255],
            intensity: 1.0,
        }
    }
}

impl DirectionalLight {
    /// Unit vector the light travels along.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or(-Vec3::UP)
    }
}
