use foundation::math::Vec3;

use crate::components::{Drawable3D, Material, Shape3D, Transform, rgb_hex};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub material: Material,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 0.15,
            material: Material::lit(rgb_hex(0xff3030)),
        }
    }
}

/// Point-of-interest pin.
///
/// Stands at `position` (the world origin after recentering) with a stem that
/// reaches up to the surface elevation of the queried cell.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marker {
    pub position: Vec3,
    pub stem_height: f64,
    pub style: MarkerStyle,
}

impl Marker {
    pub fn at_origin(stem_height: f64, style: MarkerStyle) -> Self {
        Self {
            position: Vec3::ZERO,
            stem_height,
            style,
        }
    }

    pub fn tip(&self) -> Vec3 {
        self.position + Vec3::new(0.0, 0.0, self.stem_height)
    }

    pub fn transform(&self) -> Transform {
        Transform::translate(self.position)
    }

    pub fn drawable(&self) -> Drawable3D {
        Drawable3D {
            shape: Shape3D::Pin {
                radius: self.style.radius,
                height: self.stem_height,
            },
            material: self.style.material,
        }
    }
}
