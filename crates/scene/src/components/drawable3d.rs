use terrain::Rgb;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    /// Flat rectangle in the xy plane, centered on the origin.
    Plane { width: f64, depth: f64 },
    Cube { size: f64 },
    Sphere { radius: f64 },
    /// Vertical stem from `z = 0` up to `height`, capped by a sphere.
    Pin { radius: f64, height: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Material {
    pub color: Rgb,
    pub double_sided: bool,
    /// Ignore scene lighting.
    pub unlit: bool,
}

impl Material {
    pub fn lit(color: Rgb) -> Self {
        Self {
            color,
            double_sided: false,
            unlit: false,
        }
    }

    pub fn unlit(color: Rgb) -> Self {
        Self {
            color,
            double_sided: false,
            unlit: true,
        }
    }

    pub fn double_sided(self) -> Self {
        Self {
            double_sided: true,
            ..self
        }
    }
}

/// `0xRRGGBB` to channels.
pub fn rgb_hex(hex: u32) -> Rgb {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub material: Material,
}

impl Drawable3D {
    pub fn cube(size: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Cube { size },
            material,
        }
    }

    pub fn sphere(radius: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Sphere { radius },
            material,
        }
    }

    pub fn plane(width: f64, depth: f64, material: Material) -> Self {
        Self {
            shape: Shape3D::Plane { width, depth },
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawable3D, Material, Shape3D, rgb_hex};

    #[test]
    fn hex_colors_split_into_channels() {
        assert_eq!(rgb_hex(0x00ff00), [0, 255, 0]);
        assert_eq!(rgb_hex(0xaaaaaa), [0xaa, 0xaa, 0xaa]);
        assert_eq!(rgb_hex(0x123456), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn plane_keeps_material_flags() {
        let drawable = Drawable3D::plane(10.0, 10.0, Material::unlit([1, 2, 3]).double_sided());
        assert!(matches!(drawable.shape, Shape3D::Plane { width, .. } if width == 10.0));
        assert!(drawable.material.double_sided);
        assert!(drawable.material.unlit);
    }
}
