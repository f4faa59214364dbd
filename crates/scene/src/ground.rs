use foundation::bounds::Aabb3;
use foundation::math::Vec3;
use terrain::{TerrainMesh, TextureBuffer};

use crate::components::{Material, Transform, rgb_hex};

/// Gray used for the placeholder floor and for terrain without imagery.
pub const GROUND_GRAY: u32 = 0xaaaaaa;

pub fn ground_material() -> Material {
    Material::unlit(rgb_hex(GROUND_GRAY)).double_sided()
}

/// Flat placeholder shown until a terrain arrives.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Floor {
    pub width: f64,
    pub depth: f64,
    pub material: Material,
    pub transform: Transform,
}

impl Default for Floor {
    fn default() -> Self {
        Self {
            width: 10.0,
            depth: 10.0,
            material: ground_material(),
            transform: Transform::identity(),
        }
    }
}

/// A built terrain, its optional imagery and where it sits in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSurface {
    pub mesh: TerrainMesh,
    pub texture: Option<TextureBuffer>,
    /// Used when there is no texture.
    pub material: Material,
    pub transform: Transform,
}

impl TerrainSurface {
    pub fn new(mesh: TerrainMesh, texture: Option<TextureBuffer>, transform: Transform) -> Self {
        Self {
            mesh,
            texture,
            material: ground_material(),
            transform,
        }
    }

    pub fn world_bounds(&self) -> Aabb3 {
        self.mesh.bounds().translated(self.transform.position)
    }
}

/// The scene's single ground object.
#[derive(Debug, Clone, PartialEq)]
pub enum Ground {
    Floor(Floor),
    Terrain(Box<TerrainSurface>),
}

impl Ground {
    pub fn is_terrain(&self) -> bool {
        matches!(self, Ground::Terrain(_))
    }

    pub fn as_terrain(&self) -> Option<&TerrainSurface> {
        match self {
            Ground::Terrain(surface) => Some(surface),
            Ground::Floor(_) => None,
        }
    }

    pub fn transform(&self) -> Transform {
        match self {
            Ground::Floor(floor) => floor.transform,
            Ground::Terrain(surface) => surface.transform,
        }
    }

    pub fn world_bounds(&self) -> Aabb3 {
        match self {
            Ground::Floor(floor) => {
                let half = Vec3::new(floor.width * 0.5, floor.depth * 0.5, 0.0);
                Aabb3::new(-half, half).translated(floor.transform.position)
            }
            Ground::Terrain(surface) => surface.world_bounds(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Ground::Floor(_) => "floor",
            Ground::Terrain(_) => "terrain",
        }
    }
}
