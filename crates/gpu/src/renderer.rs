use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};
use foundation::math::Mat4;
use scene::components::{Material, Shape3D};
use scene::{EntityId, Geometry, SceneState};
use terrain::TextureBuffer;
use tracing::debug;

use crate::camera::Camera3D;
use crate::vertex::GpuMesh;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Viewport {
    pub fn aspect(&self) -> f64 {
        f64::from(self.width.max(1)) / f64::from(self.height.max(1))
    }
}

/// Per-frame uniform block.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameGlobals {
    pub view_proj: Mat4,
    pub light_dir: [f32; 3],
    pub light_intensity: f32,
    pub light_color: [f32; 3],
    pub _pad: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand {
    pub id: EntityId,
    pub model: Mat4,
    pub base_color: [f32; 4],
    pub textured: bool,
    pub double_sided: bool,
    pub unlit: bool,
    pub index_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub globals: FrameGlobals,
    pub commands: Vec<DrawCommand>,
    /// Entities whose buffers were (re)built for this frame.
    pub uploaded: Vec<EntityId>,
    /// Entities that left the scene; their buffers were dropped.
    pub evicted: Vec<EntityId>,
}

/// RGBA8 texture as handed to the GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureUpload {
    pub width: u32,
    pub height: u32,
    pub bytes_per_row: u32,
    pub data: Vec<u8>,
}

impl TextureUpload {
    fn from_buffer(texture: &TextureBuffer) -> Self {
        Self {
            width: texture.width() as u32,
            height: texture.height() as u32,
            bytes_per_row: texture.bytes_per_row() as u32,
            data: texture.as_bytes().to_vec(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum CacheKey {
    Shape(Shape3D),
    /// Terrain surfaces are immutable; a new terrain always has a new id.
    Terrain,
}

#[derive(Debug)]
struct CachedMesh {
    key: CacheKey,
    mesh: GpuMesh,
    texture: Option<TextureUpload>,
}

/// Turns the scene into draw commands, keeping GPU buffers per entity.
#[derive(Debug, Default)]
pub struct Renderer {
    viewport: Viewport,
    cache: BTreeMap<EntityId, CachedMesh>,
}

impl Renderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cache: BTreeMap::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn cached_mesh(&self, id: EntityId) -> Option<&GpuMesh> {
        self.cache.get(&id).map(|c| &c.mesh)
    }

    pub fn cached_texture(&self, id: EntityId) -> Option<&TextureUpload> {
        self.cache.get(&id).and_then(|c| c.texture.as_ref())
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn collect(&mut self, scene: &SceneState, camera: &Camera3D) -> RenderFrame {
        let drawables = scene.drawables();
        let mut commands = Vec::with_capacity(drawables.len());
        let mut uploaded = Vec::new();

        for drawable in &drawables {
            let key = match drawable.geometry {
                Geometry::Shape(shape) => CacheKey::Shape(shape),
                Geometry::Terrain(_) => CacheKey::Terrain,
            };
            let stale = self
                .cache
                .get(&drawable.id)
                .is_none_or(|cached| cached.key != key);
            if stale {
                let mesh = match drawable.geometry {
                    Geometry::Shape(shape) => GpuMesh::from_shape(shape),
                    Geometry::Terrain(mesh) => GpuMesh::from_terrain(mesh),
                };
                let texture = drawable.texture.map(TextureUpload::from_buffer);
                debug!(
                    entity = %drawable.id,
                    vertices = mesh.vertices.len(),
                    textured = texture.is_some(),
                    "uploading mesh"
                );
                self.cache.insert(drawable.id, CachedMesh { key, mesh, texture });
                uploaded.push(drawable.id);
            }

            let Some(cached) = self.cache.get(&drawable.id) else {
                continue;
            };
            commands.push(DrawCommand {
                id: drawable.id,
                model: drawable.transform.to_matrix(),
                base_color: base_color(drawable.material),
                textured: cached.texture.is_some(),
                double_sided: drawable.material.double_sided,
                unlit: drawable.material.unlit,
                index_count: cached.mesh.indices.len() as u32,
            });
        }

        let mut evicted = Vec::new();
        self.cache.retain(|id, _| {
            let live = drawables.iter().any(|d| d.id == *id);
            if !live {
                evicted.push(*id);
            }
            live
        });
        for id in &evicted {
            debug!(entity = %id, "evicted mesh");
        }

        let light = scene.light();
        let intensity = light.intensity as f32;
        RenderFrame {
            globals: FrameGlobals {
                view_proj: camera.view_proj(self.viewport.aspect()),
                light_dir: light.direction().to_f32(),
                light_intensity: intensity,
                light_color: light.color.map(|c| f32::from(c) / 255.0),
                _pad: 0.0,
            },
            commands,
            uploaded,
            evicted,
        }
    }
}

fn base_color(material: Material) -> [f32; 4] {
    let [r, g, b] = material.color.map(|c| f32::from(c) / 255.0);
    [r, g, b, 1.0]
}
