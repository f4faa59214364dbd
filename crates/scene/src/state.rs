use terrain::{TerrainMesh, TextureBuffer};

use crate::components::{DirectionalLight, Drawable3D, Material, Shape3D, Transform};
use crate::entity::{EntityAllocator, EntityId};
use crate::ground::{Floor, Ground};
use crate::marker::Marker;

/// What the renderer has to draw for one object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Geometry<'a> {
    Shape(Shape3D),
    Terrain(&'a TerrainMesh),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneDrawable<'a> {
    pub id: EntityId,
    pub transform: Transform,
    pub geometry: Geometry<'a>,
    pub material: Material,
    pub texture: Option<&'a TextureBuffer>,
}

/// The live scene.
///
/// Always holds exactly one ground object and at most one marker. All
/// mutation goes through `&mut self`, so a reader never sees a half-applied
/// change. Every mutation bumps [`SceneState::revision`].
#[derive(Debug)]
pub struct SceneState {
    entities: EntityAllocator,
    ground_id: EntityId,
    ground: Ground,
    marker: Option<(EntityId, Marker)>,
    props: Vec<(EntityId, Transform, Drawable3D)>,
    light: DirectionalLight,
    revision: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(Floor::default())
    }
}

impl SceneState {
    pub fn new(floor: Floor) -> Self {
        let mut entities = EntityAllocator::new();
        let ground_id = entities.alloc();
        Self {
            entities,
            ground_id,
            ground: Ground::Floor(floor),
            marker: None,
            props: Vec::new(),
            light: DirectionalLight::default(),
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn ground_id(&self) -> EntityId {
        self.ground_id
    }

    /// Swap the ground object. The old id is retired and the previous ground
    /// is handed back.
    pub fn replace_ground(&mut self, ground: Ground) -> (EntityId, Ground) {
        let id = self.entities.alloc();
        let retired = std::mem::replace(&mut self.ground_id, id);
        self.entities.retire(retired);
        let previous = std::mem::replace(&mut self.ground, ground);
        self.revision += 1;
        (id, previous)
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref().map(|(_, m)| m)
    }

    pub fn marker_id(&self) -> Option<EntityId> {
        self.marker.as_ref().map(|(id, _)| *id)
    }

    /// Create the marker, or move the existing one (keeping its id).
    pub fn place_marker(&mut self, marker: Marker) -> EntityId {
        let id = match self.marker {
            Some((id, _)) => id,
            None => self.entities.alloc(),
        };
        self.marker = Some((id, marker));
        self.revision += 1;
        id
    }

    pub fn remove_marker(&mut self) -> Option<Marker> {
        let (id, marker) = self.marker.take()?;
        self.entities.retire(id);
        self.revision += 1;
        Some(marker)
    }

    pub fn spawn_prop(&mut self, transform: Transform, drawable: Drawable3D) -> EntityId {
        let id = self.entities.alloc();
        self.props.push((id, transform, drawable));
        self.revision += 1;
        id
    }

    pub fn props(&self) -> &[(EntityId, Transform, Drawable3D)] {
        &self.props
    }

    pub fn light(&self) -> DirectionalLight {
        self.light
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
        self.revision += 1;
    }

    /// `false` for ids of removed objects.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.is_alive(id)
    }

    pub fn object_count(&self) -> usize {
        self.entities.live_count()
    }

    /// Ground first, then props, then the marker.
    pub fn drawables(&self) -> Vec<SceneDrawable<'_>> {
        let mut out = Vec::with_capacity(self.props.len() + 2);
        out.push(match &self.ground {
            Ground::Floor(floor) => SceneDrawable {
                id: self.ground_id,
                transform: floor.transform,
                geometry: Geometry::Shape(Shape3D::Plane {
                    width: floor.width,
                    depth: floor.depth,
                }),
                material: floor.material,
                texture: None,
            },
            Ground::Terrain(surface) => SceneDrawable {
                id: self.ground_id,
                transform: surface.transform,
                geometry: Geometry::Terrain(&surface.mesh),
                material: surface.material,
                texture: surface.texture.as_ref(),
            },
        });
        for (id, transform, drawable) in &self.props {
            out.push(SceneDrawable {
                id: *id,
                transform: *transform,
                geometry: Geometry::Shape(drawable.shape),
                material: drawable.material,
                texture: None,
            });
        }
        if let Some((id, marker)) = &self.marker {
            let drawable = marker.drawable();
            out.push(SceneDrawable {
                id: *id,
                transform: marker.transform(),
                geometry: Geometry::Shape(drawable.shape),
                material: drawable.material,
                texture: None,
            });
        }
        out
    }
}
