//! Owns the live scene and the camera looking at it.
//!
//! All mutation happens on the render loop's thread through `&mut self`, so
//! a terrain swap (ground, marker, camera) is never observed half-done.

use foundation::math::Vec3;
use gpu::{Camera3D, OrbitControls};
use scene::components::Transform;
use scene::{EntityId, Ground, Marker, MarkerStyle, SceneState, TerrainSurface};
use streaming::TerrainPayload;
use terrain::{RecenterOffset, TerrainError, TerrainMesh, TextureBuffer};
use tracing::{debug, info};

use crate::pipeline::prepare_terrain;

/// What a terrain load changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TerrainLoaded {
    pub ground: EntityId,
    pub marker: EntityId,
    /// Kind of the ground object that was removed.
    pub replaced: &'static str,
}

#[derive(Debug)]
pub struct SceneCompositor {
    scene: SceneState,
    camera: Camera3D,
    controls: Option<OrbitControls>,
}

impl SceneCompositor {
    pub fn new(scene: SceneState, camera: Camera3D) -> Self {
        Self {
            scene,
            camera,
            controls: None,
        }
    }

    pub fn with_controls(mut self, mut controls: OrbitControls) -> Self {
        controls.sync(&self.camera);
        self.controls = Some(controls);
        self
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut()
    }

    /// Set the viewing pose and drop any pending control motion.
    pub fn place_camera(&mut self, position: Vec3, look_at: Vec3) {
        self.camera.place(position, look_at);
        if let Some(controls) = &mut self.controls {
            controls.sync(&self.camera);
        }
        debug!(
            x = position.x,
            y = position.y,
            z = position.z,
            "camera placed"
        );
    }

    /// Replace the ground with `mesh`, shifted by `offset`, and stand the
    /// marker at the origin. The camera keeps its offset and re-aims at the
    /// origin.
    pub fn load_terrain(
        &mut self,
        mesh: TerrainMesh,
        texture: Option<TextureBuffer>,
        offset: RecenterOffset,
        marker_style: MarkerStyle,
    ) -> Result<TerrainLoaded, TerrainError> {
        if let Some(texture) = &texture {
            for (what, expected, actual) in [
                ("texture width", mesh.width(), texture.width()),
                ("texture height", mesh.height(), texture.height()),
            ] {
                if expected != actual {
                    return Err(TerrainError::ShapeMismatch {
                        what,
                        expected,
                        actual,
                    });
                }
            }
        }

        let vertices = mesh.vertex_count();
        let textured = texture.is_some();
        let placement = Transform::translate(offset.translation());
        let surface = TerrainSurface::new(mesh, texture, placement);
        let (ground, previous) = self.scene.replace_ground(Ground::Terrain(Box::new(surface)));
        let marker = self
            .scene
            .place_marker(Marker::at_origin(offset.dz, marker_style));

        self.camera.retarget(Vec3::ZERO);
        if let Some(controls) = &mut self.controls {
            controls.sync(&self.camera);
        }

        info!(
            ground = %ground,
            replaced = previous.kind(),
            vertices,
            textured,
            dx = offset.dx,
            dy = offset.dy,
            dz = offset.dz,
            "terrain loaded"
        );
        Ok(TerrainLoaded {
            ground,
            marker,
            replaced: previous.kind(),
        })
    }

    /// Build and load a payload. On error the scene is left untouched.
    pub fn apply_payload(
        &mut self,
        payload: &TerrainPayload,
        marker_style: MarkerStyle,
    ) -> Result<TerrainLoaded, TerrainError> {
        let prepared = prepare_terrain(payload)?;
        self.load_terrain(
            prepared.mesh,
            prepared.texture,
            prepared.offset,
            marker_style,
        )
    }

    /// Returns whether the camera moved.
    pub fn update_controls(&mut self, dt_s: f64) -> bool {
        match &mut self.controls {
            Some(controls) => controls.update(&mut self.camera, dt_s),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SceneCompositor;
    use foundation::math::Vec3;
    use gpu::{Camera3D, OrbitControls};
    use pretty_assertions::assert_eq;
    use scene::MarkerStyle;
    use scene::prefabs::{default_scene, spawn_demo_cube};
    use streaming::TerrainPayload;
    use terrain::{ElevationGrid, RecenterOffset, TerrainError, TextureBuffer, build_mesh};

    fn compositor() -> SceneCompositor {
        SceneCompositor::new(default_scene(), Camera3D::default())
            .with_controls(OrbitControls::default())
    }

    fn payload(values: Vec<f64>) -> TerrainPayload {
        TerrainPayload {
            grid: ElevationGrid::new(2, 2, values, 0, 0).expect("grid"),
            satellite: None,
        }
    }

    #[test]
    fn first_load_replaces_floor_and_places_marker() {
        let mut compositor = compositor();
        let floor = compositor.scene().ground_id();

        let loaded = compositor
            .apply_payload(&payload(vec![1.0, 2.0, 3.0, 4.0]), MarkerStyle::default())
            .expect("loaded");
        assert_eq!(loaded.replaced, "floor");

        let scene = compositor.scene();
        assert!(!scene.contains(floor));
        assert_eq!(scene.ground_id(), loaded.ground);
        let surface = scene.ground().as_terrain().expect("terrain");
        assert_eq!(surface.transform.position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(surface.world_bounds().min, Vec3::new(0.0, 0.0, 1.0));

        let marker = scene.marker().expect("marker");
        assert_eq!(scene.marker_id(), Some(loaded.marker));
        assert_eq!(marker.position, Vec3::ZERO);
        assert_eq!(marker.stem_height, 1.0);
        assert_eq!(compositor.camera().target, Vec3::ZERO);
    }

    #[test]
    fn second_load_keeps_a_single_ground() {
        let mut compositor = compositor();
        spawn_demo_cube(compositor.scene_mut());
        let first = compositor
            .apply_payload(&payload(vec![1.0, 2.0, 3.0, 4.0]), MarkerStyle::default())
            .expect("first");
        let second = compositor
            .apply_payload(&payload(vec![7.0; 4]), MarkerStyle::default())
            .expect("second");

        assert_eq!(second.replaced, "terrain");
        assert_eq!(first.marker, second.marker);
        let scene = compositor.scene();
        assert!(!scene.contains(first.ground));
        // ground, cube, marker
        assert_eq!(scene.object_count(), 3);
        assert_eq!(scene.marker().map(|m| m.stem_height), Some(7.0));
    }

    #[test]
    fn rejected_payload_leaves_scene_untouched() {
        let mut compositor = compositor();
        let revision = compositor.scene().revision();
        let ground = compositor.scene().ground_id();

        let mut bad = payload(vec![1.0, 2.0, 3.0, 4.0]);
        bad.grid.values.truncate(2);
        let err = compositor
            .apply_payload(&bad, MarkerStyle::default())
            .expect_err("rejected");
        assert!(matches!(err, TerrainError::DimensionMismatch { .. }));
        assert_eq!(compositor.scene().revision(), revision);
        assert_eq!(compositor.scene().ground_id(), ground);
        assert!(compositor.scene().marker().is_none());
    }

    #[test]
    fn mismatched_texture_is_rejected_before_mutation() {
        let mut compositor = compositor();
        let revision = compositor.scene().revision();
        let grid = ElevationGrid::flat(2, 2, 0.0).expect("grid");
        let mesh = build_mesh(&grid, None).expect("mesh");
        let texture = TextureBuffer::solid(3, 2, [0, 0, 0]).expect("texture");

        let err = compositor
            .load_terrain(
                mesh,
                Some(texture),
                RecenterOffset::default(),
                MarkerStyle::default(),
            )
            .expect_err("rejected");
        assert!(matches!(
            err,
            TerrainError::ShapeMismatch {
                what: "texture width",
                ..
            }
        ));
        assert_eq!(compositor.scene().revision(), revision);
    }

    #[test]
    fn camera_keeps_offset_when_retargeted() {
        let mut compositor = compositor();
        compositor.place_camera(Vec3::new(2.0, -3.0, 4.0), Vec3::new(2.0, 0.0, 0.0));
        compositor
            .apply_payload(&payload(vec![0.0; 4]), MarkerStyle::default())
            .expect("loaded");
        let camera = compositor.camera();
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.position, Vec3::new(0.0, -3.0, 4.0));
        assert!(!compositor.update_controls(1.0 / 60.0));
    }

    #[test]
    fn place_camera_discards_pending_motion() {
        let mut compositor = compositor();
        if let Some(controls) = compositor.controls_mut() {
            controls.rotate_left(1.0);
        }
        compositor.place_camera(Vec3::new(0.0, -5.0, 5.0), Vec3::ZERO);
        assert!(!compositor.controls().expect("controls").has_pending_motion());
    }
}
