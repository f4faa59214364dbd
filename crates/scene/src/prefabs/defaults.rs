use crate::SceneState;
use crate::components::{DirectionalLight, Drawable3D, Material, Transform, rgb_hex};
use crate::entity::EntityId;
use crate::ground::Floor;

pub const DEMO_CUBE_GREEN: u32 = 0x00ff00;

/// Scene shown before any terrain: gray floor, white light from `(1, 1, 1)`.
pub fn default_scene() -> SceneState {
    let mut scene = SceneState::new(Floor::default());
    scene.set_light(DirectionalLight::default());
    scene
}

/// Unit green cube centered on the origin.
pub fn spawn_demo_cube(scene: &mut SceneState) -> EntityId {
    scene.spawn_prop(
        Transform::identity(),
        Drawable3D::cube(1.0, Material::lit(rgb_hex(DEMO_CUBE_GREEN))),
    )
}

#[cfg(test)]
mod tests {
    use super::{default_scene, spawn_demo_cube};
    use crate::components::Shape3D;
    use crate::ground::Ground;
    use foundation::math::Vec3;

    #[test]
    fn default_scene_has_floor_and_light() {
        let scene = default_scene();
        assert!(matches!(scene.ground(), Ground::Floor(_)));
        assert_eq!(scene.light().position, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(scene.light().intensity, 1.0);
        assert!(scene.props().is_empty());
    }

    #[test]
    fn demo_cube_is_green_unit_cube() {
        let mut scene = default_scene();
        let id = spawn_demo_cube(&mut scene);
        let (prop_id, _, drawable) = scene.props()[0];
        assert_eq!(prop_id, id);
        assert_eq!(drawable.shape, Shape3D::Cube { size: 1.0 });
        assert_eq!(drawable.material.color, [0, 255, 0]);
    }
}
