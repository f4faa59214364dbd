//! Terrain viewer: fetches one elevation sample, swaps it in for the
//! placeholder floor and keeps drawing the scene at a fixed rate.

pub mod compositor;
pub mod config;
pub mod fetch;
pub mod pipeline;
pub mod render_loop;

pub use compositor::*;
pub use fetch::*;
pub use pipeline::*;
pub use render_loop::*;

use foundation::math::Vec3;
use gpu::{Camera3D, FrameSink, Renderer};
use runtime::Inbox;
use scene::prefabs::{default_scene, spawn_demo_cube};

use crate::config::ViewerConfig;

/// Default scene, camera and controls wired into a render loop.
pub fn build_loop<S: FrameSink>(
    config: &ViewerConfig,
    inbox: Inbox<LoadOutcome>,
    sink: S,
) -> RenderLoop<S> {
    let mut scene = default_scene();
    if config.demo_cube {
        spawn_demo_cube(&mut scene);
    }
    let mut compositor = SceneCompositor::new(scene, Camera3D::default());
    if let Some(controls) = config.controls() {
        compositor = compositor.with_controls(controls);
    }
    compositor.place_camera(config.camera_position, Vec3::ZERO);

    RenderLoop::new(
        compositor,
        Renderer::new(config.viewport),
        sink,
        inbox,
        config.fps,
    )
    .with_max_frames(config.max_frames)
}
