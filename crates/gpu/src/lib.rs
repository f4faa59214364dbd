//! Rendering front end: camera and orbit controls, GPU-ready buffers and
//! per-frame draw lists built from the scene.

pub mod camera;
pub mod controls;
pub mod renderer;
pub mod sink;
pub mod vertex;

pub use camera::*;
pub use controls::*;
pub use renderer::*;
pub use sink::*;
pub use vertex::*;
