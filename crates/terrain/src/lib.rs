//! Heightmap terrain synthesis.
//!
//! Turns one validated elevation sample into GPU-ready pieces: an RGBA
//! texture, a displaced and smooth-shaded mesh, and the offset that puts the
//! queried cell at the world origin. Everything here is pure and owns no
//! shared state, so texture and mesh can be built independently.

pub mod error;
pub mod grid;
pub mod mesh;
pub mod recenter;
pub mod texture;

pub use error::*;
pub use grid::*;
pub use mesh::*;
pub use recenter::*;
pub use texture::*;
