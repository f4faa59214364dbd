pub mod components;
pub mod entity;
pub mod ground;
pub mod marker;
pub mod prefabs;
pub mod state;

pub use entity::*;
pub use ground::*;
pub use marker::*;
pub use state::*;
