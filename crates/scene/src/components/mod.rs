pub mod drawable3d;
pub mod light;
pub mod transform;

pub use drawable3d::*;
pub use light::*;
pub use transform::*;
