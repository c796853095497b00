pub mod drawable3d;
pub mod tint;
pub mod transform;
pub mod visibility;

pub use drawable3d::*;
pub use tint::*;
pub use transform::*;
pub use visibility::*;
