pub mod batch;
pub mod camera;
pub mod renderer;

pub use batch::*;
pub use camera::*;
pub use renderer::*;
