pub mod euler;
pub mod latlon;
pub mod sphere;
pub mod vec;

pub use euler::*;
pub use latlon::*;
pub use sphere::*;
pub use vec::*;
