pub mod globe;
pub mod marker;
pub mod satellite;

pub use globe::*;
pub use marker::*;
pub use satellite::*;
