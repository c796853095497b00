//! Satellite sweep simulation over a globe with ground markers.

pub mod config;
pub mod context;
pub mod input;
pub mod marker;
pub mod sweep;

pub use config::*;
pub use context::*;
pub use input::*;
pub use marker::*;
pub use sweep::*;
