pub mod event_bus;
pub mod frame;
pub mod load;

pub use event_bus::*;
pub use frame::*;
pub use load::*;
