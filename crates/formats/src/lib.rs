pub mod marker_list;
pub mod obj;

pub use marker_list::*;
pub use obj::*;
