pub mod point;
pub mod unit;

pub use point::*;
pub use unit::*;
