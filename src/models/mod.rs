// Data models and response shapes

pub mod exercise;
pub mod set;
pub mod workout;

pub use exercise::*;
pub use set::*;
pub use workout::*;
