pub mod color;
pub mod geometry;

pub use crate::color::{Color, Hsl, ParseHslError};
pub use crate::geometry::{Point, Rect};
