//! Geometry types used by gradient colors.
//!
//! Coordinate space follows the drawing surface:
//! - Origin top-left
//! - +X right, +Y down

mod matrix;
mod point;

pub use matrix::Matrix;
pub use point::Point;
