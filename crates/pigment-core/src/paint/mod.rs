//! Paint collaborators used by colors.
//!
//! Scope:
//! - the drawing-surface interface (named color resolution, gradient objects)
//! - shared gradient definitions
//! - an in-memory surface that knows the CSS named colors
//!
//! Geometry types remain in `coords`.

mod gradient;
mod keywords;
mod software;
mod surface;

pub use gradient::{Gradient, GradientStop};
pub use software::{GradientShape, RecordedGradient, SoftwareSurface};
pub use surface::{DrawingSurface, GradientPaint, PaintStyle};
