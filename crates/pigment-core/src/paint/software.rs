use core::any::Any;

use crate::coords::Point;

use super::keywords;
use super::{DrawingSurface, GradientPaint};

/// Geometry of a recorded gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    Linear {
        start: Point,
        end: Point,
    },
    Radial {
        focus: Point,
        focus_radius: f64,
        center: Point,
        radius: f64,
    },
}

/// Gradient paint recorded by [`SoftwareSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedGradient {
    pub shape: GradientShape,
    /// `(offset, css color)` in insertion order.
    pub stops: Vec<(f64, String)>,
}

impl GradientPaint for RecordedGradient {
    fn add_color_stop(&mut self, offset: f64, color: &str) {
        self.stops.push((offset.clamp(0.0, 1.0), color.to_string()));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// In-memory drawing surface.
///
/// Resolves the CSS named colors and records gradients instead of rasterizing
/// them. Used as the default surface for string parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareSurface;

impl SoftwareSurface {
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl DrawingSurface for SoftwareSurface {
    fn resolve_named_color(&self, name: &str) -> Option<[f64; 3]> {
        keywords::lookup(name).map(|[r, g, b]| {
            [f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0]
        })
    }

    fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Box<dyn GradientPaint> {
        Box::new(RecordedGradient {
            shape: GradientShape::Linear {
                start: Point::new(x0, y0),
                end: Point::new(x1, y1),
            },
            stops: Vec::new(),
        })
    }

    fn create_radial_gradient(
        &self,
        fx: f64,
        fy: f64,
        r0: f64,
        cx: f64,
        cy: f64,
        r1: f64,
    ) -> Box<dyn GradientPaint> {
        Box::new(RecordedGradient {
            shape: GradientShape::Radial {
                focus: Point::new(fx, fy),
                focus_radius: r0,
                center: Point::new(cx, cy),
                radius: r1,
            },
            stops: Vec::new(),
        })
    }
}
