use core::any::Any;
use core::fmt;
use std::rc::Rc;

/// Renderer-native gradient object under construction.
pub trait GradientPaint: fmt::Debug {
    /// Adds a stop at `offset` (`[0, 1]`) with a CSS color string.
    fn add_color_stop(&mut self, offset: f64, color: &str);

    /// Allows callers that know the concrete surface to inspect the result.
    fn as_any(&self) -> &dyn Any;
}

/// Drawing surface collaborator.
///
/// Resolves color names the way the renderer would and creates gradient
/// paint objects. Implementations are expected to be used from one thread.
pub trait DrawingSurface {
    /// Resolves a color name to `[r, g, b]` in `[0, 1]`.
    ///
    /// `None` means the surface does not know the name.
    fn resolve_named_color(&self, name: &str) -> Option<[f64; 3]>;

    fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Box<dyn GradientPaint>;

    /// Radial gradient from the focal circle `(fx, fy, r0)` to the outer
    /// circle `(cx, cy, r1)`.
    fn create_radial_gradient(
        &self,
        fx: f64,
        fy: f64,
        r0: f64,
        cx: f64,
        cy: f64,
        r1: f64,
    ) -> Box<dyn GradientPaint>;
}

/// Paint style produced for a color.
#[derive(Debug, Clone)]
pub enum PaintStyle {
    /// CSS color string.
    Solid(String),
    Gradient(Rc<dyn GradientPaint>),
}

impl PaintStyle {
    #[inline]
    pub fn as_css(&self) -> Option<&str> {
        match self {
            PaintStyle::Solid(css) => Some(css),
            PaintStyle::Gradient(_) => None,
        }
    }

    #[inline]
    pub fn as_gradient(&self) -> Option<&dyn GradientPaint> {
        match self {
            PaintStyle::Solid(_) => None,
            PaintStyle::Gradient(g) => Some(&**g),
        }
    }

    /// True when both styles are the same cached object or equal CSS strings.
    pub fn same_as(&self, other: &PaintStyle) -> bool {
        match (self, other) {
            (PaintStyle::Solid(a), PaintStyle::Solid(b)) => a == b,
            (PaintStyle::Gradient(a), PaintStyle::Gradient(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
