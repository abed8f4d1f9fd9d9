use core::fmt;
use std::rc::Rc;

use crate::coords::Point;
use crate::paint::Gradient;

use super::NumberFormat;

/// One stored component of a color.
///
/// Scalar representations hold only `Number`s. Gradient colors hold a shared
/// `Gradient` reference followed by `Point` anchors.
#[derive(Debug, Clone)]
pub enum Component {
    Number(f64),
    Point(Point),
    Gradient(Rc<Gradient>),
}

impl Component {
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Component::Number(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_point(&self) -> Option<Point> {
        match *self {
            Component::Point(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn as_gradient(&self) -> Option<&Rc<Gradient>> {
        match self {
            Component::Gradient(g) => Some(g),
            _ => None,
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Component::Number(a), Component::Number(b)) => a == b,
            (Component::Point(a), Component::Point(b)) => a == b,
            (Component::Gradient(a), Component::Gradient(b)) => Rc::ptr_eq(a, b) || **a == **b,
            _ => false,
        }
    }
}

impl From<f64> for Component {
    #[inline]
    fn from(v: f64) -> Self {
        Component::Number(v)
    }
}

impl From<Point> for Component {
    #[inline]
    fn from(p: Point) -> Self {
        Component::Point(p)
    }
}

impl From<(f64, f64)> for Component {
    #[inline]
    fn from(p: (f64, f64)) -> Self {
        Component::Point(p.into())
    }
}

impl From<Rc<Gradient>> for Component {
    #[inline]
    fn from(g: Rc<Gradient>) -> Self {
        Component::Gradient(g)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Number(v) => f.write_str(&NumberFormat::default().number(*v)),
            Component::Point(p) => fmt::Display::fmt(p, f),
            Component::Gradient(g) => fmt::Display::fmt(&**g, f),
        }
    }
}
