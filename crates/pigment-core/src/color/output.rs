//! Derived output: CSS strings, paint styles, display and serialized forms.
//!
//! CSS strings and paint styles are cached on the color's link and dropped on
//! every mutation (and, for gradient colors, on every gradient change).

use core::fmt;
use std::rc::Rc;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::coords::{Matrix, Point};
use crate::paint::{DrawingSurface, Gradient, GradientPaint, PaintStyle};

use super::{convert, Color, ColorError, Component, NumberFormat, Representation};

/// Alpha in CSS output keeps at most three decimals.
const CSS_ALPHA: NumberFormat = NumberFormat::new(3);

/// Focal points are pulled this far inside the outer circle.
const FOCUS_INSET: f64 = 0.1;

impl Color {
    fn rgb_bytes(&self) -> Result<[u8; 3], ColorError> {
        let rgb = convert::convert(self.repr, Representation::Rgb, &self.numbers(Representation::Rgb)?)?;
        let byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Ok([byte(rgb[0]), byte(rgb[1]), byte(rgb[2])])
    }

    /// CSS color string, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    ///
    /// Alpha is written only when it is below 1 and `omit_alpha` is false.
    /// Only alpha-aware renders are cached.
    pub fn to_css(&self, omit_alpha: bool) -> Result<String, ColorError> {
        if !omit_alpha {
            if let Some(css) = self.link.css.borrow().clone() {
                return Ok(css);
            }
        }
        let [r, g, b] = self.rgb_bytes()?;
        let alpha = self.alpha();
        let css = if omit_alpha || alpha >= 1.0 {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", CSS_ALPHA.number(alpha))
        };
        if !omit_alpha {
            log::trace!("caching css {css}");
            *self.link.css.borrow_mut() = Some(css.clone());
        }
        Ok(css)
    }

    /// `#rrggbb`, alpha ignored.
    pub fn to_css_hex(&self) -> Result<String, ColorError> {
        let [r, g, b] = self.rgb_bytes()?;
        Ok(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Paint style for drawing with this color on `surface`.
    ///
    /// Scalar colors yield their CSS string. Gradient colors build a linear or
    /// radial gradient object. When `matrix` is given, anchors are mapped
    /// through its inverse, for surfaces already transformed by `matrix`.
    /// Styles built without a matrix are cached.
    pub fn to_paint_style(
        &self,
        surface: &dyn DrawingSurface,
        matrix: Option<&Matrix>,
    ) -> Result<PaintStyle, ColorError> {
        if self.repr != Representation::Gradient {
            return Ok(PaintStyle::Solid(self.to_css(false)?));
        }
        if matrix.is_none() {
            if let Some(style) = self.link.paint.borrow().clone() {
                return Ok(style);
            }
        }

        let inverse = matrix
            .map(|m| {
                m.inverted().ok_or_else(|| {
                    ColorError::InvalidArguments("paint matrix is not invertible".to_string())
                })
            })
            .transpose()?;
        let map = |p: Point| inverse.map_or(p, |m| m.transform_point(p));

        let gradient = self.gradient()?;
        let origin = map(self.origin()?);
        let destination = map(self.destination()?);
        let mut paint = if gradient.is_radial() {
            let radius = origin.distance(destination);
            let focus = match self.highlight()? {
                Some(highlight) => {
                    let highlight = map(highlight);
                    let vector = highlight - origin;
                    if vector.length() > radius {
                        origin + vector.normalize(radius - FOCUS_INSET)
                    } else {
                        highlight
                    }
                }
                None => origin,
            };
            surface.create_radial_gradient(focus.x, focus.y, 0.0, origin.x, origin.y, radius)
        } else {
            surface.create_linear_gradient(origin.x, origin.y, destination.x, destination.y)
        };

        add_stops(&gradient, paint.as_mut())?;

        let style = PaintStyle::Gradient(Rc::from(paint));
        if matrix.is_none() {
            log::debug!("caching paint style for gradient color {:?}", self.id().map(|id| id.get()));
            *self.link.paint.borrow_mut() = Some(style.clone());
        }
        Ok(style)
    }

    /// Applies `matrix` to every anchor of a gradient color. No-op for other
    /// representations.
    pub fn transform(&mut self, matrix: &Matrix) {
        if self.repr != Representation::Gradient {
            return;
        }
        for component in &mut self.components {
            if let Component::Point(p) = component {
                *p = matrix.transform_point(*p);
            }
        }
        self.invalidate();
    }

    /// Compact array form: the representation name (except for gray and rgb)
    /// followed by the stored components. Alpha is not included.
    pub fn to_serialized(&self) -> Vec<SerializedValue> {
        let mut values = Vec::with_capacity(self.components.len() + 1);
        if !matches!(self.repr, Representation::Gray | Representation::Rgb) {
            values.push(SerializedValue::Name(self.repr.name()));
        }
        values.extend(self.components.iter().map(|c| match c {
            Component::Number(v) => SerializedValue::Number(*v),
            Component::Point(p) => SerializedValue::Point(*p),
            Component::Gradient(g) => SerializedValue::Gradient(Rc::clone(g)),
        }));
        values
    }

    /// The serialized form as JSON text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn add_stops(
    gradient: &Gradient,
    paint: &mut dyn GradientPaint,
) -> Result<(), ColorError> {
    let stops = gradient.stops();
    let last = stops.len().saturating_sub(1).max(1) as f64;
    for (i, stop) in stops.iter().enumerate() {
        let offset = stop.offset.unwrap_or(i as f64 / last);
        paint.add_color_stop(offset, &stop.color.to_css(false)?);
    }
    Ok(())
}

// ── Serialized form ───────────────────────────────────────────────────────

/// One element of [`Color::to_serialized`].
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedValue {
    Name(&'static str),
    Number(f64),
    Point(Point),
    Gradient(Rc<Gradient>),
}

impl Serialize for SerializedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SerializedValue::Name(name) => serializer.serialize_str(name),
            SerializedValue::Number(v) => serializer.serialize_f64(*v),
            SerializedValue::Point(p) => p.serialize(serializer),
            SerializedValue::Gradient(g) => g.serialize(serializer),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let values = self.to_serialized();
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in &values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl fmt::Display for Color {
    /// `{ red: 1, green: 0, blue: 0, alpha: 0.5 }`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        let names = self.repr.components().iter().map(|info| info.name);
        for (i, (name, component)) in names.zip(&self.components).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {component}")?;
        }
        if let Some(alpha) = self.alpha {
            write!(f, ", alpha: {}", NumberFormat::default().number(alpha))?;
        }
        f.write_str(" }")
    }
}
