//! Named component access.
//!
//! Every component in the representation table can be read and written on
//! any color:
//!
//! - Reading a component of another representation converts a copy; the
//!   color itself is untouched.
//! - Writing one converts the color in place to the owning representation,
//!   then stores the normalized value.
//! - `hue` and `saturation` are read and written directly on both `hsb` and
//!   `hsl` colors, without converting between the two.

use std::rc::Rc;

use crate::coords::Point;
use crate::paint::Gradient;

use super::repr::is_overlap_name;
use super::{Color, ColorError, Component, ComponentInfo, ComponentKind, Representation};

/// Checks the value kind against the slot and normalizes numbers.
pub(crate) fn normalize_component(
    info: ComponentInfo,
    value: Component,
) -> Result<Component, ColorError> {
    match (info.kind, value) {
        (kind, Component::Number(v)) if kind.is_numeric() => Ok(Component::Number(kind.normalize(v))),
        (kind, Component::Point(p)) if kind.is_point() => Ok(Component::Point(p)),
        (ComponentKind::Gradient, Component::Gradient(g)) => Ok(Component::Gradient(g)),
        (kind, _) => Err(ColorError::InvalidComponent { name: info.name, expected: kind.expected() }),
    }
}

impl Color {
    /// Resolves `name` to the representation it is read from or written to
    /// on this color.
    fn target(&self, name: &str) -> Result<(Representation, usize, ComponentInfo), ColorError> {
        let (owner, index, info) = Representation::owner_of(name)
            .ok_or_else(|| ColorError::UnknownComponent(name.to_string()))?;
        if is_overlap_name(info.name) && self.repr.is_hue_based() {
            return Ok((self.repr, index, info));
        }
        Ok((owner, index, info))
    }

    /// Reads a component by name.
    ///
    /// Returns `Ok(None)` only for an unset gradient highlight.
    pub fn get(&self, name: &str) -> Result<Option<Component>, ColorError> {
        let (repr, index, _) = self.target(name)?;
        if repr == self.repr {
            return Ok(self.components.get(index).cloned());
        }
        Ok(self.convert_components(repr)?.into_iter().nth(index))
    }

    /// Writes a component by name, converting this color to the component's
    /// representation first when needed.
    pub fn set(&mut self, name: &str, value: impl Into<Component>) -> Result<(), ColorError> {
        let (repr, index, info) = self.target(name)?;
        let value = normalize_component(info, value.into())?;
        if repr != self.repr {
            self.components = self.convert_components(repr)?;
            self.repr = repr;
        }
        if let Component::Gradient(gradient) = &value {
            gradient.add_owner(&self.link);
        }
        if index < self.components.len() {
            let old = core::mem::replace(&mut self.components[index], value);
            if let (Component::Gradient(old), Component::Gradient(new)) = (&old, &self.components[index]) {
                if !Rc::ptr_eq(old, new) {
                    old.remove_owner(&self.link);
                }
            }
        } else {
            self.components.push(value);
        }
        self.invalidate();
        Ok(())
    }

    fn number(&self, name: &str) -> Result<f64, ColorError> {
        self.get(name)?
            .and_then(|c| c.as_number())
            .ok_or_else(|| ColorError::UnknownComponent(name.to_string()))
    }

    fn point(&self, name: &'static str) -> Result<Option<Point>, ColorError> {
        Ok(self.get(name)?.and_then(|c| c.as_point()))
    }

    pub fn gradient(&self) -> Result<Rc<Gradient>, ColorError> {
        match self.get("gradient")? {
            Some(Component::Gradient(g)) => Ok(g),
            _ => Err(ColorError::InvalidComponent { name: "gradient", expected: "a gradient" }),
        }
    }

    pub fn set_gradient(&mut self, gradient: Rc<Gradient>) -> Result<(), ColorError> {
        self.set("gradient", gradient)
    }

    pub fn origin(&self) -> Result<Point, ColorError> {
        Ok(self.point("origin")?.unwrap_or_default())
    }

    pub fn set_origin(&mut self, origin: impl Into<Point>) -> Result<(), ColorError> {
        self.set("origin", origin.into())
    }

    pub fn destination(&self) -> Result<Point, ColorError> {
        Ok(self.point("destination")?.unwrap_or_default())
    }

    pub fn set_destination(&mut self, destination: impl Into<Point>) -> Result<(), ColorError> {
        self.set("destination", destination.into())
    }

    /// Focal point of a radial gradient, if one was set.
    pub fn highlight(&self) -> Result<Option<Point>, ColorError> {
        self.point("highlight")
    }

    pub fn set_highlight(&mut self, highlight: impl Into<Point>) -> Result<(), ColorError> {
        self.set("highlight", highlight.into())
    }

    /// Removes the highlight of a gradient color. No-op for other colors.
    pub fn clear_highlight(&mut self) {
        if self.repr == Representation::Gradient && self.components.len() > 3 {
            self.components.truncate(3);
            self.invalidate();
        }
    }
}

macro_rules! scalar_accessors {
    ($($(#[$doc:meta])* $getter:ident, $setter:ident => $name:literal;)*) => {
        impl Color {
            $(
                $(#[$doc])*
                pub fn $getter(&self) -> Result<f64, ColorError> {
                    self.number($name)
                }

                #[doc = concat!("Sets `", $name, "`, converting the color if needed.")]
                pub fn $setter(&mut self, value: f64) -> Result<(), ColorError> {
                    self.set($name, value)
                }
            )*
        }
    };
}

scalar_accessors! {
    /// Gray level (NTSC luma when read from other representations).
    /// Named apart from the [`Color::gray`] constructor.
    gray_level, set_gray => "gray";
    red, set_red => "red";
    green, set_green => "green";
    blue, set_blue => "blue";
    /// Hue in degrees; shared by `hsb` and `hsl`.
    hue, set_hue => "hue";
    /// Saturation; shared by `hsb` and `hsl`.
    saturation, set_saturation => "saturation";
    brightness, set_brightness => "brightness";
    lightness, set_lightness => "lightness";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::GradientStop;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── reading ───────────────────────────────────────────────────────────

    #[test]
    fn reading_other_representation_does_not_mutate() {
        let c = Color::rgb(1.0, 0.0, 0.0);
        assert!(close(c.hue().unwrap(), 0.0));
        assert!(close(c.lightness().unwrap(), 0.5));
        assert!(close(c.brightness().unwrap(), 1.0));
        assert_eq!(c.representation(), Representation::Rgb);
    }

    #[test]
    fn hue_reads_directly_on_hsb_and_hsl() {
        let hsb = Color::hsb(120.0, 0.5, 0.5);
        assert_eq!(hsb.hue().unwrap(), 120.0);
        assert_eq!(hsb.saturation().unwrap(), 0.5);
        assert_eq!(hsb.representation(), Representation::Hsb);

        let hsl = Color::hsl(200.0, 0.25, 0.5);
        assert_eq!(hsl.saturation().unwrap(), 0.25);
    }

    #[test]
    fn gray_level_reads_luma_of_any_color() {
        assert_eq!(Color::gray(0.25).gray_level().unwrap(), 0.25);
        assert!(close(Color::rgb(0.0, 1.0, 0.0).gray_level().unwrap(), 0.587));
        let mut c = Color::rgb(1.0, 0.0, 0.0);
        c.set_gray(0.5).unwrap();
        assert_eq!(c.representation(), Representation::Gray);
        assert_eq!(c.gray_level().unwrap(), 0.5);
    }

    #[test]
    fn unknown_component_is_an_error() {
        let c = Color::gray(0.5);
        assert_eq!(
            c.get("cyan"),
            Err(ColorError::UnknownComponent("cyan".to_string()))
        );
    }

    // ── writing ───────────────────────────────────────────────────────────

    #[test]
    fn setting_foreign_component_converts_in_place() {
        let mut c = Color::rgb(1.0, 0.0, 0.0);
        c.set_brightness(0.5).unwrap();
        assert_eq!(c.representation(), Representation::Hsb);
        assert_eq!(c.hue().unwrap(), 0.0);
        assert_eq!(c.brightness().unwrap(), 0.5);
        assert!(close(c.red().unwrap(), 0.5));
    }

    #[test]
    fn setting_hue_on_hsb_keeps_hsb() {
        let mut c = Color::hsb(10.0, 1.0, 1.0);
        c.set_hue(200.0).unwrap();
        c.set_saturation(0.3).unwrap();
        assert_eq!(c.representation(), Representation::Hsb);
        assert_eq!(c.stored_components()[0], Component::Number(200.0));
    }

    #[test]
    fn setting_hue_on_rgb_switches_to_hsl() {
        let mut c = Color::rgb(0.0, 0.0, 1.0);
        c.set_hue(120.0).unwrap();
        assert_eq!(c.representation(), Representation::Hsl);
        assert!(close(c.green().unwrap(), 1.0));
    }

    #[test]
    fn setters_clamp_and_wrap() {
        let mut c = Color::rgb(0.5, 0.5, 0.5);
        c.set_red(-0.3).unwrap();
        c.set_green(1.7).unwrap();
        assert_eq!(c.red().unwrap(), 0.0);
        assert_eq!(c.green().unwrap(), 1.0);

        let mut h = Color::hsb(0.0, 1.0, 1.0);
        h.set_hue(-30.0).unwrap();
        assert_eq!(h.hue().unwrap(), 330.0);
        h.set_hue(370.0).unwrap();
        assert_eq!(h.hue().unwrap(), 10.0);
    }

    #[test]
    fn wrong_value_kind_is_rejected_without_mutation() {
        let mut c = Color::rgb(0.2, 0.4, 0.6);
        let err = c.set("red", Point::new(1.0, 1.0)).unwrap_err();
        assert_eq!(err, ColorError::InvalidComponent { name: "red", expected: "a number" });
        assert_eq!(c, Color::rgb(0.2, 0.4, 0.6));
    }

    // ── gradients ─────────────────────────────────────────────────────────

    fn gradient() -> Rc<Gradient> {
        Gradient::linear([(Color::gray(0.0), 0.0), (Color::gray(1.0), 1.0)])
    }

    #[test]
    fn scalar_setter_on_gradient_fails() {
        let mut c = Color::new_gradient(gradient(), (0.0, 0.0), (1.0, 0.0), None);
        assert_eq!(
            c.set_red(1.0),
            Err(ColorError::UnsupportedConversion {
                from: Representation::Gradient,
                to: Representation::Rgb,
            })
        );
        assert_eq!(c.representation(), Representation::Gradient);
    }

    #[test]
    fn anchors_accept_pairs_and_highlight_is_optional() {
        let mut c = Color::new_gradient(gradient(), (0.0, 0.0), (1.0, 0.0), None);
        assert_eq!(c.highlight().unwrap(), None);
        c.set_highlight((0.5, 0.5)).unwrap();
        assert_eq!(c.highlight().unwrap(), Some(Point::new(0.5, 0.5)));
        c.set("hilite", Point::new(0.25, 0.25)).unwrap();
        assert_eq!(c.highlight().unwrap(), Some(Point::new(0.25, 0.25)));
        c.set_origin((2.0, 3.0)).unwrap();
        assert_eq!(c.origin().unwrap(), Point::new(2.0, 3.0));
        c.clear_highlight();
        assert_eq!(c.highlight().unwrap(), None);
    }

    #[test]
    fn setting_gradient_registers_owner() {
        let mut c = Color::new_gradient(gradient(), (0.0, 0.0), (1.0, 0.0), None);
        let other = Rc::new(Gradient::new(vec![GradientStop::new(Color::gray(0.5), 0.0)], true));
        c.set_gradient(Rc::clone(&other)).unwrap();
        assert_eq!(other.owner_count(), 1);
        assert!(Rc::ptr_eq(&c.gradient().unwrap(), &other));
    }

    #[test]
    fn replaced_gradient_no_longer_notifies() {
        use core::cell::Cell;
        use std::rc::Weak;

        use crate::color::StyleOwner;

        struct Counter(Cell<u32>);
        impl StyleOwner for Counter {
            fn style_changed(&self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let first = gradient();
        let mut c = Color::new_gradient(Rc::clone(&first), (0.0, 0.0), (1.0, 0.0), None);
        let owner = Rc::new(Counter(Cell::new(0)));
        c.set_owner(Rc::downgrade(&owner) as Weak<dyn StyleOwner>);

        c.set_gradient(gradient()).unwrap();
        assert_eq!(first.owner_count(), 0);
        let after_set = owner.0.get();
        first.push_stop(GradientStop::new(Color::gray(0.5), 0.5));
        assert_eq!(owner.0.get(), after_set);

        c.set_gradient(c.gradient().unwrap()).unwrap();
        assert_eq!(c.gradient().unwrap().owner_count(), 1);
    }
}
