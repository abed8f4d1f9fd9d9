//! Component-wise arithmetic between colors.
//!
//! The right-hand color is converted into the left-hand representation; the
//! result is normalized like any stored component. Alpha takes part only when
//! at least one side has it set.

use super::{Color, ColorError, Component, Representation};

impl Color {
    fn combine(
        &self,
        other: &Color,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Color, ColorError> {
        if self.repr == Representation::Gradient || other.repr == Representation::Gradient {
            return Err(ColorError::InvalidArguments(
                "arithmetic is not defined for gradient colors".to_string(),
            ));
        }
        let lhs = self.numbers(self.repr)?;
        let rhs = other.convert(self.repr)?.numbers(self.repr)?;
        let mut components = Vec::with_capacity(lhs.len());
        for ((info, a), b) in self.repr.components().iter().zip(lhs).zip(rhs) {
            let value = op(a, b);
            if !value.is_finite() {
                return Err(ColorError::InvalidArguments(format!(
                    "{} is not finite after the operation",
                    info.name
                )));
            }
            components.push(Component::Number(info.kind.normalize(value)));
        }
        let alpha = match (self.alpha, other.alpha) {
            (None, None) => None,
            (a, b) => {
                let value = op(a.unwrap_or(1.0), b.unwrap_or(1.0));
                if !value.is_finite() {
                    return Err(ColorError::InvalidArguments(
                        "alpha is not finite after the operation".to_string(),
                    ));
                }
                Some(value.clamp(0.0, 1.0))
            }
        };
        Ok(Color::create(self.repr, components, alpha))
    }

    pub fn add(&self, other: &Color) -> Result<Color, ColorError> {
        self.combine(other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Color) -> Result<Color, ColorError> {
        self.combine(other, |a, b| a - b)
    }

    pub fn multiply(&self, other: &Color) -> Result<Color, ColorError> {
        self.combine(other, |a, b| a * b)
    }

    /// Fails when a component of `other` is zero and the quotient is not
    /// finite.
    pub fn divide(&self, other: &Color) -> Result<Color, ColorError> {
        self.combine(other, |a, b| a / b)
    }

    /// Multiplies every component by `factor`. Alpha is left unchanged.
    pub fn scale(&self, factor: f64) -> Result<Color, ColorError> {
        let numbers = self.numbers(self.repr)?;
        let components = self
            .repr
            .components()
            .iter()
            .zip(numbers)
            .map(|(info, v)| Component::Number(info.kind.normalize(v * factor)))
            .collect();
        Ok(Color::create(self.repr, components, self.alpha))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::paint::Gradient;

    fn assert_rgb(c: &Color, expected: [f64; 3]) {
        let actual = [c.red().unwrap(), c.green().unwrap(), c.blue().unwrap()];
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn add_and_subtract_clamp() {
        let a = Color::rgb(0.5, 0.8, 0.0);
        let b = Color::rgb(0.25, 0.5, 0.1);
        assert_rgb(&a.add(&b).unwrap(), [0.75, 1.0, 0.1]);
        assert_rgb(&b.subtract(&a).unwrap(), [0.0, 0.0, 0.1]);
    }

    #[test]
    fn right_hand_side_is_converted() {
        let c = Color::rgb(1.0, 1.0, 1.0).multiply(&Color::gray(0.5)).unwrap();
        assert_eq!(c.representation(), Representation::Rgb);
        assert_rgb(&c, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn hue_wraps() {
        let c = Color::hsb(300.0, 0.5, 0.5).add(&Color::hsb(120.0, 0.0, 0.0)).unwrap();
        assert_eq!(c.hue().unwrap(), 60.0);
    }

    #[test]
    fn alpha_combines_when_set() {
        let c = Color::rgba(0.5, 0.5, 0.5, 0.5).multiply(&Color::rgb(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(c.raw_alpha(), Some(0.5));
        let c = Color::rgb(0.5, 0.5, 0.5).multiply(&Color::rgb(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(c.raw_alpha(), None);
    }

    #[test]
    fn divide_by_zero_fails() {
        let err = Color::gray(0.5).divide(&Color::gray(0.0)).unwrap_err();
        assert!(matches!(err, ColorError::InvalidArguments(_)));
        assert_rgb(&Color::rgb(0.2, 0.4, 0.8).divide(&Color::rgb(0.4, 0.8, 1.0)).unwrap(), [0.5, 0.5, 0.8]);
    }

    #[test]
    fn scale_keeps_alpha() {
        let c = Color::rgba(0.2, 0.4, 0.6, 0.3).scale(2.0).unwrap();
        assert_rgb(&c, [0.4, 0.8, 1.0]);
        assert_eq!(c.raw_alpha(), Some(0.3));
    }

    #[test]
    fn gradients_are_rejected() {
        let g = Color::new_gradient(Rc::new(Gradient::new(Vec::new(), false)), (0.0, 0.0), (1.0, 0.0), None);
        assert!(matches!(Color::gray(0.5).add(&g), Err(ColorError::InvalidArguments(_))));
        assert!(g.scale(2.0).is_err());
    }
}
